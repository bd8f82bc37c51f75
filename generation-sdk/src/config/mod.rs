//! Configuration management for generation clients
//!
//! Values are read through a `ConfigProvider` (environment, memory, or a
//! layered chain of both) into a validated `GenerationConfig`.

use std::any::type_name;
use std::collections::HashMap;
use std::env;
use std::fmt::{self, Debug};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use crate::error::{Result, ServiceError};
use once_cell::sync::Lazy;

/// Default OpenAI-compatible endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Default completion budget
///
/// A full correction echoes the whole input text plus analysis sections, so
/// this must stay comfortably above the token count of the longest accepted
/// input. Running out ends in a `length` finish reason, which is `Declined`.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Source of string configuration values
pub trait ConfigProvider: Send + Sync {
    /// Raw value for `key`; a missing key is a `Configuration` error
    fn get_string(&self, key: &str) -> Result<String>;
}

/// Typed reads on top of `ConfigProvider`
pub trait ConfigProviderExt: ConfigProvider {
    /// Parse the value for `key` into `T`
    fn get_parsed<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let raw = self.get_string(key)?;
        raw.trim().parse::<T>().map_err(|e| {
            ServiceError::configuration(format!("{} = {:?} is not a valid {}: {}", key, raw, type_name::<T>(), e))
        })
    }

    /// Parsed value for `key`, or `default` when missing or unparsable
    fn get_or<T>(&self, key: &str, default: T) -> T
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.get_parsed(key).unwrap_or(default)
    }
}

impl<T: ConfigProvider + ?Sized> ConfigProviderExt for T {}

/// Reads `SCOPE_..._KEY` environment variables
///
/// Keys are uppercased and every non-alphanumeric character becomes `_`, so
/// `base-url` under scopes `POLYGLOT`, `GENAI` reads `POLYGLOT_GENAI_BASE_URL`.
#[derive(Debug, Clone, Default)]
pub struct EnvConfigProvider {
    scopes: Vec<String>,
}

impl EnvConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scope segment to the variable name
    pub fn scoped(mut self, segment: impl Into<String>) -> Self {
        self.scopes.push(segment.into());
        self
    }

    fn variable_name(&self, key: &str) -> String {
        let key = key.to_uppercase().replace(|c: char| !c.is_ascii_alphanumeric(), "_");
        self.scopes
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(key.as_str()))
            .collect::<Vec<_>>()
            .join("_")
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        let name = self.variable_name(key);
        env::var(&name).map_err(|e| match e {
            env::VarError::NotPresent => ServiceError::configuration(format!("{} is not set", name)),
            env::VarError::NotUnicode(_) => ServiceError::configuration(format!("{} is not valid unicode", name)),
        })
    }
}

/// Fixed key/value configuration, for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigProvider {
    values: HashMap<String, String>,
}

impl MemoryConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        self.values.insert(key.into(), value.to_string());
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for MemoryConfigProvider {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut provider = Self::new();
        for (key, value) in iter {
            provider.set(key, value);
        }
        provider
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| ServiceError::configuration(format!("{} is not configured", key)))
    }
}

/// Layered config provider; the first provider holding a key wins
#[derive(Default)]
pub struct CompositeConfigProvider {
    providers: Vec<Box<dyn ConfigProvider>>,
}

impl CompositeConfigProvider {
    /// Create a new composite config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a provider to the end of the chain
    pub fn add_provider(&mut self, provider: impl ConfigProvider + 'static) {
        self.providers.push(Box::new(provider));
    }

    /// Builder form of `add_provider`
    pub fn with_provider(mut self, provider: impl ConfigProvider + 'static) -> Self {
        self.add_provider(provider);
        self
    }
}

impl ConfigProvider for CompositeConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.providers
            .iter()
            .find_map(|provider| provider.get_string(key).ok())
            .ok_or_else(|| {
                ServiceError::configuration(format!("{} is not configured by any provider", key))
            })
    }
}

/// Global default configuration provider (`POLYGLOT_GENAI_*`)
pub static DEFAULT_PROVIDER: Lazy<Arc<EnvConfigProvider>> = Lazy::new(|| {
    Arc::new(EnvConfigProvider::new().scoped("POLYGLOT").scoped("GENAI"))
});

/// Trait for service-specific configuration
pub trait ServiceConfig: Debug + Send + Sync {
    /// Validate this configuration
    fn validate(&self) -> Result<()>;

    /// Service name
    fn service_name(&self) -> &str;
}

/// Configuration for an OpenAI-compatible generation endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// API key
    pub api_key: String,

    /// Organization ID (optional)
    pub org_id: Option<String>,

    /// Base URL (can be changed for proxies and compatible providers)
    pub base_url: String,

    /// Model used when a request does not select one
    pub model: String,

    /// Timeout in seconds
    pub timeout_seconds: u64,

    /// Sampling temperature (0.0-2.0)
    pub temperature: f32,

    /// Maximum number of tokens to generate
    pub max_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            org_id: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            temperature: 0.3,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

impl GenerationConfig {
    /// Load configuration from a config provider
    pub fn from_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Result<Self> {
        // Surface the missing-variable message rather than the generic one
        provider.get_string("api_key")?;

        let config = Self::read_provider(provider);
        config.validate()?;
        Ok(config)
    }

    /// Read every key, falling back to defaults, without validating
    pub(crate) fn read_provider<P: ConfigProvider + ?Sized>(provider: &P) -> Self {
        let defaults = Self::default();

        Self {
            api_key: provider.get_string("api_key").unwrap_or_default(),
            org_id: provider.get_string("org_id").ok().filter(|v| !v.is_empty()),
            base_url: provider
                .get_or("base_url", defaults.base_url)
                .trim_end_matches('/')
                .to_string(),
            model: provider.get_or("model", defaults.model),
            timeout_seconds: provider.get_or("timeout_seconds", defaults.timeout_seconds),
            temperature: provider.get_or("temperature", defaults.temperature),
            max_tokens: provider.get_or("max_tokens", defaults.max_tokens),
        }
    }

    /// Load configuration from `POLYGLOT_GENAI_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_provider(&**DEFAULT_PROVIDER)
    }
}

impl ServiceConfig for GenerationConfig {
    fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ServiceError::configuration("API key is required"));
        }

        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ServiceError::configuration(format!(
                "Base URL must be http(s): {}",
                self.base_url
            )));
        }

        if self.model.trim().is_empty() {
            return Err(ServiceError::configuration("Model is required"));
        }

        if self.timeout_seconds == 0 {
            return Err(ServiceError::configuration("Timeout must be at least one second"));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ServiceError::configuration(format!(
                "Temperature {} is outside 0.0..=2.0",
                self.temperature
            )));
        }

        if self.max_tokens == 0 {
            return Err(ServiceError::configuration("max_tokens must be positive"));
        }

        Ok(())
    }

    fn service_name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variable_name() {
        let provider = EnvConfigProvider::new().scoped("POLYGLOT").scoped("GENAI");

        assert_eq!(provider.variable_name("api_key"), "POLYGLOT_GENAI_API_KEY");
        assert_eq!(provider.variable_name("base-url"), "POLYGLOT_GENAI_BASE_URL");
        assert_eq!(EnvConfigProvider::new().variable_name("model"), "MODEL");
    }
}
