// polyglot-core-rs/src/config.rs
//
// Pipeline configuration (.env file / environment):
// - POLYGLOT_PIPELINE_TIMEOUT_SECS: upstream call timeout, clamped to 1-300 (default: 30)
// - POLYGLOT_PIPELINE_MODEL: model requested for every flow (default: the client's model)

use std::time::Duration;

use config_rs::{get_env_opt, get_timeout, MAX_TIMEOUT_SECS, MIN_TIMEOUT_SECS};

pub const ENV_PREFIX: &str = "POLYGLOT_PIPELINE";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Upper bound on one upstream call
    pub timeout: Duration,
    /// Model override sent with every request
    pub model: Option<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            model: None,
        }
    }
}

impl PipelineConfig {
    pub fn from_env() -> Self {
        Self {
            timeout: get_timeout(ENV_PREFIX, DEFAULT_TIMEOUT_SECS),
            model: get_env_opt(&format!("{}_MODEL", ENV_PREFIX)),
        }
    }

    /// Set the timeout, clamped into the supported range
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout.clamp(
            Duration::from_secs(MIN_TIMEOUT_SECS),
            Duration::from_secs(MAX_TIMEOUT_SECS),
        );
        self
    }

    /// Set the timeout without clamping
    ///
    /// Only meant for tests that need a sub-second bound.
    pub fn with_exact_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_timeout_clamps() {
        let config = PipelineConfig::default().with_timeout(Duration::from_secs(900));
        assert_eq!(config.timeout, Duration::from_secs(MAX_TIMEOUT_SECS));

        let config = PipelineConfig::default().with_timeout(Duration::from_millis(10));
        assert_eq!(config.timeout, Duration::from_secs(MIN_TIMEOUT_SECS));
    }

    #[test]
    fn test_from_env() {
        // The only test in this crate touching these variables
        std::env::set_var("POLYGLOT_PIPELINE_TIMEOUT_SECS", "12");
        std::env::set_var("POLYGLOT_PIPELINE_MODEL", "gpt-4o");

        let config = PipelineConfig::from_env();
        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.model.as_deref(), Some("gpt-4o"));

        std::env::remove_var("POLYGLOT_PIPELINE_TIMEOUT_SECS");
        std::env::remove_var("POLYGLOT_PIPELINE_MODEL");

        assert_eq!(PipelineConfig::from_env(), PipelineConfig::default());
    }
}
