//! config-rs/lib.rs
//! Shared configuration utilities for the Polyglot crates
//! Provides standardized functions for env lookup and timeout resolution

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Lower bound for any upstream timeout, in seconds
pub const MIN_TIMEOUT_SECS: u64 = 1;

/// Upper bound for any upstream timeout, in seconds
pub const MAX_TIMEOUT_SECS: u64 = 300;

/// Load a `.env` file from the working directory if one exists
///
/// A missing file is not an error; values already set in the process
/// environment take precedence over the file.
pub fn load_dotenv() {
    match dotenv::dotenv() {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => log::debug!("No .env file found, using process environment"),
        Err(e) => log::warn!("Failed to load .env file: {}", e),
    }
}

/// Read an environment variable and parse it, falling back to a default
///
/// # Arguments
/// * `name` - The variable name (e.g., "POLYGLOT_PIPELINE_TIMEOUT_SECS")
/// * `default` - Value used when the variable is unset or unparseable
pub fn get_env_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
            log::warn!("Invalid value '{}' in {}, using default", raw, name);
            default
        }),
        Err(_) => default,
    }
}

/// Read an optional, non-blank string variable
pub fn get_env_opt(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Get the timeout for a component from `<PREFIX>_TIMEOUT_SECS`
///
/// # Arguments
/// * `prefix` - Component prefix (e.g., "POLYGLOT_PIPELINE")
/// * `default_secs` - Timeout used when the variable is not set
///
/// # Returns
/// The timeout, clamped into `MIN_TIMEOUT_SECS..=MAX_TIMEOUT_SECS`
pub fn get_timeout(prefix: &str, default_secs: u64) -> Duration {
    let var_name = format!("{}_TIMEOUT_SECS", prefix.to_uppercase());
    let secs = get_env_or(&var_name, default_secs);
    let clamped = secs.clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS);
    if clamped != secs {
        log::warn!(
            "{}={} is outside {}..={}, using {}",
            var_name,
            secs,
            MIN_TIMEOUT_SECS,
            MAX_TIMEOUT_SECS,
            clamped
        );
    }
    Duration::from_secs(clamped)
}

/// Get service name for logging
///
/// # Arguments
/// * `service_name` - The name of the component (e.g., "PIPELINE", "GENAI")
///
/// # Returns
/// A formatted name suitable for log lines
pub fn get_formatted_service_name(service_name: &str) -> String {
    match service_name.to_uppercase().as_str() {
        "PIPELINE" => "polyglot-pipeline".to_string(),
        "GENAI" => "generation-service".to_string(),
        "SPEECH" => "speech-capability".to_string(),
        other => format!("polyglot-{}", other.to_lowercase().replace('_', "-")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_or() {
        std::env::set_var("CONFIG_RS_TEST_RETRIES", "7");
        assert_eq!(get_env_or("CONFIG_RS_TEST_RETRIES", 3u32), 7);

        std::env::set_var("CONFIG_RS_TEST_BAD", "seven");
        assert_eq!(get_env_or("CONFIG_RS_TEST_BAD", 3u32), 3);

        std::env::remove_var("CONFIG_RS_TEST_MISSING");
        assert_eq!(get_env_or("CONFIG_RS_TEST_MISSING", 0.5f32), 0.5);
    }

    #[test]
    fn test_get_env_opt_ignores_blank() {
        std::env::set_var("CONFIG_RS_TEST_BLANK", "   ");
        assert_eq!(get_env_opt("CONFIG_RS_TEST_BLANK"), None);

        std::env::set_var("CONFIG_RS_TEST_MODEL", " gpt-4o-mini ");
        assert_eq!(get_env_opt("CONFIG_RS_TEST_MODEL"), Some("gpt-4o-mini".to_string()));
    }

    #[test]
    fn test_get_timeout() {
        std::env::set_var("CFG_A_TIMEOUT_SECS", "45");
        assert_eq!(get_timeout("CFG_A", 30), Duration::from_secs(45));

        std::env::set_var("CFG_B_TIMEOUT_SECS", "0");
        assert_eq!(get_timeout("cfg_b", 30), Duration::from_secs(MIN_TIMEOUT_SECS));

        std::env::set_var("CFG_C_TIMEOUT_SECS", "100000");
        assert_eq!(get_timeout("CFG_C", 30), Duration::from_secs(MAX_TIMEOUT_SECS));

        std::env::remove_var("CFG_D_TIMEOUT_SECS");
        assert_eq!(get_timeout("CFG_D", 30), Duration::from_secs(30));
    }

    #[test]
    fn test_formatted_service_name() {
        assert_eq!(get_formatted_service_name("PIPELINE"), "polyglot-pipeline");
        assert_eq!(get_formatted_service_name("genai"), "generation-service");
        assert_eq!(get_formatted_service_name("TEXT_TO_SPEECH"), "polyglot-text-to-speech");
    }
}
