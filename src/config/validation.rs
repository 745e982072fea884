//! Configuration validation.
//!
//! This module provides validation logic for configuration values.

use super::Config;
use crate::error::ConfigError;

/// Accepted log levels.
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if `LOG_LEVEL` is not one of
/// [`LOG_LEVELS`] (case-insensitive).
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let level = config.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(ConfigError::InvalidValue {
            var: "LOG_LEVEL".into(),
            reason: format!("must be one of {}", LOG_LEVELS.join(", ")),
        });
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_log_level_is_case_insensitive() {
        let config = Config {
            log_level: "DEBUG".to_string(),
            ..Config::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_unknown_log_level() {
        let config = Config {
            log_level: "verbose".to_string(),
            ..Config::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var, .. } if var == "LOG_LEVEL"));
    }
}
