//! Configuration management.
//!
//! This module handles:
//! - Environment variable loading
//! - Configuration validation
//! - Default value handling
//!
//! # Example
//!
//! ```
//! use interview_branching::config::{Config, MissingScreenPolicy};
//!
//! // Use Config::from_env() in production
//! let config = Config {
//!     missing_screen_policy: MissingScreenPolicy::Strict,
//!     ..Config::default()
//! };
//!
//! assert_eq!(config.null_date.to_string(), "1970-01-01");
//! assert!(config.missing_screen_policy.is_strict());
//! ```

mod validation;

pub use validation::{validate_config, LOG_LEVELS};

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::ConfigError;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Date substituted for the literal response `"null"` in date comparisons.
pub const DEFAULT_NULL_DATE: &str = "1970-01-01";

/// How to treat a screen id that does not resolve in the interview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingScreenPolicy {
    /// Drop the reference and keep going.
    #[default]
    Lenient,
    /// Fail the turn with `ScriptError::MissingScreenReference`.
    Strict,
}

impl MissingScreenPolicy {
    /// Returns true for [`MissingScreenPolicy::Strict`].
    #[must_use]
    pub const fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

impl fmt::Display for MissingScreenPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lenient => f.write_str("lenient"),
            Self::Strict => f.write_str("strict"),
        }
    }
}

impl FromStr for MissingScreenPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            _ => Err(ConfigError::InvalidValue {
                var: "INTERVIEW_SCREEN_POLICY".into(),
                reason: "must be 'strict' or 'lenient'".into(),
            }),
        }
    }
}

/// Interpreter configuration.
///
/// Use [`Config::from_env`] to load configuration from environment variables,
/// or [`Config::default`] for the documented defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Date the literal `"null"` parses to in date comparisons.
    pub null_date: NaiveDate,
    /// Treatment of unresolved screen ids in push and starting-state lists.
    pub missing_screen_policy: MissingScreenPolicy,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            null_date: NaiveDate::default(),
            missing_screen_policy: MissingScreenPolicy::default(),
            log_level: DEFAULT_LOG_LEVEL.into(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables (with defaults):
    /// - `INTERVIEW_NULL_DATE`: ISO date used for `"null"` responses (default: `1970-01-01`)
    /// - `INTERVIEW_SCREEN_POLICY`: `strict` or `lenient` (default: `lenient`)
    /// - `LOG_LEVEL`: Logging level (default: `info`)
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `INTERVIEW_NULL_DATE` is not a `YYYY-MM-DD` date
    /// - `INTERVIEW_SCREEN_POLICY` is not `strict` or `lenient`
    /// - Any value fails validation (see [`validate_config`])
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        let null_date = std::env::var("INTERVIEW_NULL_DATE").map_or_else(
            |_| Ok(NaiveDate::default()),
            |val| parse_null_date("INTERVIEW_NULL_DATE", &val),
        )?;

        let missing_screen_policy = std::env::var("INTERVIEW_SCREEN_POLICY")
            .map_or(Ok(MissingScreenPolicy::default()), |val| val.parse())?;

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| DEFAULT_LOG_LEVEL.into());

        let config = Self {
            null_date,
            missing_screen_policy,
            log_level,
        };

        validate_config(&config)?;
        Ok(config)
    }

    /// Replace the missing-screen policy.
    #[must_use]
    pub fn with_missing_screen_policy(mut self, policy: MissingScreenPolicy) -> Self {
        self.missing_screen_policy = policy;
        self
    }

    /// Replace the date used for `"null"` responses.
    #[must_use]
    pub fn with_null_date(mut self, null_date: NaiveDate) -> Self {
        self.null_date = null_date;
        self
    }
}

/// Parse an environment value as a `YYYY-MM-DD` date.
fn parse_null_date(name: &str, val: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(val.trim(), "%Y-%m-%d").map_err(|_| ConfigError::InvalidValue {
        var: name.into(),
        reason: "must be an ISO date (YYYY-MM-DD)".into(),
    })
}
