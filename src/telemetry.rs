//! Tracing setup for hosts embedding the interpreter.
//!
//! The interpreter itself only emits `tracing` events. Hosts that do not
//! install their own subscriber can call [`init_tracing`].

use tracing_subscriber::filter::EnvFilter;

use crate::config::{Config, DEFAULT_LOG_LEVEL};

/// Install a stderr subscriber filtered by `config.log_level`.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing(config: &Config) {
    let filter = config
        .log_level
        .parse::<EnvFilter>()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    // Ignore the error when a global subscriber is already set
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
