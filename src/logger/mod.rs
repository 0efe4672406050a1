//! Logger initialization.
//!
//! Console logging built on `tracing-subscriber`, with an env-filter level,
//! optional JSON output and ANSI colors only when writing to a terminal.
//! `RUST_LOG`, when set, overrides the configured level.

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggerConfig;

/// Initialize the logger with the given configuration.
///
/// # Errors
/// Fails if a global subscriber is already installed.
pub fn init_logger(config: &LoggerConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let use_ansi = config.colored && std::io::stdout().is_terminal();

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true))
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_ansi(use_ansi).with_target(true))
            .try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggerConfig;

    #[test]
    fn test_init_logger_installs_subscriber_once() {
        // Only one global subscriber can exist per process: the first call
        // succeeds and the second must fail.
        let config = LoggerConfig::default();
        assert!(init_logger(&config).is_ok());
        assert!(init_logger(&config).is_err());
    }
}
