//! Tracing subscriber setup
//!
//! Logs go to stderr so stdout stays clean for the resolved chain.

use crate::config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;

/// Filter directive for a `-v` count, or the configured level when zero
pub(crate) fn level_for(config: &LoggingConfig, verbosity: u8) -> String {
    match verbosity {
        0 => config.level.clone(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Install the global subscriber
///
/// A second call is a no-op.
pub(crate) fn init(config: &LoggingConfig, verbosity: u8) {
    let filter = EnvFilter::try_new(level_for(config, verbosity))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let result = match config.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_overrides_configured_level() {
        let config = LoggingConfig {
            level: "error".to_string(),
            ..Default::default()
        };
        assert_eq!(level_for(&config, 0), "error");
        assert_eq!(level_for(&config, 1), "info");
        assert_eq!(level_for(&config, 2), "debug");
        assert_eq!(level_for(&config, 7), "trace");
    }

    #[test]
    fn init_twice_does_not_panic() {
        let config = LoggingConfig::default();
        init(&config, 0);
        init(&config, 3);
    }
}
