//! Configuration error types.
//!
//! Runtime per-tick failures (network, provider, malformed payloads) are
//! owned by the service crates and never cross this boundary; the only
//! errors allowed to halt the process are the configuration errors here,
//! and only at startup.

use thiserror::Error;

/// Errors raised while loading or validating the dashboard configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to locate config directory")]
    NoConfigDir,

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_setting() {
        let err = ConfigError::MissingSetting("weather.api_key".into());
        assert!(err.to_string().contains("weather.api_key"));

        let err = ConfigError::Invalid("clock.timezone: not an IANA zone".into());
        assert!(err.to_string().contains("clock.timezone"));
    }
}
