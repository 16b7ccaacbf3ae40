//! services/client/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the backing document service.
    pub service_url: String,
    pub log_level: Level,
    /// Bounded timeout applied to every request by the transport.
    pub request_timeout: Duration,
    /// How often the document-presence check feeding sample questions runs.
    pub status_poll_interval: Duration,
    /// How often the raw connectivity check runs.
    pub connectivity_poll_interval: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let service_url = std::env::var("EDUFY_SERVICE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let request_timeout = duration_var("REQUEST_TIMEOUT_SECS", 30)?;
        let status_poll_interval = duration_var("STATUS_POLL_SECS", 10)?;
        let connectivity_poll_interval = duration_var("CONNECTIVITY_POLL_SECS", 30)?;

        Ok(Self {
            service_url,
            log_level,
            request_timeout,
            status_poll_interval,
            connectivity_poll_interval,
        })
    }
}

/// Reads a duration in whole seconds from the environment, with a default.
fn duration_var(name: &str, default_secs: u64) -> Result<Duration, ConfigError> {
    match std::env::var(name) {
        Ok(value) => {
            let secs = value.parse::<u64>().map_err(|_| {
                ConfigError::InvalidValue(
                    name.to_string(),
                    format!("'{}' is not a whole number of seconds", value),
                )
            })?;
            Ok(Duration::from_secs(secs))
        }
        Err(_) => Ok(Duration::from_secs(default_secs)),
    }
}
