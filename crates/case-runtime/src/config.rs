//! # Runtime Configuration
//!
//! Defaults, overridden by environment variables, overridden again by
//! command-line flags in the binary.
//!
//! | Variable                          | Default                      |
//! |-----------------------------------|------------------------------|
//! | `CASEFLOW_API_BASE_URL`           | `http://127.0.0.1:3000/api`  |
//! | `CASEFLOW_REQUEST_TIMEOUT_SECS`   | `30`                         |
//! | `CASEFLOW_CONNECT_TIMEOUT_SECS`   | `5`                          |
//! | `CASEFLOW_BUS_CAPACITY`           | `1000`                       |
//! | `CASEFLOW_LOG_LEVEL`              | `info` (`RUST_LOG` wins)     |
//! | `CASEFLOW_JSON_LOGS`              | `false`                      |

use std::env;
use std::time::Duration;

use cf_03_api_client::ClientConfig;
use shared_bus::DEFAULT_CHANNEL_CAPACITY;
use thiserror::Error;

pub const ENV_BASE_URL: &str = "CASEFLOW_API_BASE_URL";
pub const ENV_REQUEST_TIMEOUT: &str = "CASEFLOW_REQUEST_TIMEOUT_SECS";
pub const ENV_CONNECT_TIMEOUT: &str = "CASEFLOW_CONNECT_TIMEOUT_SECS";
pub const ENV_BUS_CAPACITY: &str = "CASEFLOW_BUS_CAPACITY";
pub const ENV_LOG_LEVEL: &str = "CASEFLOW_LOG_LEVEL";
pub const ENV_JSON_LOGS: &str = "CASEFLOW_JSON_LOGS";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{var} must be a non-negative integer, got {value:?}")]
    InvalidNumber { var: &'static str, value: String },

    #[error("{var} must be true/false/1/0, got {value:?}")]
    InvalidBool { var: &'static str, value: String },

    #[error("API base URL is empty")]
    EmptyBaseUrl,

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Backend client settings.
    pub client: ClientConfig,
    /// Events buffered per bus subscriber.
    pub bus_capacity: usize,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Emit logs as JSON lines.
    pub json_logs: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            bus_capacity: DEFAULT_CHANNEL_CAPACITY,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl RuntimeConfig {
    /// Defaults overridden by `CASEFLOW_*` environment variables.
    ///
    /// # Errors
    ///
    /// A [`ConfigError`] naming the first variable that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    ///
    /// # Errors
    ///
    /// A [`ConfigError`] naming the first variable that does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL) {
            config.client.base_url = url;
        }
        if let Some(secs) = lookup(ENV_REQUEST_TIMEOUT) {
            config.client.request_timeout = Duration::from_secs(parse_number(ENV_REQUEST_TIMEOUT, &secs)?);
        }
        if let Some(secs) = lookup(ENV_CONNECT_TIMEOUT) {
            config.client.connect_timeout = Duration::from_secs(parse_number(ENV_CONNECT_TIMEOUT, &secs)?);
        }
        if let Some(capacity) = lookup(ENV_BUS_CAPACITY) {
            let capacity = parse_number(ENV_BUS_CAPACITY, &capacity)?;
            config.bus_capacity = usize::try_from(capacity).map_err(|_| ConfigError::InvalidNumber {
                var: ENV_BUS_CAPACITY,
                value: capacity.to_string(),
            })?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = level;
        }
        if let Some(flag) = lookup(ENV_JSON_LOGS) {
            config.json_logs = parse_bool(ENV_JSON_LOGS, &flag)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the runtime cannot start with.
    ///
    /// # Errors
    ///
    /// The first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if self.client.request_timeout.is_zero() {
            return Err(ConfigError::Zero(ENV_REQUEST_TIMEOUT));
        }
        if self.client.connect_timeout.is_zero() {
            return Err(ConfigError::Zero(ENV_CONNECT_TIMEOUT));
        }
        if self.bus_capacity == 0 {
            return Err(ConfigError::Zero(ENV_BUS_CAPACITY));
        }
        Ok(())
    }
}

fn parse_number(var: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        var,
        value: value.to_string(),
    })
}

fn parse_bool(var: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            var,
            value: value.to_string(),
        }),
    }
}
