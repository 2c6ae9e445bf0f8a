//! # Logging Setup
//!
//! One global `tracing` subscriber: `EnvFilter` from `RUST_LOG`, falling
//! back to the configured level, with plain or JSON output.

use tracing_subscriber::EnvFilter;

use crate::config::RuntimeConfig;

/// Build the log filter. `RUST_LOG` takes precedence over `log_level`.
#[must_use]
pub fn env_filter(config: &RuntimeConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(
    config: &RuntimeConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
}
