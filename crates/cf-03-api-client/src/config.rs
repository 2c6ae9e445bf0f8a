//! Configuration for the HTTP adapter.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default backend root used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:3000/api";

/// HTTP client settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root every route is resolved against.
    pub base_url: String,
    /// Whole-request timeout.
    pub request_timeout: Duration,
    /// TCP connect timeout.
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl ClientConfig {
    /// Default timeouts against `base_url`.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
