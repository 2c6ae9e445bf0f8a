//! Error types for building an API client.
//!
//! Call-time failures are not errors of the client; they come back as
//! [`ApiFailure`](shared_types::ApiFailure) values.

use thiserror::Error;

/// Errors raised while constructing a client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL cannot be parsed or cannot carry a path.
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// The underlying HTTP client could not be built.
    #[error("HTTP client setup failed: {0}")]
    Http(#[from] reqwest::Error),
}
