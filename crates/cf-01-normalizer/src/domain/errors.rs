//! Error types for normalization.

use thiserror::Error;

/// A document did not have the shape its schema declares.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// An embedded entity object lacks a usable id.
    #[error("{entity} at {path} has no usable id")]
    MissingId { entity: String, path: String },

    /// The value at `path` is not what the schema expects.
    #[error("expected {expected} at {path}, found {found}")]
    ShapeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}
