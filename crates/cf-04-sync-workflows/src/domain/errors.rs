//! Error types for workflow runs.
//!
//! A failed run never takes its listener down; the error is logged and
//! the listener waits for the next trigger.

use cf_01_normalizer::NormalizeError;
use cf_02_entity_store::StoreError;
use shared_types::ApiFailure;
use thiserror::Error;

/// Why a workflow run stopped early.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    /// The backend call failed.
    #[error("backend call failed: {0}")]
    Api(#[from] ApiFailure),

    /// The response did not match its schema.
    #[error("response could not be normalized: {0}")]
    Normalize(#[from] NormalizeError),

    /// The response body was not the expected JSON type.
    #[error("unexpected response body: expected {expected}")]
    UnexpectedBody { expected: &'static str },

    /// The store stopped accepting events.
    #[error(transparent)]
    Store(#[from] StoreError),
}
