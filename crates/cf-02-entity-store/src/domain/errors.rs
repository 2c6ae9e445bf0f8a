//! Error types for the entity store.

use thiserror::Error;

/// Errors surfaced by the store container.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The store task has stopped; the event was not applied.
    #[error("store is no longer accepting events")]
    Closed,
}
