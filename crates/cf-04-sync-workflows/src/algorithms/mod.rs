//! Ordering helpers used by the workflows.

pub mod ordering;

pub use ordering::sort_by_timestamp;
