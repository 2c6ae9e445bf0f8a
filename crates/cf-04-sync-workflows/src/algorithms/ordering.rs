//! # Timestamp Ordering
//!
//! Faults and notes carry ISO-8601 timestamps, which order correctly as
//! plain strings. Items without a string timestamp sort first; ties keep
//! their input order.

use serde_json::Value;

/// Field faults are ordered by.
pub const FAULT_TIMESTAMP: &str = "reportedAt";
/// Field notes are ordered by.
pub const NOTE_TIMESTAMP: &str = "sentAt";

/// Stable ascending sort by the string at `field`.
#[must_use]
pub fn sort_by_timestamp(mut items: Vec<Value>, field: &str) -> Vec<Value> {
    items.sort_by(|a, b| a.get(field).and_then(Value::as_str).cmp(&b.get(field).and_then(Value::as_str)));
    items
}
