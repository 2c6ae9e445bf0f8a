//! # CF-01: Entity Normalizer
//!
//! Turns nested server documents into flat, per-type entity maps plus a
//! `result` that mirrors the input shape.
//!
//! ```text
//! { id: "c1", asset: { id: "a1", .. } }
//!        │ normalize(doc, case_schema())
//!        ▼
//! entities: { case:  { c1: { id: "c1", asset: "a1" } },
//!             asset: { a1: { id: "a1", .. } } }
//! result:   "c1"
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: `Schema` definitions and `NormalizeError`
//! - **Algorithms**: the recursive walk

pub mod algorithms;
pub mod domain;

pub use algorithms::normalize::normalize;
pub use domain::errors::NormalizeError;
pub use domain::schema::{case_schema, cases_schema, EntitySchema, Schema};
