//! # Shared Types Crate
//!
//! Contains the entity records, keyed entity tables, the API response
//! envelope and the mutation payloads used across the caseflow crates.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-crate types are defined here.
//! - **Opaque Records**: Entity fields are plain JSON objects; only `id` and
//!   the foreign-key fields carry meaning to the store.
//! - **Tagged Outcomes**: API calls yield `Result<ApiResponse, ApiFailure>`
//!   instead of a `{ response, error }` pair.

pub mod entities;
pub mod envelope;
pub mod errors;
pub mod pagination;
pub mod requests;

pub use entities::*;
pub use envelope::{ApiResponse, ApiResult, ResponseHeaders};
pub use errors::ApiFailure;
pub use pagination::Pagination;
pub use requests::*;
