//! Domain module for the normalizer: schemas and errors.

pub mod errors;
pub mod schema;

pub use errors::*;
pub use schema::*;
