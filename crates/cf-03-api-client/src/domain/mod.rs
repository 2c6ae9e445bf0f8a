//! Domain module for the API client: routes and errors.

pub mod endpoints;
pub mod errors;

pub use endpoints::*;
pub use errors::*;
