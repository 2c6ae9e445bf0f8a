//! Domain module for the workflows.

pub mod errors;
pub mod workflow;

pub use errors::*;
pub use workflow::*;
