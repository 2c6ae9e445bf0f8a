//! Domain module for the entity store: state shape, reducer and errors.

pub mod errors;
pub mod reducer;
pub mod state;

pub use errors::*;
pub use reducer::reduce;
pub use state::*;
