//! Application layer: the store container.

pub mod store;

pub use store::{Dispatcher, Store};
