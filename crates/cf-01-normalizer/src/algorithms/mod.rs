//! Normalization algorithms.

pub mod normalize;

pub use normalize::normalize;
