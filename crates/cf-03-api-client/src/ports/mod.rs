//! Ports for the API client.

pub mod outbound;

pub use outbound::CaseApi;
