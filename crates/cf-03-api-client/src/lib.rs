//! # CF-03: Case API Client
//!
//! The contract between the workflows and the REST backend, plus two
//! implementations of it.
//!
//! ## Architecture
//!
//! - **Ports**: `CaseApi`, one async method per backend operation
//! - **Domain**: endpoint routing and client errors
//! - **Adapters**: `HttpCaseApi` (reqwest) and `FixtureCaseApi` (scripted,
//!   used by demo mode and tests)
//!
//! Every call resolves to [`ApiResult`](shared_types::ApiResult): a 2xx
//! response or an [`ApiFailure`](shared_types::ApiFailure). Retries and
//! auth headers are left to the surrounding HTTP stack.

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;

pub use adapters::fixture::{FixtureCaseApi, RecordedCall};
pub use adapters::http::HttpCaseApi;
pub use config::ClientConfig;
pub use domain::endpoints::{Endpoint, HttpMethod};
pub use domain::errors::ApiError;
pub use ports::outbound::CaseApi;
