//! Adapters implementing [`CaseApi`](crate::ports::CaseApi).

pub mod fixture;
pub mod http;

pub use fixture::FixtureCaseApi;
pub use http::HttpCaseApi;
