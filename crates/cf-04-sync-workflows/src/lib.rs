//! # CF-04: Synchronization Workflows
//!
//! Long-lived listeners that react to store events, talk to the backend
//! and dispatch the results back into the store.
//!
//! ```text
//! CaseCommands ──dispatch──▶ Store ──publish──▶ Bus
//!                              ▲                 │
//!                              │                 ├─▶ fetch executor ──▶ CaseApi
//!                              │                 │
//!                              └──dispatch───────┴─▶ workflow listeners ──▶ CaseApi
//! ```
//!
//! ## Cancellation
//!
//! Each workflow kind has its own listener. Load workflows never suspend
//! and always run to completion. For workflows that await the backend, a
//! new trigger aborts the previous run of the same kind (latest wins).
//! Fetches are never cancelled.
//!
//! ## Architecture
//!
//! - **Domain**: `WorkflowKind` and `WorkflowError`
//! - **Algorithms**: timestamp ordering for faults and notes
//! - **Application**: workers, listeners, the fetch executor and the
//!   `CaseCommands` entry points

pub mod algorithms;
pub mod application;
pub mod domain;

pub use application::commands::CaseCommands;
pub use application::listener::{WorkflowContext, Workflows};
pub use domain::errors::WorkflowError;
pub use domain::workflow::WorkflowKind;
