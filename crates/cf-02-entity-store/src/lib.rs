//! # CF-02: Entity Store
//!
//! The normalized entity cache. State changes only through [`reduce`], a
//! pure function of the previous state and one [`StoreEvent`]. Views are
//! derived with the functions in [`selectors`].
//!
//! ## Architecture
//!
//! - **Domain**: `AppState` slices and the reducer
//! - **Selectors**: read-only projections plus a memoizing wrapper
//! - **Application**: the single-writer `Store` task and its `Dispatcher`
//!
//! [`StoreEvent`]: shared_bus::StoreEvent

pub mod application;
pub mod domain;
pub mod selectors;

pub use application::store::{Dispatcher, Store};
pub use domain::errors::StoreError;
pub use domain::reducer::reduce;
pub use domain::state::{AppSlice, AppState, CaseRecipients, CasesSlice};
pub use selectors::memo::Memoized;
