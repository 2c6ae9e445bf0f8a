//! # Shared Bus - Event Bus for Store Events
//!
//! Every event the store reduces is re-published here. Workflows subscribe
//! to the kinds that trigger them; tests subscribe to wait for outcomes.
//!
//! ```text
//! ┌──────────────┐   dispatch()   ┌──────────────┐
//! │   Workflow   │ ─────────────→ │    Store     │
//! │              │                │  (reduce)    │
//! └──────────────┘                └──────┬───────┘
//!        ↑                               │ publish()
//!        │         subscribe()    ┌──────▼───────┐
//!        └─────────────────────── │  Event Bus   │
//!                                 └──────────────┘
//! ```
//!
//! ## Ordering
//!
//! The bus is a single broadcast channel, so every subscriber sees events
//! in the order the store reduced them.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventKind, EventTopic, FetchRequest, Resource, StoreEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before it starts lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
