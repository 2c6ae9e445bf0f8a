//! # Event Publisher
//!
//! The publishing side of the bus. Only the store task publishes; every
//! other component dispatches to the store instead.

use crate::events::{EventFilter, StoreEvent};
use crate::subscriber::Subscription;
use crate::DEFAULT_CHANNEL_CAPACITY;
use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::{debug, trace};

/// Trait for publishing events to the bus.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an event to the bus.
    ///
    /// Returns the number of active subscribers that received the event.
    async fn publish(&self, event: StoreEvent) -> usize;
}

/// In-memory event bus over `tokio::sync::broadcast`.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<StoreEvent>,
}

impl InMemoryEventBus {
    /// Create a new in-memory event bus with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a new in-memory event bus with specified capacity.
    ///
    /// A zero capacity is raised to one; broadcast channels need room for
    /// at least a single event.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events matching a filter.
    ///
    /// Only events published after this call are observed.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        let receiver = self.sender.subscribe();
        debug!(topics = ?filter.topics, kinds = ?filter.kinds, "New subscription created");
        Subscription::new(receiver, filter)
    }

    /// Get the number of active subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: StoreEvent) -> usize {
        let kind = event.kind();
        let topic = event.topic();

        match self.sender.send(event) {
            Ok(receivers) => {
                debug!(?kind, ?topic, receivers, "Event published");
                receivers
            }
            Err(_) => {
                // Nobody listening is normal while the runtime starts up.
                trace!(?kind, ?topic, "Event published with no receivers");
                0
            }
        }
    }
}
