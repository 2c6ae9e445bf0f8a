//! # Store Container
//!
//! Single writer over [`AppState`]. Events arrive through a [`Dispatcher`]
//! and are reduced one at a time, in submission order, by the store task.
//! After each event is applied it is re-published on the bus, so any
//! subscriber that sees an event can read a state that includes it.
//!
//! ```text
//! Dispatcher ──mpsc──▶ store task ──reduce──▶ RwLock<AppState>
//!                          │
//!                          └──publish──▶ InMemoryEventBus
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use shared_bus::{EventPublisher, StoreEvent};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::domain::errors::StoreError;
use crate::domain::reducer::reduce;
use crate::domain::state::AppState;

/// Cloneable handle for submitting events to the store.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    sender: mpsc::UnboundedSender<StoreEvent>,
}

impl Dispatcher {
    /// Queue an event for reduction.
    ///
    /// # Errors
    ///
    /// [`StoreError::Closed`] once the store task has exited.
    pub fn dispatch(&self, event: StoreEvent) -> Result<(), StoreError> {
        self.sender.send(event).map_err(|_| StoreError::Closed)
    }
}

/// Shared read access to the state plus the dispatcher feeding it.
#[derive(Clone)]
pub struct Store {
    state: Arc<RwLock<AppState>>,
    dispatcher: Dispatcher,
    reduced: Arc<AtomicU64>,
}

impl Store {
    /// Start the store task with an empty state.
    ///
    /// The task runs until `shutdown` flips to `true` or every dispatcher
    /// (including the one held by this `Store`) is dropped.
    pub fn spawn(
        publisher: Arc<dyn EventPublisher>,
        shutdown: watch::Receiver<bool>,
    ) -> (Self, JoinHandle<()>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let store = Self {
            state: Arc::new(RwLock::new(AppState::default())),
            dispatcher: Dispatcher { sender },
            reduced: Arc::new(AtomicU64::new(0)),
        };

        let task = StoreTask {
            state: Arc::clone(&store.state),
            reduced: Arc::clone(&store.reduced),
            receiver,
            publisher,
            shutdown,
        };
        let handle = tokio::spawn(task.run());
        (store, handle)
    }

    /// A handle for submitting events.
    #[must_use]
    pub fn dispatcher(&self) -> Dispatcher {
        self.dispatcher.clone()
    }

    /// Shorthand for `self.dispatcher().dispatch(event)`.
    ///
    /// # Errors
    ///
    /// [`StoreError::Closed`] once the store task has exited.
    pub fn dispatch(&self, event: StoreEvent) -> Result<(), StoreError> {
        self.dispatcher.dispatch(event)
    }

    /// Run `f` against the current state under a read lock.
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        f(&self.state.read())
    }

    /// A copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> AppState {
        self.state.read().clone()
    }

    /// Number of events reduced so far.
    #[must_use]
    pub fn events_reduced(&self) -> u64 {
        self.reduced.load(Ordering::Acquire)
    }
}

struct StoreTask {
    state: Arc<RwLock<AppState>>,
    reduced: Arc<AtomicU64>,
    receiver: mpsc::UnboundedReceiver<StoreEvent>,
    publisher: Arc<dyn EventPublisher>,
    shutdown: watch::Receiver<bool>,
}

impl StoreTask {
    async fn run(mut self) {
        info!("[cf-02] Store task started");

        loop {
            tokio::select! {
                biased;
                changed = self.shutdown.changed() => {
                    if changed.is_err() || *self.shutdown.borrow() {
                        info!("[cf-02] Shutdown signalled, store task exiting");
                        break;
                    }
                }
                event = self.receiver.recv() => {
                    let Some(event) = event else {
                        info!("[cf-02] All dispatchers dropped, store task exiting");
                        break;
                    };
                    self.apply(event).await;
                }
            }
        }
    }

    async fn apply(&self, event: StoreEvent) {
        let kind = event.kind();
        {
            let mut state = self.state.write();
            let current = std::mem::take(&mut *state);
            *state = reduce(current, &event);
        }
        self.reduced.fetch_add(1, Ordering::Release);
        debug!(?kind, "[cf-02] Event reduced");

        self.publisher.publish(event).await;
    }
}
