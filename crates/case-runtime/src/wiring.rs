//! # Runtime Wiring
//!
//! Start order matters: the bus exists first, the workflows subscribe
//! before the store accepts events, and shutdown flips one watch channel
//! that every task selects on.

use std::sync::Arc;
use std::time::Duration;

use cf_02_entity_store::{AppState, Store};
use cf_03_api_client::{CaseApi, FixtureCaseApi, HttpCaseApi};
use cf_04_sync_workflows::{CaseCommands, WorkflowContext, Workflows};
use shared_bus::{EventFilter, EventPublisher, InMemoryEventBus, StoreEvent, Subscription};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::RuntimeConfig;

/// Pick the backend: the scripted demo fixture or the HTTP client.
///
/// # Errors
///
/// The HTTP client rejects an unparseable base URL.
pub fn build_api(config: &RuntimeConfig, demo: bool) -> anyhow::Result<Arc<dyn CaseApi>> {
    if demo {
        info!("[runtime] Using the built-in demo backend");
        return Ok(Arc::new(FixtureCaseApi::demo()));
    }
    let api = HttpCaseApi::new(&config.client)?;
    info!(base_url = %config.client.base_url, "[runtime] Using the HTTP backend");
    Ok(Arc::new(api))
}

/// A running store with its workflows.
pub struct CaseRuntime {
    bus: Arc<InMemoryEventBus>,
    store: Store,
    commands: CaseCommands,
    workflows: Workflows,
    store_task: JoinHandle<()>,
    shutdown_tx: watch::Sender<bool>,
}

impl CaseRuntime {
    /// Start the store task and every workflow listener.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(config: &RuntimeConfig, api: Arc<dyn CaseApi>) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let bus = Arc::new(InMemoryEventBus::with_capacity(config.bus_capacity));

        let publisher: Arc<dyn EventPublisher> = bus.clone();
        let (store, store_task) = Store::spawn(publisher, shutdown_rx.clone());

        let ctx = WorkflowContext::new(api, store.dispatcher());
        let workflows = Workflows::spawn(ctx, &bus, shutdown_rx);
        let commands = CaseCommands::new(store.dispatcher());

        info!("===========================================");
        info!("  caseflow runtime started");
        info!("  Bus capacity: {}", config.bus_capacity);
        info!("  Listeners:    {}", workflows.len());
        info!("  Subscribers:  {}", bus.subscriber_count());
        info!("===========================================");

        Self {
            bus,
            store,
            commands,
            workflows,
            store_task,
            shutdown_tx,
        }
    }

    /// Entry points that dispatch into the store.
    #[must_use]
    pub fn commands(&self) -> &CaseCommands {
        &self.commands
    }

    #[must_use]
    pub fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub fn bus(&self) -> &Arc<InMemoryEventBus> {
        &self.bus
    }

    /// Subscribe to reduced events. Subscribe before dispatching to avoid
    /// missing the reply.
    #[must_use]
    pub fn subscribe(&self, filter: EventFilter) -> Subscription {
        self.bus.subscribe(filter)
    }

    /// Read the current state.
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        self.store.read(f)
    }

    /// Wait for the next event on `subscription`, up to `timeout`.
    pub async fn next_event(
        subscription: &mut Subscription,
        timeout: Duration,
    ) -> Option<StoreEvent> {
        tokio::time::timeout(timeout, subscription.recv())
            .await
            .ok()
            .flatten()
    }

    /// Signal shutdown and wait for the store and every listener to exit.
    pub async fn shutdown(self) {
        info!("[runtime] Initiating graceful shutdown...");
        let _ = self.shutdown_tx.send(true);

        self.workflows.join().await;
        if let Err(e) = self.store_task.await {
            error!(error = %e, "[runtime] Store task failed");
        }
        info!(
            events_reduced = self.store.events_reduced(),
            "[runtime] Shutdown complete"
        );
    }
}
