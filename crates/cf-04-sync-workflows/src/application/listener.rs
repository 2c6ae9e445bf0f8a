//! # Listeners
//!
//! One listener task per [`WorkflowKind`] plus the fetch executor. Each
//! listener owns its own subscription, so a slow workflow never delays
//! another kind. Load kinds run inline in their listener; kinds that await
//! the backend run in a spawned task that the next trigger aborts.

use std::sync::Arc;

use cf_02_entity_store::Dispatcher;
use cf_03_api_client::CaseApi;
use shared_bus::{EventFilter, EventTopic, InMemoryEventBus, StoreEvent, Subscription};
use tokio::sync::watch;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::{fetch, workers};
use crate::domain::errors::WorkflowError;
use crate::domain::workflow::WorkflowKind;

/// What a worker needs: the backend and a way back into the store.
#[derive(Clone)]
pub struct WorkflowContext {
    pub api: Arc<dyn CaseApi>,
    dispatcher: Dispatcher,
}

impl WorkflowContext {
    #[must_use]
    pub fn new(api: Arc<dyn CaseApi>, dispatcher: Dispatcher) -> Self {
        Self { api, dispatcher }
    }

    /// Dispatch into the store.
    ///
    /// # Errors
    ///
    /// [`WorkflowError::Store`] once the store has stopped.
    pub fn dispatch(&self, event: StoreEvent) -> Result<(), WorkflowError> {
        self.dispatcher.dispatch(event).map_err(WorkflowError::from)
    }
}

/// Handles of every running listener.
pub struct Workflows {
    handles: Vec<JoinHandle<()>>,
}

impl Workflows {
    /// Subscribe every listener to `bus` and start them.
    ///
    /// Subscriptions are in place when this returns, so events dispatched
    /// afterwards are never missed.
    #[must_use]
    pub fn spawn(
        ctx: WorkflowContext,
        bus: &InMemoryEventBus,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        let mut handles = Vec::with_capacity(WorkflowKind::ALL.len() + 1);

        let fetches = bus.subscribe(EventFilter::topics(vec![EventTopic::Fetch]));
        handles.push(tokio::spawn(run_fetch_executor(
            fetches,
            ctx.clone(),
            shutdown.clone(),
        )));

        for kind in WorkflowKind::ALL {
            let subscription = bus.subscribe(EventFilter::kinds(vec![kind.trigger()]));
            handles.push(tokio::spawn(run_listener(
                kind,
                subscription,
                ctx.clone(),
                shutdown.clone(),
            )));
        }

        info!(listeners = handles.len(), "[cf-04] Workflows started");
        Self { handles }
    }

    /// Number of listener tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait for every listener to exit.
    pub async fn join(self) {
        for handle in self.handles {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    error!(error = %e, "[cf-04] Listener task panicked");
                }
            }
        }
    }

    /// Stop every listener immediately.
    pub fn abort(&self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

async fn run_listener(
    kind: WorkflowKind,
    mut subscription: Subscription,
    ctx: WorkflowContext,
    mut shutdown: watch::Receiver<bool>,
) {
    debug!(?kind, "[cf-04] Listener started");
    let mut in_flight: Option<JoinHandle<()>> = None;

    loop {
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            event = subscription.recv() => {
                let Some(event) = event else {
                    break;
                };
                if !kind.suspends() {
                    // Never awaits, so it completes before the next trigger.
                    let run_id = Uuid::new_v4();
                    debug!(%run_id, ?kind, "[cf-04] Workflow run started");
                    report(kind, run_id, workers::run(kind, event, &ctx).await);
                    continue;
                }
                if let Some(previous) = in_flight.take() {
                    if !previous.is_finished() {
                        previous.abort();
                        debug!(?kind, "[cf-04] Previous run superseded");
                    }
                }
                let ctx = ctx.clone();
                in_flight = Some(tokio::spawn(async move {
                    let run_id = Uuid::new_v4();
                    debug!(%run_id, ?kind, "[cf-04] Workflow run started");
                    let outcome = workers::run(kind, event, &ctx).await;
                    report(kind, run_id, outcome);
                }));
            }
        }
    }

    if let Some(handle) = in_flight {
        handle.abort();
    }
    debug!(?kind, "[cf-04] Listener stopped");
}

async fn run_fetch_executor(
    mut subscription: Subscription,
    ctx: WorkflowContext,
    mut shutdown: watch::Receiver<bool>,
) {
    debug!("[cf-04] Fetch executor started");
    let mut tasks = JoinSet::new();

    loop {
        tokio::select! {
            biased;
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            event = subscription.recv() => {
                let Some(event) = event else {
                    break;
                };
                let StoreEvent::FetchRequested(request) = event else {
                    continue;
                };
                let ctx = ctx.clone();
                tasks.spawn(async move {
                    let resource = request.resource();
                    if let Err(e) = fetch::execute(request, &ctx).await {
                        debug!(?resource, error = %e, "[cf-04] Fetch result not recorded");
                    }
                });
            }
        }
    }

    tasks.abort_all();
    debug!("[cf-04] Fetch executor stopped");
}

fn report(kind: WorkflowKind, run_id: Uuid, outcome: Result<(), WorkflowError>) {
    match outcome {
        Ok(()) => debug!(%run_id, ?kind, "[cf-04] Workflow run finished"),
        Err(WorkflowError::Api(failure)) => {
            warn!(%run_id, ?kind, error = %failure, "[cf-04] Workflow stopped: backend call failed");
        }
        Err(e @ (WorkflowError::Normalize(_) | WorkflowError::UnexpectedBody { .. })) => {
            error!(%run_id, ?kind, error = %e, "[cf-04] Workflow stopped: malformed response");
        }
        Err(WorkflowError::Store(e)) => {
            debug!(%run_id, ?kind, error = %e, "[cf-04] Workflow stopped: store closed");
        }
    }
}
