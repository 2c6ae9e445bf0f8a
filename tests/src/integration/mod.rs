//! Cross-crate integration tests.

mod e2e_choreography;
mod flows;

#[cfg(test)]
pub(crate) mod harness {
    use std::sync::Arc;
    use std::time::Duration;

    use case_runtime::{CaseRuntime, RuntimeConfig};
    use cf_03_api_client::FixtureCaseApi;
    use shared_bus::{EventFilter, EventKind, StoreEvent, Subscription};

    pub const WAIT: Duration = Duration::from_secs(2);

    /// A runtime over a scripted backend the test keeps a handle to.
    pub struct Harness {
        pub api: Arc<FixtureCaseApi>,
        pub runtime: CaseRuntime,
    }

    impl Harness {
        pub fn start() -> Self {
            let api = Arc::new(FixtureCaseApi::new());
            let runtime = CaseRuntime::start(&RuntimeConfig::default(), api.clone());
            Self { api, runtime }
        }

        pub fn subscribe(&self, kinds: Vec<EventKind>) -> Subscription {
            self.runtime.subscribe(EventFilter::kinds(kinds))
        }
    }

    /// Next event, or panic after [`WAIT`].
    pub async fn expect_event(subscription: &mut Subscription) -> StoreEvent {
        CaseRuntime::next_event(subscription, WAIT)
            .await
            .expect("timeout waiting for event")
    }

    /// Assert nothing arrives within `quiet`.
    pub async fn expect_silence(subscription: &mut Subscription, quiet: Duration) {
        if let Some(event) = CaseRuntime::next_event(subscription, quiet).await {
            panic!("unexpected event: {event:?}");
        }
    }
}
