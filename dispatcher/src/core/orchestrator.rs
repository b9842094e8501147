//! Fan-out orchestrator
//!
//! Sends one query to every configured adapter at once and waits for all of
//! them to settle. Each adapter runs in its own tokio task, so a panic, a hang
//! or an error in one adapter never reaches its siblings. Outcomes come back
//! in adapter configuration order regardless of completion order.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use shared::{AdapterOutcome, FailureKind, UNKNOWN_SERVICE};
use tokio::task::{self, JoinError, JoinSet};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::GatewayConfig;
use crate::error::DispatcherResult;
use crate::services::build_adapter;
use crate::traits::UpstreamAdapter;

/// Idle pooled connections are dropped after this long
const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

pub struct Orchestrator {
    client: reqwest::Client,
    adapters: Vec<Arc<dyn UpstreamAdapter>>,
}

impl Orchestrator {
    /// Create an orchestrator around an existing client and adapter list
    pub fn new(client: reqwest::Client, adapters: Vec<Arc<dyn UpstreamAdapter>>) -> Self {
        Self { client, adapters }
    }

    /// Build the shared connection pool and one adapter per configured upstream
    pub fn from_config(config: &GatewayConfig) -> DispatcherResult<Self> {
        let client = reqwest::Client::builder()
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        let adapters = config.adapters.iter().cloned().map(build_adapter).collect();
        Ok(Self::new(client, adapters))
    }

    pub fn adapters(&self) -> &[Arc<dyn UpstreamAdapter>] {
        &self.adapters
    }

    /// Service names in dispatch order
    pub fn service_names(&self) -> Vec<&str> {
        self.adapters.iter().map(|a| a.service_name()).collect()
    }

    /// Invoke every adapter concurrently and collect one outcome per adapter
    ///
    /// The returned vector is index-aligned with [`Orchestrator::adapters`].
    pub async fn dispatch(&self, query: &str) -> Vec<AdapterOutcome> {
        let dispatch_id = Uuid::new_v4();
        let started = Instant::now();
        let query: Arc<str> = Arc::from(query);

        debug!(%dispatch_id, adapters = self.adapters.len(), "Dispatching query");

        // Dropping the set aborts any adapter still running
        let mut join_set = JoinSet::new();
        let mut slot_of: HashMap<task::Id, usize> = HashMap::with_capacity(self.adapters.len());

        for (slot, adapter) in self.adapters.iter().enumerate() {
            let adapter = Arc::clone(adapter);
            let client = self.client.clone();
            let query = Arc::clone(&query);
            let handle = join_set.spawn(async move {
                let outcome = invoke_bounded(adapter.as_ref(), &query, &client).await;
                (slot, outcome)
            });
            slot_of.insert(handle.id(), slot);
        }

        let mut slots: Vec<Option<AdapterOutcome>> = (0..self.adapters.len()).map(|_| None).collect();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((slot, outcome)) => slots[slot] = Some(outcome),
                Err(err) => {
                    if let Some(&slot) = slot_of.get(&err.id()) {
                        slots[slot] = Some(unhandled(dispatch_id, err));
                    }
                }
            }
        }

        let outcomes: Vec<AdapterOutcome> = slots
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| lost_task(dispatch_id)))
            .collect();

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        info!(
            %dispatch_id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            succeeded,
            failed = outcomes.len() - succeeded,
            "Dispatch settled"
        );

        outcomes
    }
}

/// Run one adapter under its own deadline
async fn invoke_bounded(adapter: &dyn UpstreamAdapter, query: &str, client: &reqwest::Client) -> AdapterOutcome {
    let limit = adapter.timeout();
    match tokio::time::timeout(limit, adapter.invoke(query, client)).await {
        Ok(outcome) => outcome,
        Err(_) => {
            shared::service_warn!(adapter.service_name(), "No response within {:?}", limit);
            AdapterOutcome::failure(
                adapter.service_name(),
                FailureKind::NetworkError,
                format!("Network/Request error: no response within {:.1}s", limit.as_secs_f64()),
            )
        }
    }
}

/// Convert a task that panicked or was cancelled into a failure record
fn unhandled(dispatch_id: Uuid, err: JoinError) -> AdapterOutcome {
    let detail = if err.is_panic() {
        panic_message(err.into_panic())
    } else {
        err.to_string()
    };
    warn!(%dispatch_id, "Adapter task terminated abnormally: {}", detail);

    AdapterOutcome::failure(
        UNKNOWN_SERVICE,
        FailureKind::UnhandledInternalError,
        format!("An unexpected internal error occurred: {detail}"),
    )
}

/// Outcome for a slot whose task never reported back
fn lost_task(dispatch_id: Uuid) -> AdapterOutcome {
    warn!(%dispatch_id, "Adapter task ended without an outcome");
    AdapterOutcome::failure(
        UNKNOWN_SERVICE,
        FailureKind::UnhandledInternalError,
        "An unexpected internal error occurred: adapter task was lost",
    )
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "adapter panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::tests::fixtures::StubAdapter;
    use crate::types::{AdapterConfig, AdapterKind};

    fn orchestrator(adapters: Vec<Arc<dyn UpstreamAdapter>>) -> Orchestrator {
        Orchestrator::new(reqwest::Client::new(), adapters)
    }

    #[tokio::test]
    async fn test_outcomes_follow_configuration_order() {
        // The second adapter finishes well before the first
        let slow = StubAdapter::replying("first", "slow").with_delay(Duration::from_millis(200));
        let fast = StubAdapter::replying("second", "fast").with_delay(Duration::from_millis(10));
        let orchestrator = orchestrator(vec![slow.into_arc(), fast.into_arc()]);

        let outcomes = orchestrator.dispatch("question").await;

        assert_eq!(
            outcomes,
            vec![
                AdapterOutcome::success("first", "slow"),
                AdapterOutcome::success("second", "fast"),
            ]
        );
    }

    #[tokio::test]
    async fn test_panicking_adapter_is_isolated_in_either_position() {
        for panic_first in [true, false] {
            let panicking = StubAdapter::panicking("broken", "boom").into_arc();
            let healthy = StubAdapter::replying("healthy", "ok").into_arc();
            let adapters = if panic_first {
                vec![panicking, healthy]
            } else {
                vec![healthy, panicking]
            };

            let outcomes = orchestrator(adapters).dispatch("question").await;
            let (failed, succeeded) = if panic_first {
                (&outcomes[0], &outcomes[1])
            } else {
                (&outcomes[1], &outcomes[0])
            };

            assert_eq!(outcomes.len(), 2);
            assert_eq!(succeeded, &AdapterOutcome::success("healthy", "ok"));
            match failed {
                AdapterOutcome::Failure { service, kind, message } => {
                    assert_eq!(service, UNKNOWN_SERVICE);
                    assert_eq!(*kind, FailureKind::UnhandledInternalError);
                    assert!(message.contains("boom"), "message was {message}");
                }
                other => panic!("expected failure, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_hanging_adapter_times_out_alone_in_either_position() {
        for hang_first in [true, false] {
            let hanging = StubAdapter::hanging("stuck").with_timeout(Duration::from_millis(100)).into_arc();
            let healthy = StubAdapter::replying("healthy", "ok").into_arc();
            let (adapters, stuck_at, healthy_at) = if hang_first {
                (vec![hanging, healthy], 0, 1)
            } else {
                (vec![healthy, hanging], 1, 0)
            };

            let started = Instant::now();
            let outcomes = orchestrator(adapters).dispatch("question").await;

            assert!(started.elapsed() < Duration::from_secs(2));
            assert_eq!(outcomes.len(), 2);
            assert_eq!(outcomes[stuck_at].service(), "stuck");
            assert_eq!(outcomes[stuck_at].failure_kind(), Some(FailureKind::NetworkError));
            assert_eq!(outcomes[healthy_at], AdapterOutcome::success("healthy", "ok"));
        }
    }

    #[tokio::test]
    async fn test_dropped_dispatch_aborts_running_adapters() {
        let slow = StubAdapter::replying("slow", "late").with_delay(Duration::from_millis(300));
        let probe = slow.probe();
        let orchestrator = Arc::new(orchestrator(vec![slow.into_arc()]));

        let dispatching = {
            let orchestrator = Arc::clone(&orchestrator);
            tokio::spawn(async move { orchestrator.dispatch("question").await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        dispatching.abort();
        assert!(dispatching.await.unwrap_err().is_cancelled());

        // Only the orchestrator handle is left once the adapter task is gone
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(probe.queries(), vec!["question".to_string()]);
        assert_eq!(Arc::strong_count(&orchestrator.adapters()[0]), 1);
    }

    #[tokio::test]
    async fn test_adapters_run_in_parallel() {
        let first = StubAdapter::replying("first", "a").with_delay(Duration::from_secs(1));
        let second = StubAdapter::replying("second", "b").with_delay(Duration::from_secs(1));
        let orchestrator = orchestrator(vec![first.into_arc(), second.into_arc()]);

        let started = Instant::now();
        let outcomes = orchestrator.dispatch("question").await;
        let elapsed = started.elapsed();

        assert_eq!(outcomes.len(), 2);
        assert!(elapsed >= Duration::from_secs(1));
        assert!(elapsed < Duration::from_millis(1600), "took {elapsed:?}");
    }

    #[tokio::test]
    async fn test_every_adapter_sees_the_query_once() {
        let first = StubAdapter::replying("first", "a");
        let second = StubAdapter::failing("second", FailureKind::UpstreamHttpError, "HTTP error 500: x");
        let (first_probe, second_probe) = (first.probe(), second.probe());
        let orchestrator = orchestrator(vec![first.into_arc(), second.into_arc()]);

        let outcomes = orchestrator.dispatch("what is rust").await;

        assert_eq!(outcomes[1].failure_kind(), Some(FailureKind::UpstreamHttpError));
        for probe in [first_probe, second_probe] {
            assert_eq!(probe.queries(), vec!["what is rust".to_string()]);
        }
    }

    #[tokio::test]
    async fn test_no_adapters_yields_empty_result() {
        let outcomes = orchestrator(Vec::new()).dispatch("question").await;
        assert!(outcomes.is_empty());
    }

    #[test]
    fn test_from_config_keeps_adapter_order() {
        let config = GatewayConfig::new(vec![
            AdapterConfig::new(AdapterKind::Summary, "http://127.0.0.1:1/b"),
            AdapterConfig::new(AdapterKind::Completion, "http://127.0.0.1:1/a"),
        ]);

        let orchestrator = Orchestrator::from_config(&config).unwrap();

        assert_eq!(orchestrator.service_names(), vec!["AI_Service_B", "AI_Service_A"]);
    }
}
