//! Service trait definitions for dependency injection
//!
//! The HTTP layer only sees the dispatch seam, so handlers can be tested
//! without any upstream.

use async_trait::async_trait;
use dispatcher::Orchestrator;
use shared::AdapterOutcome;

/// Fan-out dispatch service trait
#[mockall::automock]
#[async_trait]
pub trait QueryDispatcher: Send + Sync {
    /// Send `query` to every adapter and return one outcome per adapter, in order
    async fn dispatch(&self, query: &str) -> Vec<AdapterOutcome>;

    /// Number of configured adapters
    fn adapter_count(&self) -> usize;
}

#[async_trait]
impl QueryDispatcher for Orchestrator {
    async fn dispatch(&self, query: &str) -> Vec<AdapterOutcome> {
        Orchestrator::dispatch(self, query).await
    }

    fn adapter_count(&self) -> usize {
        self.adapters().len()
    }
}
