//! Upstream adapter contract

use std::time::Duration;

use async_trait::async_trait;
use shared::AdapterOutcome;

/// One provider-specific upstream
///
/// Implementations own their request shape, auth scheme and result
/// extraction. `invoke` never fails: every fault it can anticipate comes back
/// as an [`AdapterOutcome::Failure`].
#[async_trait]
pub trait UpstreamAdapter: Send + Sync {
    /// Name reported in the aggregate response
    fn service_name(&self) -> &str;

    /// Upper bound for a single invocation
    fn timeout(&self) -> Duration;

    /// Send `query` upstream through the shared connection pool
    async fn invoke(&self, query: &str, client: &reqwest::Client) -> AdapterOutcome;
}
