//! Document summarisation upstream ("Service B")

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use shared::AdapterOutcome;

use crate::error::AdapterError;
use crate::services::http::{into_outcome, post_json, text_at};
use crate::traits::UpstreamAdapter;
use crate::types::AdapterConfig;

/// Summary adapter: `X-API-Key` auth, `document` body, result at `summary`
pub struct SummaryAdapter {
    config: AdapterConfig,
}

impl SummaryAdapter {
    pub const PLACEHOLDER: &'static str = "No summary found from Service B.";
    const STRATEGY: &'static str = "default";

    pub fn new(config: AdapterConfig) -> Self {
        Self { config }
    }

    fn request_body(&self, query: &str) -> Value {
        json!({
            "document": query,
            "parameters": { "strategy": Self::STRATEGY }
        })
    }

    async fn call(&self, query: &str, client: &reqwest::Client) -> Result<String, AdapterError> {
        let api_key = self.config.credential().ok_or_else(|| AdapterError::MissingCredential {
            service: self.config.kind.display_label().to_string(),
        })?;

        let response = post_json(
            client,
            &self.config.endpoint,
            &[("X-API-Key", api_key)],
            &self.request_body(query),
            self.config.timeout,
        )
        .await?;

        Ok(text_at(&response, "/summary").unwrap_or_else(|| Self::PLACEHOLDER.to_string()))
    }
}

#[async_trait]
impl UpstreamAdapter for SummaryAdapter {
    fn service_name(&self) -> &str {
        &self.config.service_name
    }

    fn timeout(&self) -> Duration {
        self.config.timeout
    }

    async fn invoke(&self, query: &str, client: &reqwest::Client) -> AdapterOutcome {
        into_outcome(&self.config.service_name, self.call(query, client).await)
    }
}
