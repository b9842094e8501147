//! OpenAI-style chat completions upstream

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};
use shared::AdapterOutcome;

use crate::error::AdapterError;
use crate::services::http::{into_outcome, post_json, text_at};
use crate::traits::UpstreamAdapter;
use crate::types::AdapterConfig;

pub struct ChatCompletionAdapter {
    config: AdapterConfig,
}

impl ChatCompletionAdapter {
    pub const PLACEHOLDER: &'static str = "No response text found from OpenAI.";
    const MAX_TOKENS: u32 = 150;
    const TEMPERATURE: f32 = 0.7;

    pub fn new(config: AdapterConfig) -> Self {
        Self { config }
    }

    fn request_body(&self, query: &str) -> Value {
        json!({
            "model": self.config.model_or_default(),
            "messages": [
                {
                    "role": "user",
                    "content": query
                }
            ],
            "max_tokens": Self::MAX_TOKENS,
            "temperature": Self::TEMPERATURE
        })
    }

    async fn call(&self, query: &str, client: &reqwest::Client) -> Result<String, AdapterError> {
        let api_key = self.config.credential().ok_or_else(|| AdapterError::MissingCredential {
            service: self.config.kind.display_label().to_string(),
        })?;
        let authorization = format!("Bearer {api_key}");

        let response = post_json(
            client,
            &self.config.endpoint,
            &[("Authorization", authorization.as_str())],
            &self.request_body(query),
            self.config.timeout,
        )
        .await?;

        Ok(text_at(&response, "/choices/0/message/content").unwrap_or_else(|| Self::PLACEHOLDER.to_string()))
    }
}

#[async_trait]
impl UpstreamAdapter for ChatCompletionAdapter {
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
