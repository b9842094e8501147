//! HTTP plumbing shared by the JSON-over-POST adapters

use std::time::Duration;

use serde_json::Value;
use shared::AdapterOutcome;

use crate::error::AdapterError;

/// POST `body` to `endpoint` and return the parsed JSON object on 2xx
///
/// Non-2xx responses keep the raw body text for the failure message.
pub(crate) async fn post_json(
    client: &reqwest::Client,
    endpoint: &str,
    headers: &[(&str, &str)],
    body: &Value,
    timeout: Duration,
) -> Result<Value, AdapterError> {
    let mut request = client.post(endpoint).timeout(timeout).json(body);
    for (name, value) in headers {
        request = request.header(*name, *value);
    }

    let response = request.send().await?;
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| AdapterError::Transport(e.to_string()))?;

    if !status.is_success() {
        return Err(AdapterError::Status {
            status: status.as_u16(),
            body: text,
        });
    }

    let parsed: Value = serde_json::from_str(&text)
        .map_err(|e| AdapterError::Internal(format!("Failed to parse response: {e}")))?;
    if !parsed.is_object() {
        return Err(AdapterError::Internal("Response body is not a JSON object".to_string()));
    }
    Ok(parsed)
}

/// Text at a JSON pointer; `None` when absent or null
///
/// Non-string values are rendered as their JSON text.
pub(crate) fn text_at(body: &Value, pointer: &str) -> Option<String> {
    match body.pointer(pointer)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Fold an adapter call result into its outcome, logging the failure path
pub(crate) fn into_outcome(service: &str, result: Result<String, AdapterError>) -> AdapterOutcome {
    match result {
        Ok(text) => {
            shared::service_debug!(service, "Upstream call succeeded ({} chars)", text.len());
            AdapterOutcome::success(service, text)
        }
        Err(e) => {
            shared::service_warn!(service, kind = %e.kind(), "Upstream call failed: {}", e);
            e.into_outcome(service)
        }
    }
}
