//! Request and response bodies for the HTTP surface

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{WebServerError, WebServerResult};

pub const MISSING_QUERY: &str = "'query' field is required in the request body.";

pub const ROOT_MESSAGE: &str = "AI fan-out gateway is running! Send POST requests to /query_ais.";

/// Body of `GET /`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
}

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub adapters: usize,
    pub uptime_seconds: u64,
    pub version: String,
}

/// Extract the `query` string from a raw `/query_ais` body
///
/// The body must be a JSON object whose `query` member is a non-empty string.
pub fn parse_query(body: &[u8]) -> WebServerResult<String> {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        WebServerError::bad_request(format!(
            "Invalid JSON request body or missing 'query' field. Error: {e}"
        ))
    })?;

    let Value::Object(mut fields) = value else {
        return Err(WebServerError::bad_request(
            "Invalid JSON request body or missing 'query' field. Error: expected a JSON object",
        ));
    };

    match fields.remove("query") {
        Some(Value::String(query)) if !query.is_empty() => Ok(query),
        _ => Err(WebServerError::bad_request(MISSING_QUERY)),
    }
}
