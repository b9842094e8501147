//! REST API handlers
//!
//! `POST /query_ais` fans one query out to every adapter; `GET /` and
//! `GET /health` report liveness.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use dispatcher::aggregate;
use shared::AggregateResponse;
use tracing::{info, warn};

use crate::error::WebServerResult;
use crate::state::AppState;
use crate::traits::QueryDispatcher;
use crate::types::{HealthResponse, ROOT_MESSAGE, RootResponse, parse_query};

/// Fan-out endpoint - /query_ais
///
/// The body is validated before anything is dispatched; a rejected body never
/// reaches an adapter.
pub async fn query_ais<D>(
    State(state): State<AppState<D>>,
    body: Bytes,
) -> WebServerResult<Json<AggregateResponse>>
where
    D: QueryDispatcher + 'static,
{
    let query = parse_query(&body).inspect_err(|e| warn!("⚠️ Rejected query request: {}", e))?;

    let response = aggregate(state.dispatcher.dispatch(&query).await);

    info!(
        services = response.ai_responses.len(),
        succeeded = response.success_count(),
        "📨 Query answered"
    );
    Ok(Json(response))
}

/// Readiness acknowledgment - /
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: ROOT_MESSAGE.to_string(),
    })
}

/// Health check - /health
pub async fn health<D>(State(state): State<AppState<D>>) -> Json<HealthResponse>
where
    D: QueryDispatcher + 'static,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        adapters: state.dispatcher.adapter_count(),
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
