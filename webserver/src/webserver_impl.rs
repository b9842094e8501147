//! Main webserver implementation
//!
//! Wires the dispatch service into an axum router and serves it until a
//! shutdown signal arrives.

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::cors::OriginPolicy;
use crate::error::{WebServerError, WebServerResult};
use crate::state::AppState;
use crate::traits::QueryDispatcher;
use crate::web::handlers::{health, query_ais, root};

/// Main webserver struct with dependency injection
pub struct WebServer<D: QueryDispatcher> {
    state: AppState<D>,
    origins: OriginPolicy,
}

impl<D> WebServer<D>
where
    D: QueryDispatcher + 'static,
{
    pub fn new(dispatcher: D, origins: OriginPolicy) -> Self {
        Self {
            state: AppState::new(dispatcher),
            origins,
        }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/query_ais", post(query_ais::<D>))
            .route("/", get(root))
            .route("/health", get(health::<D>))
            .layer(TraceLayer::new_for_http())
            .layer(self.origins.layer())
            .with_state(self.state.clone())
    }

    /// Bind `addr` and serve until `shutdown` resolves
    pub async fn run<F>(&self, addr: SocketAddr, shutdown: F) -> WebServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr).await.map_err(|e| WebServerError::ServerStartup {
            address: addr.to_string(),
            message: e.to_string(),
        })?;
        self.serve(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> WebServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        info!(
            "🌐 Gateway listening on http://{} with {} adapters",
            local_addr,
            self.state.dispatcher.adapter_count()
        );

        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}
