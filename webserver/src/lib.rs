//! Webserver library for the AI fan-out gateway
//!
//! HTTP shell around the dispatcher: request validation, the `/query_ais`
//! fan-out endpoint, liveness routes and the cross-origin policy.

pub mod cors;
pub mod error;
pub mod state;
pub mod traits;
pub mod types;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use cors::OriginPolicy;
pub use error::{WebServerError, WebServerResult};
pub use state::AppState;
pub use traits::QueryDispatcher;
pub use types::*;
pub use webserver_impl::WebServer;
