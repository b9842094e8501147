//! Dispatcher library for the AI fan-out gateway
//!
//! Holds the upstream adapters, the gateway configuration and the
//! orchestrator that sends one query to every adapter concurrently and
//! aggregates the settled outcomes into a single ordered response.

pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod traits;
pub mod types;

// Re-export main types
pub use config::GatewayConfig;
pub use core::{Orchestrator, aggregate, to_record};
pub use error::{AdapterError, DispatcherError, DispatcherResult};
pub use services::{
    ChatCompletionAdapter, CompletionAdapter, MessagesAdapter, SummaryAdapter, build_adapter,
};
pub use traits::UpstreamAdapter;
pub use types::{AdapterConfig, AdapterKind, DEFAULT_TIMEOUT};
