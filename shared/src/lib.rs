//! Shared types for the AI fan-out gateway
//!
//! Contains the per-upstream outcome model, the aggregate wire format and the
//! logging helpers used by both the dispatcher core and the webserver shell.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use types::*;
