//! Dispatcher core: fan-out and aggregation

pub mod aggregator;
pub mod orchestrator;

pub use aggregator::{aggregate, to_record};
pub use orchestrator::Orchestrator;
