//! Shared handler state

use std::sync::Arc;
use std::time::Instant;

use crate::traits::QueryDispatcher;

/// State handed to every handler
pub struct AppState<D: QueryDispatcher> {
    pub dispatcher: Arc<D>,
    pub started_at: Instant,
}

impl<D: QueryDispatcher> AppState<D> {
    pub fn new(dispatcher: D) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            started_at: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

// Derived Clone would require `D: Clone`
impl<D: QueryDispatcher> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
            started_at: self.started_at,
        }
    }
}
