//! Dispatcher error types

use shared::{AdapterOutcome, FailureKind};
use thiserror::Error;

/// Result type for dispatcher setup operations
pub type DispatcherResult<T> = Result<T, DispatcherError>;

/// Errors raised while building the dispatcher; never raised per request
#[derive(Error, Debug)]
pub enum DispatcherError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("HTTP client construction failed: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl DispatcherError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError { message: message.into() }
    }
}

/// Failure of a single upstream call, before it is folded into an outcome
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("API Key for {service} not configured.")]
    MissingCredential { service: String },

    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Network/Request error: {0}")]
    Transport(String),

    #[error("An unexpected error occurred: {0}")]
    Internal(String),
}

impl AdapterError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AdapterError::MissingCredential { .. } => FailureKind::ConfigurationMissing,
            AdapterError::Status { .. } => FailureKind::UpstreamHttpError,
            AdapterError::Transport(_) => FailureKind::NetworkError,
            AdapterError::Internal(_) => FailureKind::InternalAdapterError,
        }
    }

    /// Fold this error into the failure outcome reported for `service`
    pub fn into_outcome(self, service: &str) -> AdapterOutcome {
        AdapterOutcome::failure(service, self.kind(), self.to_string())
    }
}

impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        // Builder errors happen before anything reaches the wire
        if err.is_builder() {
            AdapterError::Internal(err.to_string())
        } else {
            AdapterError::Transport(err.to_string())
        }
    }
}
