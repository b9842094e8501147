//! Core shared types: per-upstream outcomes and the aggregate wire format

use serde::{Deserialize, Serialize};
use std::fmt;

/// Service name reported when a failure cannot be attributed to an adapter
pub const UNKNOWN_SERVICE: &str = "Unknown";

/// Failure taxonomy for a single upstream invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureKind {
    /// Required credential absent; detected before any network attempt
    ConfigurationMissing,
    /// Upstream answered with a non-success status
    UpstreamHttpError,
    /// Transport-level failure, including timeouts
    NetworkError,
    /// Unexpected fault while building the request or parsing the response
    InternalAdapterError,
    /// Fault that escaped an adapter and was caught at the join boundary
    UnhandledInternalError,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::ConfigurationMissing => write!(f, "configuration_missing"),
            FailureKind::UpstreamHttpError => write!(f, "upstream_http_error"),
            FailureKind::NetworkError => write!(f, "network_error"),
            FailureKind::InternalAdapterError => write!(f, "internal_adapter_error"),
            FailureKind::UnhandledInternalError => write!(f, "unhandled_internal_error"),
        }
    }
}

/// Result of invoking one adapter for one query
///
/// Produced by exactly one task and consumed once by the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterOutcome {
    Success {
        service: String,
        result: String,
    },
    Failure {
        service: String,
        kind: FailureKind,
        message: String,
    },
}

impl AdapterOutcome {
    pub fn success(service: impl Into<String>, result: impl Into<String>) -> Self {
        Self::Success {
            service: service.into(),
            result: result.into(),
        }
    }

    pub fn failure(service: impl Into<String>, kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Failure {
            service: service.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn service(&self) -> &str {
        match self {
            AdapterOutcome::Success { service, .. } | AdapterOutcome::Failure { service, .. } => service,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AdapterOutcome::Success { .. })
    }

    /// Failure kind, if this outcome is a failure
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            AdapterOutcome::Success { .. } => None,
            AdapterOutcome::Failure { kind, .. } => Some(*kind),
        }
    }
}

/// Status field of a serialized service record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Success,
    Error,
}

/// One entry of the `ai_responses` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
    pub service: String,
    pub status: ServiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ServiceRecord {
    pub fn success(service: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            status: ServiceStatus::Success,
            result: Some(result.into()),
            message: None,
        }
    }

    pub fn error(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            status: ServiceStatus::Error,
            result: None,
            message: Some(message.into()),
        }
    }
}

/// Response body returned for one inbound query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResponse {
    pub ai_responses: Vec<ServiceRecord>,
}

impl AggregateResponse {
    /// Names of services that reported an error, in response order
    pub fn failed_services(&self) -> Vec<&str> {
        self.ai_responses
            .iter()
            .filter(|record| record.status == ServiceStatus::Error)
            .map(|record| record.service.as_str())
            .collect()
    }

    pub fn success_count(&self) -> usize {
        self.ai_responses
            .iter()
            .filter(|record| record.status == ServiceStatus::Success)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_record_omits_message() {
        let record = ServiceRecord::success("AI_Service_A", "hello");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(
            value,
            json!({"service": "AI_Service_A", "status": "success", "result": "hello"})
        );
    }

    #[test]
    fn test_error_record_omits_result() {
        let record = ServiceRecord::error("AI_Service_B", "HTTP error 500: server error");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(
            value,
            json!({"service": "AI_Service_B", "status": "error", "message": "HTTP error 500: server error"})
        );
    }

    #[test]
    fn test_outcome_accessors() {
        let ok = AdapterOutcome::success("a", "text");
        let failed = AdapterOutcome::failure("b", FailureKind::NetworkError, "refused");

        assert!(ok.is_success());
        assert_eq!(ok.failure_kind(), None);
        assert_eq!(failed.service(), "b");
        assert_eq!(failed.failure_kind(), Some(FailureKind::NetworkError));
    }

    #[test]
    fn test_failed_services_keeps_order() {
        let response = AggregateResponse {
            ai_responses: vec![
                ServiceRecord::error("first", "x"),
                ServiceRecord::success("second", "y"),
                ServiceRecord::error("third", "z"),
            ],
        };

        assert_eq!(response.failed_services(), vec!["first", "third"]);
        assert_eq!(response.success_count(), 1);
    }
}
