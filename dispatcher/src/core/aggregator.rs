//! Outcome aggregation
//!
//! Pure, order-preserving mapping from settled outcomes to the response body.

use shared::{AdapterOutcome, AggregateResponse, ServiceRecord, UNKNOWN_SERVICE};

/// Map outcomes, already in adapter configuration order, to the response body
pub fn aggregate(outcomes: Vec<AdapterOutcome>) -> AggregateResponse {
    AggregateResponse {
        ai_responses: outcomes.into_iter().map(to_record).collect(),
    }
}

/// Convert one outcome into its wire record
pub fn to_record(outcome: AdapterOutcome) -> ServiceRecord {
    match outcome {
        AdapterOutcome::Success { service, result } => ServiceRecord::success(named(service), result),
        AdapterOutcome::Failure { service, message, .. } => ServiceRecord::error(named(service), message),
    }
}

fn named(service: String) -> String {
    if service.trim().is_empty() {
        UNKNOWN_SERVICE.to_string()
    } else {
        service
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{FailureKind, ServiceStatus};

    #[test]
    fn test_aggregate_preserves_input_order() {
        let outcomes = vec![
            AdapterOutcome::failure("AI_Service_A", FailureKind::ConfigurationMissing, "API Key for Service A not configured."),
            AdapterOutcome::success("AI_Service_B", "summary text"),
            AdapterOutcome::failure("Unknown", FailureKind::UnhandledInternalError, "An unexpected internal error occurred: boom"),
        ];

        let response = aggregate(outcomes);
        let services: Vec<&str> = response.ai_responses.iter().map(|r| r.service.as_str()).collect();

        assert_eq!(services, vec!["AI_Service_A", "AI_Service_B", "Unknown"]);
        assert_eq!(response.ai_responses[0].status, ServiceStatus::Error);
        assert_eq!(response.ai_responses[1].result.as_deref(), Some("summary text"));
        assert_eq!(response.ai_responses[1].message, None);
    }

    #[test]
    fn test_blank_service_name_is_reported_as_unknown() {
        let record = to_record(AdapterOutcome::success("  ", "text"));
        assert_eq!(record.service, UNKNOWN_SERVICE);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(Vec::new()).ai_responses.is_empty());
    }
}
