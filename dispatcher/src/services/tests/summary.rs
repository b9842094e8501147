//! Tests for SummaryAdapter

use serde_json::json;
use shared::{AdapterOutcome, FailureKind};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::fixtures::{expect_failure, mock_config};
use crate::services::SummaryAdapter;
use crate::traits::UpstreamAdapter;
use crate::types::AdapterKind;

const PATH: &str = "/ai_b/v2/process";

#[tokio::test]
async fn test_sends_document_with_api_key_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PATH))
        .and(header("X-API-Key", "test-key"))
        .and(body_json(json!({
            "document": "long article",
            "parameters": {"strategy": "default"}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"summary": "short"})))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = SummaryAdapter::new(mock_config(AdapterKind::Summary, &server, PATH));
    let outcome = adapter.invoke("long article", &reqwest::Client::new()).await;

    assert_eq!(outcome, AdapterOutcome::success("AI_Service_B", "short"));
}

#[tokio::test]
async fn test_missing_summary_yields_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "done"})))
        .mount(&server)
        .await;

    let adapter = SummaryAdapter::new(mock_config(AdapterKind::Summary, &server, PATH));
    let outcome = adapter.invoke("q", &reqwest::Client::new()).await;

    assert_eq!(
        outcome,
        AdapterOutcome::success("AI_Service_B", "No summary found from Service B.")
    );
}

#[tokio::test]
async fn test_empty_key_counts_as_missing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let config = mock_config(AdapterKind::Summary, &server, PATH).with_api_key("");
    let outcome = SummaryAdapter::new(config).invoke("q", &reqwest::Client::new()).await;

    assert_eq!(outcome.failure_kind(), Some(FailureKind::ConfigurationMissing));
}

#[tokio::test]
async fn test_non_object_body_is_internal_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["not", "an", "object"])))
        .mount(&server)
        .await;

    let adapter = SummaryAdapter::new(mock_config(AdapterKind::Summary, &server, PATH));
    let (service, kind, _) = expect_failure(adapter.invoke("q", &reqwest::Client::new()).await);

    assert_eq!(service, "AI_Service_B");
    assert_eq!(kind, FailureKind::InternalAdapterError);
}
