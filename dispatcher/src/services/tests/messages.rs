//! Tests for MessagesAdapter

use serde_json::json;
use shared::{AdapterOutcome, FailureKind};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::fixtures::{expect_failure, mock_config};
use crate::services::MessagesAdapter;
use crate::traits::UpstreamAdapter;
use crate::types::AdapterKind;

const PATH: &str = "/v1/messages";

#[tokio::test]
async fn test_sends_version_header_and_reads_first_block() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PATH))
        .and(header("x-api-key", "test-key"))
        .and(header("anthropic-version", "2023-06-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "message",
            "content": [{"type": "text", "text": "bonjour"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let adapter = MessagesAdapter::new(mock_config(AdapterKind::Messages, &server, PATH));
    let outcome = adapter.invoke("hello in french", &reqwest::Client::new()).await;

    assert_eq!(outcome, AdapterOutcome::success("Anthropic_Messages", "bonjour"));
}

#[tokio::test]
async fn test_rate_limit_is_upstream_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let adapter = MessagesAdapter::new(mock_config(AdapterKind::Messages, &server, PATH));
    let (_, kind, message) = expect_failure(adapter.invoke("q", &reqwest::Client::new()).await);

    assert_eq!(kind, FailureKind::UpstreamHttpError);
    assert_eq!(message, "HTTP error 429: slow down");
}
