//! Retry behavior tests for retryable status codes.
//!
//! This module tests the 5xx retry policy:
//! - 500/502/503/504 responses are retried with exponential backoff
//! - A success after a retryable failure returns the decoded body
//! - Exhausted retries surface the last error response
//!
//! Backoff sleeps here are real: pausing the tokio clock makes the client's
//! request timeout auto-advance while the mock response is still in flight.
//! Total added wall-clock time stays under ten seconds.

mod common;

use common::*;
use serde_json::json;
use wiremock::matchers::{method, path};

#[tokio::test]
async fn test_retries_500_then_succeeds() {
    let mock_server = MockServer::start().await;
    let fixture = load_fixture("datasets/get_dataset.json");

    Mock::given(method("GET"))
        .and(path("/v1/datasets/my-dataset"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/datasets/my-dataset"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&fixture))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client_with_retries(&mock_server.uri());
    let dataset = client.get_dataset("my-dataset").await.unwrap();
    assert_eq!(dataset.id, "my-dataset");
}

#[tokio::test]
async fn test_retries_exhausted_surface_api_error() {
    let mock_server = MockServer::start().await;

    // Default policy is 3 retries, so 4 requests total.
    Mock::given(method("GET"))
        .and(path("/v1/datasets/my-dataset"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"error": "service unavailable"})),
        )
        .expect(4)
        .mount(&mock_server)
        .await;

    let client = test_client_with_retries(&mock_server.uri());
    let error = client.get_dataset("my-dataset").await.unwrap_err();
    match error {
        Error::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "service unavailable");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_retries_504_then_succeeds() {
    let mock_server = MockServer::start().await;
    let fixture = load_fixture("ingest/ingest_status.json");

    Mock::given(method("POST"))
        .and(path("/v1/datasets/my-dataset/ingest"))
        .respond_with(ResponseTemplate::new(504))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/datasets/my-dataset/ingest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&fixture))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client_with_retries(&mock_server.uri());
    let status = client
        .ingest_events("my-dataset", &[json!({"foo": "bar"})], None)
        .await
        .unwrap();
    assert_eq!(status.ingested, 2);
}

#[tokio::test]
async fn test_no_retries_when_disabled() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/datasets/my-dataset"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    // max_retries = 0: exactly one request.
    let client = test_client(&mock_server.uri());
    let error = client.get_dataset("my-dataset").await.unwrap_err();
    assert!(error.is_status(500));
}
