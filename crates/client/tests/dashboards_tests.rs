//! Dashboard endpoint tests.

mod common;

use axiom_client::models::DashboardCreateRequest;
use common::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};

#[tokio::test]
async fn test_get_dashboard() {
    let mock_server = MockServer::start().await;
    let fixture = load_fixture("dashboards/get_dashboard.json");

    Mock::given(method("GET"))
        .and(path("/v1/dashboards/buTFUddK4X5845Qwzv"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&fixture))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let dashboard = client.get_dashboard("buTFUddK4X5845Qwzv").await.unwrap();
    assert_eq!(dashboard.name, "Service Health");
    assert_eq!(dashboard.refresh_time, 30);
    assert_eq!(dashboard.version.as_deref(), Some("4"));
}

#[tokio::test]
async fn test_list_dashboards() {
    let mock_server = MockServer::start().await;
    let fixture = json!([load_fixture("dashboards/get_dashboard.json")]);

    Mock::given(method("GET"))
        .and(path("/v1/dashboards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&fixture))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let dashboards = client.list_dashboards().await.unwrap();
    assert_eq!(dashboards.len(), 1);
}

#[tokio::test]
async fn test_create_dashboard_sends_camel_case_body() {
    let mock_server = MockServer::start().await;
    let fixture = load_fixture("dashboards/get_dashboard.json");

    Mock::given(method("POST"))
        .and(path("/v1/dashboards"))
        .and(body_partial_json(json!({
            "name": "Service Health",
            "refreshTime": 30,
            "schemaVersion": 2,
            "timeWindowStart": "qr-now-30m",
            "timeWindowEnd": "qr-now"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&fixture))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    let request = DashboardCreateRequest {
        name: "Service Health".to_string(),
        owner: "f83e245a-afdc-47ad-a765-4addd1994333".to_string(),
        refresh_time: 30,
        schema_version: 2,
        time_window_start: "qr-now-30m".to_string(),
        time_window_end: "qr-now".to_string(),
        charts: None,
        layout: None,
        description: None,
        datasets: Some(vec!["my-dataset".to_string()]),
    };
    let dashboard = client.create_dashboard(&request).await.unwrap();
    assert_eq!(dashboard.id, "buTFUddK4X5845Qwzv");
}

#[tokio::test]
async fn test_delete_dashboard() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/v1/dashboards/buTFUddK4X5845Qwzv"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server.uri());
    assert!(client.delete_dashboard("buTFUddK4X5845Qwzv").await.is_ok());
}
