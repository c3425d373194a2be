use serde_json::{json, Value};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use assert_matches::assert_matches;
use shared_api::ApiClient;
use shared_models::AppError;
use shared_utils::test_utils::{MockApiResponses, TestConfig};

fn client_for(mock_server: &MockServer) -> ApiClient {
    ApiClient::new(&TestConfig::with_base_url(&mock_server.uri()).to_app_config())
}

#[tokio::test]
async fn test_requests_carry_api_key_tenant_and_bearer_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .and(header("x-api-key", "test-api-key"))
        .and(header("x-tenant", "clinic-demo"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(MockApiResponses::success(json!("pong"))),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let answer: String = client.get_data("/ping", Some("test-token")).await.unwrap();
    assert_eq!(answer, "pong");
}

#[tokio::test]
async fn test_conflict_status_maps_to_conflict_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resource"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(MockApiResponses::failure("slot already taken")),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result: Result<Value, AppError> = client.get_data("/resource", Some("test-token")).await;

    assert_matches!(result, Err(AppError::Conflict(message)) => {
        assert_eq!(message, "slot already taken");
    });
}

#[tokio::test]
async fn test_not_found_status_maps_to_not_found_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resource"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(MockApiResponses::failure("no such resource")),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result: Result<Value, AppError> = client.get_data("/resource", Some("test-token")).await;

    assert_matches!(result, Err(AppError::NotFound(message)) => {
        assert_eq!(message, "no such resource");
    });
}

#[tokio::test]
async fn test_server_error_keeps_its_status_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resource"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(MockApiResponses::failure("internal error")),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result: Result<Value, AppError> = client.get_data("/resource", Some("test-token")).await;

    assert_matches!(result, Err(AppError::Api { status: 500, message }) => {
        assert_eq!(message, "internal error");
    });
}

#[tokio::test]
async fn test_non_envelope_error_body_falls_back_to_raw_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/resource"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result: Result<Value, AppError> = client.get_data("/resource", Some("test-token")).await;

    assert_matches!(result, Err(AppError::Api { status: 502, message }) => {
        assert_eq!(message, "bad gateway");
    });
}

#[tokio::test]
async fn test_failure_envelope_reports_the_actual_response_status() {
    let mock_server = MockServer::start().await;

    // 2xx on the wire, logical failure in the envelope.
    Mock::given(method("POST"))
        .and(path("/resource"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(MockApiResponses::failure("rejected")),
        )
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let result: Result<Value, AppError> = client
        .post_data("/resource", Some("test-token"), json!({}))
        .await;

    assert_matches!(result, Err(AppError::Api { status: 201, message }) => {
        assert_eq!(message, "rejected");
    });
}

#[tokio::test]
async fn test_invalid_token_is_rejected_before_sending() {
    let mock_server = MockServer::start().await;

    let client = client_for(&mock_server);
    let result: Result<Value, AppError> = client.get_data("/ping", Some("bad\ntoken")).await;

    assert_matches!(result, Err(AppError::Validation(_)));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}
