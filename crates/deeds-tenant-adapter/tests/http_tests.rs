/*
[INPUT]:  Mock HTTP responses
[OUTPUT]: Test results for the remote call adapter
[POS]:    Integration tests - HTTP outcome classification
[UPDATE]: When status handling or error key extraction changes
*/

mod common;

use common::{mock_client, setup_mock_server};
use deeds_tenant_adapter::{
    ClientConfig, RemoteBody, RemoteResponse, TenantClient, TenantError,
};
use reqwest::Method;
use serde_json::json;
use tokio_test::assert_ok;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_client_creation() {
    let _client = assert_ok!(TenantClient::new("https://hub.example.com"));
}

#[test]
fn test_client_with_config() {
    let config = ClientConfig {
        session_cookie: Some("JSESSIONID=abc".to_string()),
        ..ClientConfig::default()
    };
    let _client = assert_ok!(TenantClient::with_config(config, "https://hub.example.com"));
}

#[test]
fn test_client_rejects_invalid_origin() {
    let err = TenantClient::new("not a url").unwrap_err();
    assert!(matches!(err, TenantError::UrlParse(_)));
}

#[tokio::test]
async fn test_call_success_json() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/hub"))
        .and(body_json(json!({"signedMessage": "SIGNED_MESSAGE@0x01"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"connected": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let body = json!({"signedMessage": "SIGNED_MESSAGE@0x01"});
    let response = assert_ok!(client.call(Method::POST, "/hub", Some(&body)).await);

    assert_eq!(
        response,
        RemoteResponse::Found(RemoteBody::Json(json!({"connected": true})))
    );
}

#[tokio::test]
async fn test_call_success_without_body() {
    let server = setup_mock_server().await;
    Mock::given(method("DELETE"))
        .and(path("/hub"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let response = assert_ok!(client.call(Method::DELETE, "hub", None).await);

    assert_eq!(response, RemoteResponse::Found(RemoteBody::Empty));
}

#[tokio::test]
async fn test_call_not_found_is_empty() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/reports/3"))
        .respond_with(ResponseTemplate::new(404).set_body_string("tenant.notFound"))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let response = assert_ok!(client.call(Method::GET, "reports/3", None).await);

    assert!(response.is_not_found());
    assert_eq!(response.into_json(), None);
}

#[tokio::test]
async fn test_call_bad_request_json_body() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/hub"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "tenant.notFound"})))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.call(Method::GET, "hub", None).await.unwrap_err();

    match err {
        TenantError::Remote { key } => assert_eq!(key, "tenant.notFound"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_call_bad_request_text_body() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/hub"))
        .respond_with(ResponseTemplate::new(400).set_body_string("tenant.notFound: detail"))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.call(Method::GET, "hub", None).await.unwrap_err();

    assert_eq!(err.message_key(), Some("tenant.notFound"));
}

#[tokio::test]
async fn test_call_json_message_kept_whole() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/hub"))
        .respond_with(
            ResponseTemplate::new(503).set_body_json(json!({"message": "wom.unavailable: timeout"})),
        )
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.call(Method::GET, "hub", None).await.unwrap_err();

    assert_eq!(err.message_key(), Some("wom.unavailable: timeout"));
}

#[tokio::test]
async fn test_call_server_error_is_generic() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/hub"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "tenant.notFound"})))
        .mount(&server)
        .await;

    let client = mock_client(&server);
    let err = client.call(Method::GET, "hub", None).await.unwrap_err();

    assert!(matches!(err, TenantError::GenericRemote));
    assert_eq!(err.message_key(), Some("wom.errorResponse"));
}

#[tokio::test]
async fn test_call_transport_failure() {
    // Nothing listens on the discard port
    let client = TenantClient::with_config_and_base_urls(
        ClientConfig::default(),
        "http://127.0.0.1:9",
        "http://127.0.0.1:9",
    )
    .expect("client init");

    let err = client.call(Method::GET, "hub", None).await.unwrap_err();

    assert!(matches!(err, TenantError::Transport(_)));
    assert_eq!(err.message_key(), None);
}
