mod support;

use std::sync::Arc;

use mockito::{Matcher, Server};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde_json::json;
use studio_client::{ApiError, RequestOptions, ResponseBody, TokenStore};

use support::{api_client, closed_url};

#[tokio::test]
async fn bearer_header_is_attached_when_token_present() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/agents/list")
        .match_header("authorization", "Bearer token-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([{"id": "a1"}]).to_string())
        .create_async()
        .await;

    let store = Arc::new(TokenStore::in_memory());
    store.set_token("token-1", false).expect("store token");
    let api = api_client(&server.url(), store);

    let response = api.get("/agents/list").await.expect("request ok");
    assert_eq!(response.status, 200);
    assert_eq!(response.data, ResponseBody::Json(json!([{"id": "a1"}])));
    mock.assert_async().await;
}

#[tokio::test]
async fn no_authorization_header_without_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/health")
        .match_header("authorization", Matcher::Missing)
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let api = api_client(&server.url(), Arc::new(TokenStore::in_memory()));
    let response = api.get("/health").await.expect("request ok");
    assert_eq!(response.data, ResponseBody::Text("ok".to_string()));
    mock.assert_async().await;
}

#[tokio::test]
async fn post_serializes_body_as_json() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/agents/create")
        .match_body(Matcher::Json(json!({"name": "ecs-helper", "tags": ["aws"]})))
        .with_status(201)
        .with_header("content-type", "application/json; charset=utf-8")
        .with_body(json!({"id": "agent-7"}).to_string())
        .create_async()
        .await;

    let api = api_client(&server.url(), Arc::new(TokenStore::in_memory()));
    let response = api
        .post(
            "/agents/create",
            Some(&json!({"name": "ecs-helper", "tags": ["aws"]})),
        )
        .await
        .expect("request ok");

    assert_eq!(response.status, 201);
    let created: serde_json::Value = response.json().expect("json");
    assert_eq!(created["id"], "agent-7");
    mock.assert_async().await;
}

#[tokio::test]
async fn body_is_dropped_for_methods_without_payload() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/agents/a1")
        .match_body(Matcher::Exact(String::new()))
        .with_status(204)
        .create_async()
        .await;

    let api = api_client(&server.url(), Arc::new(TokenStore::in_memory()));
    let response = api
        .request(
            "delete",
            "/agents/a1",
            Some(json!({"ignored": true})),
            RequestOptions::default(),
        )
        .await
        .expect("request ok");
    assert_eq!(response.status, 204);
    mock.assert_async().await;
}

#[tokio::test]
async fn header_overrides_replace_defaults() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/notes/1")
        .match_header("content-type", "text/plain")
        .with_status(200)
        .with_body("saved")
        .create_async()
        .await;

    let api = api_client(&server.url(), Arc::new(TokenStore::in_memory()));
    let options =
        RequestOptions::default().with_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    api.request("PUT", "/notes/1", Some(json!("hello")), options)
        .await
        .expect("request ok");
    mock.assert_async().await;
}

#[tokio::test]
async fn json_error_field_becomes_message() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/templates/missing")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(json!({"error": "Template not found"}).to_string())
        .create_async()
        .await;

    let api = api_client(&server.url(), Arc::new(TokenStore::in_memory()));
    let err = api.get("/templates/missing").await.unwrap_err();
    assert_eq!(err.status(), 404);
    assert_eq!(err.to_string(), "Template not found");
}

#[tokio::test]
async fn text_error_body_becomes_message() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/stats")
        .with_status(502)
        .with_header("content-type", "text/html")
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let api = api_client(&server.url(), Arc::new(TokenStore::in_memory()));
    let err = api.get("/stats").await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Http { status: 502, ref message } if message == "Bad Gateway"
    ));
}

#[tokio::test]
async fn empty_error_body_uses_fallback_message() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/config")
        .with_status(500)
        .create_async()
        .await;

    let api = api_client(&server.url(), Arc::new(TokenStore::in_memory()));
    let err = api.get("/config").await.unwrap_err();
    assert_eq!(err.status(), 500);
    assert_eq!(err.to_string(), "Request failed");
}

#[tokio::test]
async fn transport_failure_reports_status_zero() {
    let api = api_client(&closed_url(), Arc::new(TokenStore::in_memory()));
    let err = api.get("/health").await.unwrap_err();
    assert!(matches!(err, ApiError::Network { .. }));
    assert_eq!(err.status(), 0);
    assert!(err.to_string().starts_with("Network error: "));
}

#[tokio::test]
async fn malformed_json_is_a_network_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/providers")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{broken")
        .create_async()
        .await;

    let api = api_client(&server.url(), Arc::new(TokenStore::in_memory()));
    let err = api.get("/providers").await.unwrap_err();
    assert_eq!(err.status(), 0);
}
