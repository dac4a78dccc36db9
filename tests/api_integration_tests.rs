//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use restash::{api::create_router, AppState, FileStore, MemoryStore, TieredCache};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

// == Helper Functions ==

const TEST_CAPACITY: usize = 100;
const TEST_TTL: Duration = Duration::from_secs(300);

fn create_test_app() -> Router {
    let cache = TieredCache::new(Box::new(MemoryStore::new()), TEST_CAPACITY, TEST_TTL);
    create_router(AppState::new(cache))
}

fn create_file_backed_app(dir: &std::path::Path) -> Router {
    let store = FileStore::new(dir).unwrap();
    let cache = TieredCache::new(Box::new(store), TEST_CAPACITY, TEST_TTL);
    create_router(AppState::new(cache))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn put_set(app: &Router, body: &str) -> StatusCode {
    app.clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/set")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
        .status()
}

async fn get_key(app: &Router, key: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(format!("/get/{key}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let json = body_to_json(response.into_body()).await;
    (status, json)
}

// == SET Endpoint Tests ==

#[tokio::test]
async fn test_set_endpoint_success() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/set")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"key":"test_key","value":{"rows":[{"id":1}]}}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert!(json["message"].as_str().unwrap().contains("test_key"));
}

#[tokio::test]
async fn test_set_endpoint_with_ttl() {
    let app = create_test_app();

    let status = put_set(
        &app,
        r#"{"key":"ttl_key","value":"ttl_value","ttl_minutes":5}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_set_endpoint_rejects_empty_key() {
    let app = create_test_app();

    let status = put_set(&app, r#"{"key":"","value":"v"}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_set_endpoint_rejects_zero_ttl() {
    let app = create_test_app();

    let status = put_set(&app, r#"{"key":"k","value":"v","ttl_minutes":0}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// == GET Endpoint Tests ==

#[tokio::test]
async fn test_get_endpoint_success() {
    let app = create_test_app();

    let status = put_set(&app, r#"{"key":"get_key","value":{"name":"primer"}}"#).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = get_key(&app, "get_key").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["key"].as_str().unwrap(), "get_key");
    assert_eq!(json["value"], json!({"name": "primer"}));
}

#[tokio::test]
async fn test_get_endpoint_not_found() {
    let app = create_test_app();

    let (status, json) = get_key(&app, "nonexistent_key").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_get_endpoint_overwritten_value() {
    let app = create_test_app();

    put_set(&app, r#"{"key":"k","value":"old"}"#).await;
    put_set(&app, r#"{"key":"k","value":"new"}"#).await;

    let (status, json) = get_key(&app, "k").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"], json!("new"));
}

// == DELETE Endpoint Tests ==

#[tokio::test]
async fn test_del_endpoint_clears_key() {
    let app = create_test_app();

    put_set(&app, r#"{"key":"delete_key","value":"delete_value"}"#).await;

    let del_response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/del/delete_key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(del_response.status(), StatusCode::OK);

    let (status, _) = get_key(&app, "delete_key").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_del_endpoint_absent_key_is_ok() {
    let app = create_test_app();

    // Clearing is idempotent: no 404 for an absent key
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/del/nonexistent_key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

// == CLEAR Endpoint Tests ==

#[tokio::test]
async fn test_clear_endpoint_wipes_everything() {
    let app = create_test_app();

    for i in 0..5 {
        put_set(&app, &format!(r#"{{"key":"key{i}","value":{i}}}"#)).await;
    }

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/clear")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["dropped"].as_u64().unwrap(), 5);

    for i in 0..5 {
        let (status, _) = get_key(&app, &format!("key{i}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

// == STATS Endpoint Tests ==

#[tokio::test]
async fn test_stats_endpoint() {
    let app = create_test_app();

    put_set(&app, r#"{"key":"stats_key","value":"stats_value"}"#).await;

    // Hit, then miss
    let _ = get_key(&app, "stats_key").await;
    let _ = get_key(&app, "nonexistent").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["size"].as_u64().unwrap(), 1);
    assert_eq!(json["hits"].as_u64().unwrap(), 1);
    assert_eq!(json["misses"].as_u64().unwrap(), 1);
    assert_eq!(json["keys"], json!(["stats_key"]));
    assert!((json["hit_rate"].as_f64().unwrap() - 0.5).abs() < 0.001);
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
}

// == Durable-Tier Scenarios ==

#[tokio::test]
async fn test_value_survives_service_restart() {
    let dir = tempfile::TempDir::new().unwrap();

    let first = create_file_backed_app(dir.path());
    put_set(&first, r#"{"key":"y","value":{"rows":[1,2,3]}}"#).await;
    drop(first);

    // A fresh app over the same data directory promotes from disk
    let second = create_file_backed_app(dir.path());
    let (status, json) = get_key(&second, "y").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["value"], json!({"rows": [1, 2, 3]}));
}

#[tokio::test]
async fn test_clear_wipes_the_durable_tier_too() {
    let dir = tempfile::TempDir::new().unwrap();

    let first = create_file_backed_app(dir.path());
    put_set(&first, r#"{"key":"gone","value":1}"#).await;

    let response = first
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/clear")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    drop(first);

    let second = create_file_backed_app(dir.path());
    let (status, _) = get_key(&second, "gone").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
