//! Integration tests for the character HTTP API.
//!
//! Drives the real router in-process with `tower::ServiceExt::oneshot`,
//! backed by a store over a temp roster document, and checks the full
//! surface: pagination defaults, parse-failure short-circuits, lookup,
//! insert validation, and partial update.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use rosterdb::http_server::{HttpServer, HttpServerConfig};
use rosterdb::store::CharacterStore;

// ---------------------------------------------------------------------------
// Test Utilities
// ---------------------------------------------------------------------------

fn character(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "house": "Stark",
        "animal": "Direwolf",
        "symbol": "Wolf",
        "nickname": "none",
        "role": "Lord",
        "age": 30,
        "death": null,
        "strength": "Honor"
    })
}

/// Build the real router over a file-backed store seeded with 12 records
/// (ids 1..=12). Returns the temp dir so the document outlives the test.
fn build_test_app() -> (Router, Arc<CharacterStore>, TempDir) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("characters.json");

    let records: Vec<Value> = (1..=12)
        .map(|id| character(id, &format!("character-{}", id)))
        .collect();
    rosterdb::store::save_roster(&path, &records).unwrap();

    let store = Arc::new(CharacterStore::open(&path));
    let server = HttpServer::with_config(HttpServerConfig::default(), store.clone());
    (server.router(), store, dir)
}

async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn send_json(app: Router, method: &str, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Test: GET /health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_check_returns_ok() {
    let (app, _store, _dir) = build_test_app();
    let response = get(app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

// ---------------------------------------------------------------------------
// Test: GET /characters pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_defaults_to_first_three() {
    let (app, _store, _dir) = build_test_app();
    let response = get(app, "/characters").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["id"], 1);
    assert_eq!(records[2]["id"], 3);
}

#[tokio::test]
async fn list_honors_skip_and_limit() {
    let (app, _store, _dir) = build_test_app();
    let response = get(app, "/characters?skip=10&limit=5").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["id"], 11);
    assert_eq!(records[1]["id"], 12);
}

#[tokio::test]
async fn list_past_the_end_is_empty_array() {
    let (app, _store, _dir) = build_test_app();
    let response = get(app, "/characters?skip=50&limit=5").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn list_rejects_unparseable_params() {
    for uri in [
        "/characters?limit=invalid",
        "/characters?skip=invalid",
        "/characters?limit=-1",
        "/characters?skip=3.5",
    ] {
        let (app, _store, _dir) = build_test_app();
        let response = get(app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);

        let body = body_json(response).await;
        assert!(body["error"].is_string(), "uri: {}", uri);
    }
}

// ---------------------------------------------------------------------------
// Test: GET /characters/{id}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn get_by_id_returns_the_record() {
    let (app, _store, _dir) = build_test_app();
    let response = get(app, "/characters/7").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], 7);
    assert_eq!(body["name"], "character-7");
}

#[tokio::test]
async fn get_unknown_id_is_404_with_exact_payload() {
    let (app, _store, _dir) = build_test_app();
    let response = get(app, "/characters/999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Character not found"})
    );
}

#[tokio::test]
async fn get_non_integer_id_is_client_error() {
    let (app, _store, _dir) = build_test_app();
    let response = get(app, "/characters/jon-snow").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: POST /characters
// ---------------------------------------------------------------------------

#[tokio::test]
async fn insert_returns_201_with_stored_record() {
    let (app, store, _dir) = build_test_app();

    let mut candidate = character(13, "newcomer");
    candidate
        .as_object_mut()
        .unwrap()
        .insert("weapon".to_string(), json!("Needle"));

    let response = send_json(app, "POST", "/characters", candidate.clone()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await, candidate);

    // Mutation is visible through the store and persisted to the document.
    assert_eq!(store.len(), 13);
    let on_disk = std::fs::read_to_string(store.path().unwrap()).unwrap();
    let parsed: Value = serde_json::from_str(&on_disk).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 13);
}

#[tokio::test]
async fn insert_missing_field_is_400_naming_the_field() {
    let (app, store, _dir) = build_test_app();

    let mut candidate = character(13, "incomplete");
    candidate.as_object_mut().unwrap().remove("strength");

    let response = send_json(app, "POST", "/characters", candidate).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Missing requirement: strength"})
    );
    assert_eq!(store.len(), 12);
}

#[tokio::test]
async fn insert_non_object_body_is_400() {
    let (app, _store, _dir) = build_test_app();
    let response = send_json(app, "POST", "/characters", json!([1, 2, 3])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: PATCH /characters/{id}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn patch_merges_only_patched_keys() {
    let (app, store, _dir) = build_test_app();
    let before = store.get_by_id(1).unwrap();

    let response = send_json(app, "PATCH", "/characters/1", json!({"age": 99})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["age"], 99);
    for (key, value) in before.as_object().unwrap() {
        if key != "age" {
            assert_eq!(&body[key], value, "field {} must be unchanged", key);
        }
    }
}

#[tokio::test]
async fn patch_unknown_id_is_404_with_exact_payload() {
    let (app, _store, _dir) = build_test_app();
    let response = send_json(app, "PATCH", "/characters/999", json!({"age": 1})).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Character not found"})
    );
}

#[tokio::test]
async fn patch_is_persisted() {
    let (app, store, _dir) = build_test_app();

    let response = send_json(app, "PATCH", "/characters/2", json!({"death": 8})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let reloaded = CharacterStore::open(store.path().unwrap());
    assert_eq!(reloaded.get_by_id(2).unwrap()["death"], 8);
}

// ---------------------------------------------------------------------------
// Test: unknown route
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_route_returns_404() {
    let (app, _store, _dir) = build_test_app();
    let response = get(app, "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
