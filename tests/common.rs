//! Common test utilities for polls integration tests
//!
//! This file contains shared functions for all integration tests: building a
//! test application over an isolated database, creating questions through
//! the API, and sending requests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use polls::{create_app, db::init_pool, models::Question, run_migrations};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::Service;

/// Creates a test application with an in-memory SQLite database
///
/// Each call gets its own shared-cache in-memory database, so tests are
/// isolated from each other and need no cleanup.
///
/// ### Returns
///
/// An Axum Router configured with all routes and connected to a fresh database
pub fn create_test_app() -> Router {
    let database_url = format!("file:it_{}?mode=memory&cache=shared", uuid::Uuid::new_v4());
    let pool = Arc::new(init_pool(&database_url).unwrap());

    let conn = &mut pool.get().unwrap();
    run_migrations(conn).unwrap();

    create_app(pool)
}

/// Sends a request to the app and returns the status and parsed JSON body
pub async fn send(app: &mut Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.call(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

/// Sends a GET request to `uri`
pub async fn get(app: &mut Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Sends a POST request with a JSON body to `uri`
pub async fn post_json(app: &mut Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

/// Creates a question published `days` days from now via the API
///
/// ### Returns
///
/// The created Question
pub async fn create_question(app: &mut Router, question_text: &str, days: i64) -> Question {
    let (status, body) = post_json(
        app,
        "/questions",
        json!({ "question_text": question_text, "days": days }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {}", body);

    serde_json::from_value(body).unwrap()
}

/// Extracts the question IDs of an index response, in order
pub fn index_ids(index: &Value) -> Vec<String> {
    index["latest_question_list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_str().unwrap().to_string())
        .collect()
}
