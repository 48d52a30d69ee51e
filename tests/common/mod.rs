#![allow(dead_code)]

use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt; // for `oneshot`

use task_board::routes::API_PREFIX;

pub fn api_path(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(api_path(path))
        .body(Body::empty())
        .expect("request should build")
}

pub fn delete(path: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(api_path(path))
        .body(Body::empty())
        .expect("request should build")
}

pub fn json_request(method: &str, path: &str, body: &Value) -> Request<Body> {
    raw_json_request(method, path, body.to_string())
}

pub fn raw_json_request(method: &str, path: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(api_path(path))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .expect("request should build")
}

/// Sends the request and returns the status with the decoded body
/// (`Value::Null` for an empty body).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should succeed");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    if bytes.is_empty() {
        return (status, Value::Null);
    }
    let json = serde_json::from_slice(&bytes).expect("body should be json");
    (status, json)
}

pub fn ids(list: &Value) -> Vec<i64> {
    list.as_array()
        .expect("data should be an array")
        .iter()
        .map(|item| item["id"].as_i64().expect("id should be a number"))
        .collect()
}
