use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::routes;
use crate::store::memory::MemoryFarmStore;

/// Builds a router backed by an empty in-memory store
pub fn create_test_app() -> Router {
    routes::create_router_with_store(Arc::new(MemoryFarmStore::new()))
}

/// Builds a JSON request with the given method, uri and body
pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Builds a body-less request (GET / DELETE)
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Reads a response body as JSON
pub async fn response_to_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Creates a user through the API and returns its response body
pub async fn create_user_via_api(app: &Router, name: &str, phone: &str, email: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/users",
            json!({ "name": name, "phoneNumber": phone, "email": email }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    response_to_json(response).await
}

/// Creates a field through the API and returns its response body
pub async fn create_field_via_api(app: &Router, name: &str, user_id: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/fields",
            json!({ "name": name, "userId": user_id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    response_to_json(response).await
}

/// Creates a device controller through the API and returns its response body
pub async fn create_controller_via_api(app: &Router, device_type: &str, field_id: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/devicecontrollers",
            json!({ "type": device_type, "fieldId": field_id }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    response_to_json(response).await
}
