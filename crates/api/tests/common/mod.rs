//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the production router (same middleware stack as `main.rs`) on top
//! of the per-test database `#[sqlx::test]` provides, and wraps
//! `tower::ServiceExt::oneshot` with small request helpers.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use trackside_api::auth::jwt::JwtConfig;
use trackside_api::config::ServerConfig;
use trackside_api::router::build_app_router;
use trackside_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3001".to_string()],
        request_timeout_secs: 30,
        tracks_data_dir: "./data".to_string(),
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_hours: 24,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a GET request.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::builder().method("GET").uri(uri)).await
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("GET")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}")),
    )
    .await
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, "POST", uri, None, body).await
}

/// Send an authenticated POST request with a JSON body.
pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, "POST", uri, Some(token), body).await
}

/// Send an authenticated PUT request with a JSON body.
pub async fn put_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, "PUT", uri, Some(token), body).await
}

/// Send an authenticated PATCH request with a JSON body.
pub async fn patch_json_auth(
    app: &Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send_json(app, "PATCH", uri, Some(token), body).await
}

/// Send an authenticated DELETE request.
pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}")),
    )
    .await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Register a user through the API and log them in, returning
/// `(token, user_id)`.
pub async fn register_and_login(app: &Router, name: &str, email: &str) -> (String, i64) {
    let response = post_json(
        app,
        "/api/register",
        serde_json::json!({
            "name": name,
            "email": email,
            "password": "a-strong-password",
            "confirmPassword": "a-strong-password",
        }),
    )
    .await;
    assert_eq!(
        response.status(),
        StatusCode::CREATED,
        "registration should succeed"
    );

    let response = post_json(
        app,
        "/api/auth/login",
        serde_json::json!({
            "email": email,
            "password": "a-strong-password",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login should succeed");

    let json = body_json(response).await;
    let token = json["token"].as_str().expect("token").to_string();
    let user_id = json["user"]["id"].as_i64().expect("user id");
    (token, user_id)
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: serde_json::Value,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .expect("request should build");
    app.clone()
        .oneshot(request)
        .await
        .expect("request should not fail at the transport level")
}

async fn send(
    app: &Router,
    builder: axum::http::request::Builder,
) -> Response<Body> {
    let request = builder
        .body(Body::empty())
        .expect("request should build");
    app.clone()
        .oneshot(request)
        .await
        .expect("request should not fail at the transport level")
}
