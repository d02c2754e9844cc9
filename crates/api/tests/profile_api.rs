//! HTTP-level integration tests for the profile aggregate.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, get_auth, post_json_auth, put_json_auth, register_and_login,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_update(pool: PgPool) {
    let app = build_test_app(pool);
    let (token, _) = register_and_login(&app, "Demo Driver", "demo@trackside.com").await;

    let response = put_json_auth(
        &app,
        "/api/profile",
        &token,
        json!({"name": "Demo D.", "experience": "INTERMEDIATE"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Demo D.");
    assert_eq!(json["experience"], "INTERMEDIATE");

    // Short name and off-enum experience are rejected.
    let response = put_json_auth(
        &app,
        "/api/profile",
        &token,
        json!({"name": "D", "experience": "INTERMEDIATE"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        &app,
        "/api/profile",
        &token,
        json!({"name": "Demo D.", "experience": "LEGEND"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_profile_includes_cars_and_counts(pool: PgPool) {
    let app = build_test_app(pool);
    let (token, _) = register_and_login(&app, "Demo Driver", "demo@trackside.com").await;

    let response = post_json_auth(
        &app,
        "/api/cars",
        &token,
        json!({"make": "Nissan", "model": "350Z", "year": 2006}),
    )
    .await;
    let car_id = body_json(response).await["id"].as_i64().unwrap();

    let response = post_json_auth(
        &app,
        "/api/tracks",
        &token,
        json!({"name": "Laguna Seca", "location": "Monterey, CA", "eventTypes": ["ROADCOURSE"]}),
    )
    .await;
    let track_id = body_json(response).await["id"].as_i64().unwrap();

    post_json_auth(
        &app,
        &format!("/api/tracks/{track_id}/reviews"),
        &token,
        json!({"rating": 5, "conditions": "DRY"}),
    )
    .await;

    post_json_auth(
        &app,
        "/api/lapbook",
        &token,
        json!({"lapTime": "1:42.856", "conditions": "DRY", "trackId": track_id, "carId": car_id}),
    )
    .await;

    let profile = body_json(get_auth(&app, "/api/profile", &token).await).await;
    assert_eq!(profile["cars"][0]["model"], "350Z");
    assert_eq!(profile["_count"]["trackReviews"], 1);
    assert_eq!(profile["_count"]["lapRecords"], 1);
    assert_eq!(profile["_count"]["tracks"], 1);
    assert_eq!(profile["_count"]["zoneTips"], 0);
}
