//! HTTP-level integration tests for track reviews.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, post_json_auth, register_and_login};
use serde_json::json;
use sqlx::PgPool;

async fn create_track(app: &axum::Router, token: &str, name: &str) -> serde_json::Value {
    let response = post_json_auth(
        app,
        "/api/tracks",
        token,
        json!({"name": name, "location": "Somewhere, CA", "eventTypes": ["ROADCOURSE", "DRIFT"]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_rating_boundaries(pool: PgPool) {
    let app = build_test_app(pool);
    let (token, _) = register_and_login(&app, "Demo Driver", "demo@trackside.com").await;
    let track = create_track(&app, &token, "Laguna Seca").await;
    let track_id = track["id"].as_i64().unwrap();

    for (rating, expected) in [
        (1, StatusCode::CREATED),
        (5, StatusCode::CREATED),
        (0, StatusCode::BAD_REQUEST),
        (6, StatusCode::BAD_REQUEST),
    ] {
        let response = post_json_auth(
            &app,
            &format!("/api/tracks/{track_id}/reviews"),
            &token,
            json!({"rating": rating, "conditions": "DRY"}),
        )
        .await;
        assert_eq!(response.status(), expected, "rating {rating}");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_review_requires_existing_track(pool: PgPool) {
    let app = build_test_app(pool);
    let (token, _) = register_and_login(&app, "Demo Driver", "demo@trackside.com").await;

    let response = post_json_auth(
        &app,
        "/api/tracks/9999/reviews",
        &token,
        json!({"rating": 5, "conditions": "DRY"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_review_event_must_belong_to_track(pool: PgPool) {
    let app = build_test_app(pool);
    let (token, _) = register_and_login(&app, "Demo Driver", "demo@trackside.com").await;
    let track_a = create_track(&app, &token, "Track A").await;
    let track_b = create_track(&app, &token, "Track B").await;

    let a_id = track_a["id"].as_i64().unwrap();
    let b_event = track_b["events"][0]["id"].as_i64().unwrap();

    // An event of a different track is a distinct not-found condition and
    // persists nothing.
    let response = post_json_auth(
        &app,
        &format!("/api/tracks/{a_id}/reviews"),
        &token,
        json!({"rating": 5, "conditions": "DRY", "trackEventId": b_event}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let detail = body_json(get(&app, &format!("/api/tracks/{a_id}")).await).await;
    assert_eq!(detail["_count"]["reviews"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_review_with_own_event_resolves_it(pool: PgPool) {
    let app = build_test_app(pool);
    let (token, _) = register_and_login(&app, "Demo Driver", "demo@trackside.com").await;
    let track = create_track(&app, &token, "Laguna Seca").await;
    let track_id = track["id"].as_i64().unwrap();
    let event_id = track["events"][0]["id"].as_i64().unwrap();

    let response = post_json_auth(
        &app,
        &format!("/api/tracks/{track_id}/reviews"),
        &token,
        json!({
            "rating": 4,
            "content": "Fast and flowing",
            "conditions": "WET",
            "trackEventId": event_id,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let review = body_json(response).await;
    assert_eq!(review["rating"], 4);
    assert_eq!(review["conditions"], "WET");
    assert_eq!(review["trackEvent"]["id"].as_i64(), Some(event_id));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_review_author_includes_experience_and_garage(pool: PgPool) {
    let app = build_test_app(pool);
    let (token, user_id) = register_and_login(&app, "Demo Driver", "demo@trackside.com").await;
    let track = create_track(&app, &token, "Laguna Seca").await;
    let track_id = track["id"].as_i64().unwrap();

    post_json_auth(
        &app,
        "/api/cars",
        &token,
        json!({"make": "Nissan", "model": "350Z", "year": 2006}),
    )
    .await;

    let response = post_json_auth(
        &app,
        &format!("/api/tracks/{track_id}/reviews"),
        &token,
        json!({"rating": 5, "conditions": "DRY"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let review = body_json(response).await;
    assert_eq!(review["author"]["id"].as_i64(), Some(user_id));
    assert_eq!(review["author"]["experience"], "BEGINNER");
    assert_eq!(review["author"]["cars"][0]["make"], "Nissan");
}
