//! HTTP-level integration tests for the lap book, including the full
//! register-to-lap-record scenario.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete_auth, get_auth, post_json_auth, register_and_login,
};
use serde_json::json;
use sqlx::PgPool;

struct Fixture {
    token: String,
    car_id: i64,
    track_id: i64,
    event_id: i64,
}

/// Register a driver with a car and a track hosting one ROADCOURSE event.
async fn fixture(app: &axum::Router, email: &str) -> Fixture {
    let (token, _) = register_and_login(app, "Demo Driver", email).await;

    let response = post_json_auth(
        app,
        "/api/cars",
        &token,
        json!({"make": "Nissan", "model": "350Z", "year": 2006}),
    )
    .await;
    let car_id = body_json(response).await["id"].as_i64().unwrap();

    let response = post_json_auth(
        app,
        "/api/tracks",
        &token,
        json!({"name": "Laguna Seca", "location": "Monterey, CA", "eventTypes": ["ROADCOURSE"]}),
    )
    .await;
    let track = body_json(response).await;
    let track_id = track["id"].as_i64().unwrap();
    let event_id = track["events"][0]["id"].as_i64().unwrap();

    Fixture {
        token,
        car_id,
        track_id,
        event_id,
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_lap_record_with_telemetry(pool: PgPool) {
    let app = build_test_app(pool);
    let fx = fixture(&app, "demo@trackside.com").await;

    let response = post_json_auth(
        &app,
        "/api/lapbook",
        &fx.token,
        json!({
            "lapTime": "1:42.856",
            "conditions": "DRY",
            "trackId": fx.track_id,
            "trackEventId": fx.event_id,
            "carId": fx.car_id,
            "tirePressureFL": 32.5,
            "tirePressureFR": 32.5,
            "tirePressureRL": 30.0,
            "tirePressureRR": 30.0,
            "fuelLevel": 0.5,
            "camberFL": -2.5,
            "camberFR": -2.5,
            "casterFL": 6.2,
            "toeFL": -0.1,
            "notes": "First session of the day",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let record = body_json(response).await;
    assert_eq!(record["lapTime"], "1:42.856");
    assert_eq!(record["conditions"], "DRY");
    assert_eq!(record["tirePressureFL"], 32.5);
    assert_eq!(record["camberFL"], -2.5);
    assert!(record["camberRL"].is_null());
    // The creation response carries the denormalized summaries, so no
    // follow-up read is needed.
    assert_eq!(record["track"]["name"], "Laguna Seca");
    assert_eq!(record["car"]["model"], "350Z");
    assert_eq!(record["trackEvent"]["eventType"], "ROADCOURSE");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_lap_record_validation(pool: PgPool) {
    let app = build_test_app(pool);
    let fx = fixture(&app, "demo@trackside.com").await;

    // Empty lap time.
    let response = post_json_auth(
        &app,
        "/api/lapbook",
        &fx.token,
        json!({"lapTime": "", "conditions": "DRY", "trackId": fx.track_id, "carId": fx.car_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Zero tire pressure is not positive.
    let response = post_json_auth(
        &app,
        "/api/lapbook",
        &fx.token,
        json!({
            "lapTime": "1:50.000",
            "conditions": "DRY",
            "trackId": fx.track_id,
            "carId": fx.car_id,
            "tirePressureFL": 0.0,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Negative fuel level.
    let response = post_json_auth(
        &app,
        "/api/lapbook",
        &fx.token,
        json!({
            "lapTime": "1:50.000",
            "conditions": "DRY",
            "trackId": fx.track_id,
            "carId": fx.car_id,
            "fuelLevel": -1.0,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Negative camber is fine (alignment fields are free signed floats).
    let response = post_json_auth(
        &app,
        "/api/lapbook",
        &fx.token,
        json!({
            "lapTime": "1:50.000",
            "conditions": "DRY",
            "trackId": fx.track_id,
            "carId": fx.car_id,
            "camberFL": -3.0,
            "toeRL": -0.2,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_lap_record_requires_own_car_and_real_track(pool: PgPool) {
    let app = build_test_app(pool);
    let fx = fixture(&app, "demo@trackside.com").await;
    let (other_token, _) = register_and_login(&app, "Other", "other@trackside.com").await;

    // Someone else's car reads as missing; nothing is persisted.
    let response = post_json_auth(
        &app,
        "/api/lapbook",
        &other_token,
        json!({"lapTime": "1:50.000", "conditions": "DRY", "trackId": fx.track_id, "carId": fx.car_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let records = body_json(get_auth(&app, "/api/lapbook", &other_token).await).await;
    assert!(records.as_array().is_some_and(Vec::is_empty));

    // A missing track is a distinct not-found.
    let response = post_json_auth(
        &app,
        "/api/lapbook",
        &fx.token,
        json!({"lapTime": "1:50.000", "conditions": "DRY", "trackId": 9999, "carId": fx.car_id}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // An event of a different track is rejected.
    let response = post_json_auth(
        &app,
        "/api/tracks",
        &fx.token,
        json!({"name": "Track B", "location": "Elsewhere", "eventTypes": ["DRAG"]}),
    )
    .await;
    let foreign_event = body_json(response).await["events"][0]["id"].as_i64().unwrap();

    let response = post_json_auth(
        &app,
        "/api/lapbook",
        &fx.token,
        json!({
            "lapTime": "1:50.000",
            "conditions": "DRY",
            "trackId": fx.track_id,
            "carId": fx.car_id,
            "trackEventId": foreign_event,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_lapbook_scoped_to_driver_with_filters(pool: PgPool) {
    let app = build_test_app(pool);
    let fx = fixture(&app, "demo@trackside.com").await;

    // A second car to exercise the car filter.
    let response = post_json_auth(
        &app,
        "/api/cars",
        &fx.token,
        json!({"make": "Mazda", "model": "MX-5", "year": 1999}),
    )
    .await;
    let second_car = body_json(response).await["id"].as_i64().unwrap();

    for (car, lap) in [(fx.car_id, "1:42.856"), (second_car, "1:48.120")] {
        let response = post_json_auth(
            &app,
            "/api/lapbook",
            &fx.token,
            json!({"lapTime": lap, "conditions": "DRY", "trackId": fx.track_id, "carId": car}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Unfiltered: both records, newest first.
    let records = body_json(get_auth(&app, "/api/lapbook", &fx.token).await).await;
    assert_eq!(records.as_array().map(Vec::len), Some(2));
    assert_eq!(records[0]["lapTime"], "1:48.120");

    // Filtered by the first car.
    let records = body_json(
        get_auth(&app, &format!("/api/lapbook?carId={}", fx.car_id), &fx.token).await,
    )
    .await;
    assert_eq!(records.as_array().map(Vec::len), Some(1));
    assert_eq!(records[0]["lapTime"], "1:42.856");

    // Another driver's lap book is empty even with matching filters.
    let (other_token, _) = register_and_login(&app, "Other", "other@trackside.com").await;
    let records = body_json(
        get_auth(
            &app,
            &format!("/api/lapbook?trackId={}", fx.track_id),
            &other_token,
        )
        .await,
    )
    .await;
    assert!(records.as_array().is_some_and(Vec::is_empty));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_lap_record_delete_is_author_scoped(pool: PgPool) {
    let app = build_test_app(pool);
    let fx = fixture(&app, "demo@trackside.com").await;
    let (other_token, _) = register_and_login(&app, "Other", "other@trackside.com").await;

    let response = post_json_auth(
        &app,
        "/api/lapbook",
        &fx.token,
        json!({"lapTime": "1:42.856", "conditions": "DRY", "trackId": fx.track_id, "carId": fx.car_id}),
    )
    .await;
    let record_id = body_json(response).await["id"].as_i64().unwrap();

    // Another driver cannot delete it; it reads as missing.
    let response = delete_auth(&app, &format!("/api/lapbook/{record_id}"), &other_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The author can.
    let response = delete_auth(&app, &format!("/api/lapbook/{record_id}"), &fx.token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let records = body_json(get_auth(&app, "/api/lapbook", &fx.token).await).await;
    assert!(records.as_array().is_some_and(Vec::is_empty));
}
