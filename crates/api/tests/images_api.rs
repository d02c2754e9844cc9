//! HTTP-level integration tests for the track gallery.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, delete_auth, get, post_json_auth, register_and_login,
};
use serde_json::json;
use sqlx::PgPool;

async fn create_track(app: &axum::Router, token: &str) -> i64 {
    let response = post_json_auth(
        app,
        "/api/tracks",
        token,
        json!({"name": "Laguna Seca", "location": "Monterey, CA", "eventTypes": ["ROADCOURSE"]}),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_gallery_create_and_list(pool: PgPool) {
    let app = build_test_app(pool);
    let (token, user_id) = register_and_login(&app, "Demo Driver", "demo@trackside.com").await;
    let track_id = create_track(&app, &token).await;

    // Only a URL string crosses this boundary; bytes live elsewhere.
    let response = post_json_auth(
        &app,
        &format!("/api/tracks/{track_id}/images"),
        &token,
        json!({"url": "https://cdn.trackside.com/layouts/laguna.png", "caption": "Full layout"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let image = body_json(response).await;
    assert_eq!(image["caption"], "Full layout");
    assert_eq!(image["uploadedBy"]["id"].as_i64(), Some(user_id));

    // Gallery listing is public.
    let images = body_json(get(&app, &format!("/api/tracks/{track_id}/images")).await).await;
    assert_eq!(images.as_array().map(Vec::len), Some(1));

    // A non-URL is rejected.
    let response = post_json_auth(
        &app,
        &format!("/api/tracks/{track_id}/images"),
        &token,
        json!({"url": "not a url"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_gallery_delete_rights(pool: PgPool) {
    let app = build_test_app(pool);
    let (owner_token, _) = register_and_login(&app, "Owner", "owner@trackside.com").await;
    let (uploader_token, _) = register_and_login(&app, "Uploader", "uploader@trackside.com").await;
    let (third_token, _) = register_and_login(&app, "Third", "third@trackside.com").await;
    let track_id = create_track(&app, &owner_token).await;

    // A different user contributes a photo.
    let response = post_json_auth(
        &app,
        &format!("/api/tracks/{track_id}/images"),
        &uploader_token,
        json!({"url": "https://cdn.trackside.com/photos/corkscrew.jpg"}),
    )
    .await;
    let image_id = body_json(response).await["id"].as_i64().unwrap();

    // A third party may not remove it: the gallery is public, so this is
    // a visible-resource denial.
    let response = delete_auth(
        &app,
        &format!("/api/tracks/{track_id}/images?imageId={image_id}"),
        &third_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // The image uploader may.
    let response = delete_auth(
        &app,
        &format!("/api/tracks/{track_id}/images?imageId={image_id}"),
        &uploader_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The track owner may remove any gallery entry.
    let response = post_json_auth(
        &app,
        &format!("/api/tracks/{track_id}/images"),
        &uploader_token,
        json!({"url": "https://cdn.trackside.com/photos/turn2.jpg"}),
    )
    .await;
    let image_id = body_json(response).await["id"].as_i64().unwrap();

    let response = delete_auth(
        &app,
        &format!("/api/tracks/{track_id}/images?imageId={image_id}"),
        &owner_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let images = body_json(get(&app, &format!("/api/tracks/{track_id}/images")).await).await;
    assert!(images.as_array().is_some_and(Vec::is_empty));
}
