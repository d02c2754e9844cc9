//! Handlers for the track image gallery.
//!
//! Only URL strings are persisted here; file bytes live with the upload
//! collaborator. Deletion is allowed to the track owner or the image's
//! uploader.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use trackside_core::error::CoreError;
use trackside_core::types::DbId;
use trackside_db::models::track_image::{CreateTrackImage, TrackImageWithUploader};
use trackside_db::repositories::{TrackImageRepo, TrackRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// Request body for `POST /api/tracks/{id}/images`.
#[derive(Debug, Deserialize, Validate)]
pub struct TrackImageRequest {
    #[validate(url(message = "Invalid image URL"))]
    pub url: String,
    pub caption: Option<String>,
}

/// Query parameters for `DELETE /api/tracks/{id}/images`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteImageParams {
    pub image_id: DbId,
}

/// GET /api/tracks/{id}/images
///
/// Public gallery listing, newest first.
pub async fn list(
    State(state): State<AppState>,
    Path(track_id): Path<DbId>,
) -> AppResult<Json<Vec<TrackImageWithUploader>>> {
    let images = TrackImageRepo::list_for_track(&state.pool, track_id).await?;
    Ok(Json(images))
}

/// POST /api/tracks/{id}/images
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(track_id): Path<DbId>,
    Json(input): Json<TrackImageRequest>,
) -> AppResult<(StatusCode, Json<TrackImageWithUploader>)> {
    input.validate()?;

    if !TrackRepo::exists(&state.pool, track_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id: track_id,
        }));
    }

    let image = TrackImageRepo::create(
        &state.pool,
        &CreateTrackImage {
            track_id,
            uploaded_by_id: auth.user_id,
            url: input.url,
            caption: input.caption,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(image)))
}

/// DELETE /api/tracks/{id}/images?imageId=
///
/// Gallery entries are publicly visible, so a caller who is neither the
/// track owner nor the uploader gets 403.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(track_id): Path<DbId>,
    Query(params): Query<DeleteImageParams>,
) -> AppResult<Json<SuccessResponse>> {
    let image = TrackImageRepo::find_by_id(&state.pool, params.image_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TrackImage",
            id: params.image_id,
        }))?;

    let track = TrackRepo::find_by_id(&state.pool, track_id).await?;

    let is_track_owner = track
        .as_ref()
        .is_some_and(|t| t.uploaded_by_id == auth.user_id);
    let is_image_uploader = image.uploaded_by_id == auth.user_id;

    if !is_track_owner && !is_image_uploader {
        return Err(AppError::Core(CoreError::Forbidden("Forbidden".into())));
    }

    TrackImageRepo::delete(&state.pool, image.id).await?;
    Ok(Json(SuccessResponse::default()))
}
