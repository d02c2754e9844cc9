//! Handlers for track reviews. Reviews are immutable after creation and
//! require authentication, not track ownership.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use trackside_core::enums::DrivingCondition;
use trackside_core::error::CoreError;
use trackside_core::types::DbId;
use trackside_db::models::review::{CreateTrackReview, ReviewWithAuthor};
use trackside_db::repositories::{ReviewRepo, TrackRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /api/tracks/{id}/reviews`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrackReviewRequest {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    pub content: Option<String>,
    pub conditions: DrivingCondition,
    pub track_event_id: Option<DbId>,
}

/// POST /api/tracks/{id}/reviews
///
/// A referenced event must belong to the reviewed track.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(track_id): Path<DbId>,
    Json(input): Json<TrackReviewRequest>,
) -> AppResult<(StatusCode, Json<ReviewWithAuthor>)> {
    if !TrackRepo::exists(&state.pool, track_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id: track_id,
        }));
    }

    input.validate()?;

    if let Some(event_id) = input.track_event_id {
        TrackRepo::find_event_for_track(&state.pool, event_id, track_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "TrackEvent",
                id: event_id,
            }))?;
    }

    let review = ReviewRepo::create(
        &state.pool,
        &CreateTrackReview {
            track_id,
            author_id: auth.user_id,
            rating: input.rating,
            content: input.content,
            conditions: input.conditions,
            track_event_id: input.track_event_id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(review)))
}
