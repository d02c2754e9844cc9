//! Handlers for zone tips. Tips are immutable once posted; creation is
//! open to any authenticated user.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use trackside_core::enums::DrivingCondition;
use trackside_core::error::CoreError;
use trackside_core::types::DbId;
use trackside_db::models::zone::{CreateZoneTip, ZoneTipWithAuthor};
use trackside_db::repositories::ZoneRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /api/tracks/{id}/zones/{zoneId}/tips`.
#[derive(Debug, Deserialize, Validate)]
pub struct ZoneTipRequest {
    #[validate(length(min = 1, message = "Tip content is required"))]
    pub content: String,
    pub conditions: Option<DrivingCondition>,
}

/// POST /api/tracks/{id}/zones/{zoneId}/tips
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((track_id, zone_id)): Path<(DbId, DbId)>,
    Json(input): Json<ZoneTipRequest>,
) -> AppResult<(StatusCode, Json<ZoneTipWithAuthor>)> {
    ZoneRepo::find_for_track(&state.pool, zone_id, track_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TrackZone",
            id: zone_id,
        }))?;

    input.validate()?;

    let tip = ZoneRepo::create_tip(
        &state.pool,
        &CreateZoneTip {
            zone_id,
            author_id: auth.user_id,
            content: input.content,
            conditions: input.conditions,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(tip)))
}
