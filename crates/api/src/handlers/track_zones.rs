//! Handlers for track zones.
//!
//! Zones are community-owned: any authenticated user may create one, edit
//! its text, or remove it. Only the position is locked, fixed at the tap
//! point it was created from.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use trackside_core::enums::EventType;
use trackside_core::error::CoreError;
use trackside_core::types::DbId;
use trackside_db::models::zone::{
    CreateTrackZone, TrackZoneWithTips, UpdateTrackZone,
};
use trackside_db::repositories::{TrackRepo, ZoneRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// Request body for `POST /api/tracks/{id}/zones`.
///
/// Positions are percentage offsets on the layout image, so they are
/// resolution-independent.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrackZoneRequest {
    #[validate(length(min = 1, message = "Zone name is required"))]
    pub name: String,
    pub description: Option<String>,
    #[validate(range(min = 0.0, max = 100.0, message = "Position must be between 0 and 100"))]
    pub pos_x: f64,
    #[validate(range(min = 0.0, max = 100.0, message = "Position must be between 0 and 100"))]
    pub pos_y: f64,
    pub event_type: Option<EventType>,
}

/// Request body for `PATCH /api/tracks/{id}/zones/{zoneId}`.
#[derive(Debug, Deserialize)]
pub struct ZoneUpdateRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// POST /api/tracks/{id}/zones
pub async fn create(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(track_id): Path<DbId>,
    Json(input): Json<TrackZoneRequest>,
) -> AppResult<(StatusCode, Json<TrackZoneWithTips>)> {
    if !TrackRepo::exists(&state.pool, track_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id: track_id,
        }));
    }

    input.validate()?;

    let zone = ZoneRepo::create(
        &state.pool,
        &CreateTrackZone {
            track_id,
            name: input.name,
            description: input.description,
            pos_x: input.pos_x,
            pos_y: input.pos_y,
            event_type: input.event_type,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(TrackZoneWithTips {
            zone,
            tips: Vec::new(),
        }),
    ))
}

/// PATCH /api/tracks/{id}/zones/{zoneId}
pub async fn update(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((track_id, zone_id)): Path<(DbId, DbId)>,
    Json(input): Json<ZoneUpdateRequest>,
) -> AppResult<Json<TrackZoneWithTips>> {
    find_zone_in_track(&state, track_id, zone_id).await?;

    let zone = ZoneRepo::update(
        &state.pool,
        zone_id,
        &UpdateTrackZone {
            name: input.name,
            description: input.description,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "TrackZone",
        id: zone_id,
    }))?;

    let tips = ZoneRepo::tips_for_zone(&state.pool, zone_id).await?;

    Ok(Json(TrackZoneWithTips { zone, tips }))
}

/// DELETE /api/tracks/{id}/zones/{zoneId}
pub async fn delete(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((track_id, zone_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<SuccessResponse>> {
    find_zone_in_track(&state, track_id, zone_id).await?;

    ZoneRepo::delete(&state.pool, zone_id).await?;
    Ok(Json(SuccessResponse::default()))
}

/// Resolve a zone scoped to its track, mapping both a missing track and a
/// zone of a different track to NotFound.
async fn find_zone_in_track(
    state: &AppState,
    track_id: DbId,
    zone_id: DbId,
) -> AppResult<()> {
    if !TrackRepo::exists(&state.pool, track_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id: track_id,
        }));
    }

    ZoneRepo::find_for_track(&state.pool, zone_id, track_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "TrackZone",
            id: zone_id,
        }))?;

    Ok(())
}
