//! Handlers for the `/tracks` resource: public listing and detail, plus
//! authenticated creation and owner-only patching.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use trackside_core::enums::EventType;
use trackside_core::error::CoreError;
use trackside_core::types::DbId;
use trackside_db::models::track::{
    CreateTrack, Track, TrackDetail, TrackFilter, TrackListItem, UpdateTrack,
};
use trackside_db::repositories::TrackRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /api/tracks`. An out-of-enum `eventType`
/// fails extraction with 400 before any query runs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackListParams {
    pub search: Option<String>,
    pub event_type: Option<EventType>,
    pub state: Option<String>,
}

/// Query parameters for `GET /api/tracks/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDetailParams {
    pub event_type: Option<EventType>,
}

/// Request body for `POST /api/tracks`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TrackRequest {
    #[validate(length(min = 2, message = "Track name is required"))]
    pub name: String,
    #[validate(length(min = 2, message = "Location is required"))]
    pub location: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[validate(length(min = 1, message = "Select at least one event type"))]
    pub event_types: Vec<EventType>,
}

/// Request body for `PATCH /api/tracks/{id}`. Absent fields are left
/// untouched.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackPatchRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
}

/// GET /api/tracks
///
/// Public listing of APPROVED tracks. Filters AND together; an empty
/// search string matches everything.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TrackListParams>,
) -> AppResult<Json<Vec<TrackListItem>>> {
    let filter = TrackFilter {
        search: params.search.filter(|s| !s.is_empty()),
        event_type: params.event_type,
        state: params.state.filter(|s| !s.is_empty()),
    };

    let tracks = TrackRepo::list(&state.pool, &filter).await?;
    Ok(Json(tracks))
}

/// POST /api/tracks
///
/// Create a track together with its initial events, atomically.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<TrackRequest>,
) -> AppResult<(StatusCode, Json<TrackListItem>)> {
    input.validate()?;

    let track = TrackRepo::create(
        &state.pool,
        &CreateTrack {
            uploaded_by_id: auth.user_id,
            name: input.name,
            location: input.location,
            description: input.description,
            image_url: input.image_url,
            event_types: input.event_types,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(track)))
}

/// GET /api/tracks/{id}
///
/// Public detail aggregate. The optional `eventType` filter narrows the
/// zone list only.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<TrackDetailParams>,
) -> AppResult<Json<TrackDetail>> {
    let detail = TrackRepo::get_detail(&state.pool, id, params.event_type)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id,
        }))?;
    Ok(Json(detail))
}

/// PATCH /api/tracks/{id}
///
/// Track-level fields are the uploader's alone; the track's existence is
/// public, so a foreign caller gets 403 rather than 404.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<TrackPatchRequest>,
) -> AppResult<Json<Track>> {
    let track = TrackRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id,
        }))?;

    if track.uploaded_by_id != auth.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only edit your own tracks".into(),
        )));
    }

    let updated = TrackRepo::update(
        &state.pool,
        id,
        &UpdateTrack {
            name: input.name,
            description: input.description,
            location: input.location,
            image_url: input.image_url,
        },
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Track",
        id,
    }))?;

    Ok(Json(updated))
}
