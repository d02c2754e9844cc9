//! Handlers for the lap book: driver-scoped lap records with telemetry.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;
use trackside_core::enums::{DrivingCondition, EventType};
use trackside_core::error::CoreError;
use trackside_core::types::DbId;
use trackside_db::models::lap_record::{
    CreateLapRecord, LapRecordFilter, LapRecordWithDetails,
};
use trackside_db::repositories::{CarRepo, LapbookRepo, TrackRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// Query parameters for `GET /api/lapbook`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LapbookListParams {
    pub track_id: Option<DbId>,
    pub car_id: Option<DbId>,
    pub event_type: Option<EventType>,
}

/// Request body for `POST /api/lapbook`.
///
/// `lapTime` is stored as the formatted string the driver entered. Tire
/// pressures must be positive when present; fuel level non-negative;
/// camber/caster/toe are free signed floats.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LapRecordRequest {
    #[validate(length(min = 1, message = "Lap time is required"))]
    pub lap_time: String,
    pub conditions: DrivingCondition,
    pub notes: Option<String>,
    #[serde(rename = "tirePressureFL")]
    #[validate(range(exclusive_min = 0.0, message = "Tire pressure must be positive"))]
    pub tire_pressure_fl: Option<f64>,
    #[serde(rename = "tirePressureFR")]
    #[validate(range(exclusive_min = 0.0, message = "Tire pressure must be positive"))]
    pub tire_pressure_fr: Option<f64>,
    #[serde(rename = "tirePressureRL")]
    #[validate(range(exclusive_min = 0.0, message = "Tire pressure must be positive"))]
    pub tire_pressure_rl: Option<f64>,
    #[serde(rename = "tirePressureRR")]
    #[validate(range(exclusive_min = 0.0, message = "Tire pressure must be positive"))]
    pub tire_pressure_rr: Option<f64>,
    #[validate(range(min = 0.0, message = "Fuel level cannot be negative"))]
    pub fuel_level: Option<f64>,
    #[serde(rename = "camberFL")]
    pub camber_fl: Option<f64>,
    #[serde(rename = "camberFR")]
    pub camber_fr: Option<f64>,
    #[serde(rename = "camberRL")]
    pub camber_rl: Option<f64>,
    #[serde(rename = "camberRR")]
    pub camber_rr: Option<f64>,
    #[serde(rename = "casterFL")]
    pub caster_fl: Option<f64>,
    #[serde(rename = "casterFR")]
    pub caster_fr: Option<f64>,
    #[serde(rename = "toeFL")]
    pub toe_fl: Option<f64>,
    #[serde(rename = "toeFR")]
    pub toe_fr: Option<f64>,
    #[serde(rename = "toeRL")]
    pub toe_rl: Option<f64>,
    #[serde(rename = "toeRR")]
    pub toe_rr: Option<f64>,
    pub track_id: DbId,
    pub track_event_id: Option<DbId>,
    pub car_id: DbId,
}

/// GET /api/lapbook
///
/// The caller's lap records, newest first, with optional track/car/event
/// filters. Never returns another driver's rows.
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<LapbookListParams>,
) -> AppResult<Json<Vec<LapRecordWithDetails>>> {
    let filter = LapRecordFilter {
        track_id: params.track_id,
        car_id: params.car_id,
        event_type: params.event_type,
    };

    let records = LapbookRepo::list_for_driver(&state.pool, auth.user_id, &filter).await?;
    Ok(Json(records))
}

/// POST /api/lapbook
///
/// The referenced car must belong to the caller, the track must exist,
/// and a referenced event must belong to that track.
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<LapRecordRequest>,
) -> AppResult<(StatusCode, Json<LapRecordWithDetails>)> {
    input.validate()?;

    if !CarRepo::exists_for_user(&state.pool, input.car_id, auth.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Car",
            id: input.car_id,
        }));
    }

    if !TrackRepo::exists(&state.pool, input.track_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Track",
            id: input.track_id,
        }));
    }

    if let Some(event_id) = input.track_event_id {
        TrackRepo::find_event_for_track(&state.pool, event_id, input.track_id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "TrackEvent",
                id: event_id,
            }))?;
    }

    let record = LapbookRepo::create(
        &state.pool,
        &CreateLapRecord {
            driver_id: auth.user_id,
            track_id: input.track_id,
            track_event_id: input.track_event_id,
            car_id: input.car_id,
            lap_time: input.lap_time,
            conditions: input.conditions,
            notes: input.notes,
            tire_pressure_fl: input.tire_pressure_fl,
            tire_pressure_fr: input.tire_pressure_fr,
            tire_pressure_rl: input.tire_pressure_rl,
            tire_pressure_rr: input.tire_pressure_rr,
            fuel_level: input.fuel_level,
            camber_fl: input.camber_fl,
            camber_fr: input.camber_fr,
            camber_rl: input.camber_rl,
            camber_rr: input.camber_rr,
            caster_fl: input.caster_fl,
            caster_fr: input.caster_fr,
            toe_fl: input.toe_fl,
            toe_fr: input.toe_fr,
            toe_rl: input.toe_rl,
            toe_rr: input.toe_rr,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

/// DELETE /api/lapbook/{id}
///
/// Author-scoped: another driver's record answers 404.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    LapbookRepo::find_for_driver(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "LapRecord",
            id,
        }))?;

    LapbookRepo::delete(&state.pool, id).await?;
    Ok(Json(SuccessResponse::default()))
}
