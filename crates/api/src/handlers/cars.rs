//! Handlers for the caller's garage.
//!
//! Every lookup that precedes a mutation is owner-scoped, so a foreign car
//! answers 404 exactly like a missing one.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use trackside_core::error::CoreError;
use trackside_core::types::DbId;
use trackside_db::models::car::{CarWithMods, CreateCar};
use trackside_db::repositories::CarRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// Request body for creating or replacing a car.
#[derive(Debug, Deserialize, Validate)]
pub struct CarRequest {
    #[validate(length(min = 1, message = "Make is required"))]
    pub make: String,
    #[validate(length(min = 1, message = "Model is required"))]
    pub model: String,
    #[validate(range(min = 1900, max = 2030, message = "Year must be between 1900 and 2030"))]
    pub year: i32,
}

/// GET /api/cars
///
/// The caller's cars with their mods, newest first.
pub async fn list(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<Vec<CarWithMods>>> {
    let cars = CarRepo::list_for_user(&state.pool, auth.user_id).await?;
    Ok(Json(cars))
}

/// POST /api/cars
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CarRequest>,
) -> AppResult<(StatusCode, Json<CarWithMods>)> {
    input.validate()?;

    let car = CarRepo::create(
        &state.pool,
        &CreateCar {
            user_id: auth.user_id,
            make: input.make,
            model: input.model,
            year: input.year,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(CarWithMods {
            car,
            mods: Vec::new(),
        }),
    ))
}

/// PUT /api/cars/{id}
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CarRequest>,
) -> AppResult<Json<CarWithMods>> {
    let existing = CarRepo::find_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Car", id }))?;

    input.validate()?;

    let car = CarRepo::update(&state.pool, id, &input.make, &input.model, input.year)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Car", id }))?;

    Ok(Json(CarWithMods {
        car,
        mods: existing.mods,
    }))
}

/// DELETE /api/cars/{id}
///
/// Deleting a car takes its mods and lap records with it.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    CarRepo::find_for_user(&state.pool, id, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Car", id }))?;

    CarRepo::delete(&state.pool, id).await?;
    Ok(Json(SuccessResponse::default()))
}
