//! Handlers for car mods. Mutation rights flow through the owning car.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use trackside_core::enums::ModCategory;
use trackside_core::error::CoreError;
use trackside_core::types::DbId;
use trackside_db::models::car::{CarMod, CreateCarMod};
use trackside_db::repositories::CarRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// Request body for `POST /api/cars/{id}/mods`.
#[derive(Debug, Deserialize, Validate)]
pub struct CarModRequest {
    #[validate(length(min = 1, message = "Mod name is required"))]
    pub name: String,
    pub category: ModCategory,
    pub notes: Option<String>,
}

/// POST /api/cars/{id}/mods
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(car_id): Path<DbId>,
    Json(input): Json<CarModRequest>,
) -> AppResult<(StatusCode, Json<CarMod>)> {
    if !CarRepo::exists_for_user(&state.pool, car_id, auth.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Car",
            id: car_id,
        }));
    }

    input.validate()?;

    let car_mod = CarRepo::create_mod(
        &state.pool,
        &CreateCarMod {
            car_id,
            name: input.name,
            category: input.category,
            notes: input.notes,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(car_mod)))
}

/// DELETE /api/cars/{id}/mods/{modId}
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((car_id, mod_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<SuccessResponse>> {
    if !CarRepo::exists_for_user(&state.pool, car_id, auth.user_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Car",
            id: car_id,
        }));
    }

    CarRepo::find_mod(&state.pool, mod_id, car_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "CarMod",
            id: mod_id,
        }))?;

    CarRepo::delete_mod(&state.pool, mod_id).await?;
    Ok(Json(SuccessResponse::default()))
}
