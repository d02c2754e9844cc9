//! Handlers for the authenticated user's profile.

use axum::extract::State;
use serde::{Deserialize, Serialize};
use trackside_core::enums::ExperienceLevel;
use trackside_core::error::CoreError;
use trackside_core::types::DbId;
use trackside_db::models::user::Profile;
use trackside_db::repositories::UserRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /api/profile`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    pub experience: ExperienceLevel,
}

/// Response body for a profile update.
#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub id: DbId,
    pub name: Option<String>,
    pub email: String,
    pub experience: ExperienceLevel,
}

/// GET /api/profile
///
/// The caller's identity, garage, and contribution counts.
pub async fn get(State(state): State<AppState>, auth: AuthUser) -> AppResult<Json<Profile>> {
    let profile = UserRepo::get_profile(&state.pool, auth.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;
    Ok(Json(profile))
}

/// PUT /api/profile
///
/// Update the caller's display name and experience tier.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<UpdateProfileResponse>> {
    input.validate()?;

    let user = UserRepo::update_profile(&state.pool, auth.user_id, &input.name, input.experience)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth.user_id,
        }))?;

    Ok(Json(UpdateProfileResponse {
        id: user.id,
        name: user.name,
        email: user.email,
        experience: user.experience,
    }))
}
