//! User entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use trackside_core::enums::ExperienceLevel;
use trackside_core::types::{DbId, Timestamp};

use crate::models::car::{CarBrief, CarWithMods};

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// Use the brief/profile structs below for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: Option<String>,
    pub email: String,
    pub password_hash: Option<String>,
    pub image: Option<String>,
    pub experience: ExperienceLevel,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Minimal identity attached to uploaded/authored content.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserBrief {
    pub id: DbId,
    pub name: Option<String>,
}

/// Identity plus experience tier, used on track detail and reviews.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserWithExperience {
    pub id: DbId,
    pub name: Option<String>,
    pub experience: ExperienceLevel,
}

/// Review author: identity, experience, and their registered cars.
#[derive(Debug, Clone, Serialize)]
pub struct UserWithCars {
    pub id: DbId,
    pub name: Option<String>,
    pub experience: ExperienceLevel,
    pub cars: Vec<CarBrief>,
}

/// DTO for creating a new user at registration.
#[derive(Debug)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

/// Per-user contribution counts shown on the profile page.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ProfileCounts {
    pub track_reviews: i64,
    pub lap_records: i64,
    pub tracks: i64,
    pub zone_tips: i64,
}

/// Full profile aggregate: identity, garage, and contribution counts.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: DbId,
    pub name: Option<String>,
    pub email: String,
    pub experience: ExperienceLevel,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub cars: Vec<CarWithMods>,
    #[serde(rename = "_count")]
    pub count: ProfileCounts,
}
