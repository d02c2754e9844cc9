//! Car and car-mod entity models and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use trackside_core::enums::ModCategory;
use trackside_core::types::{DbId, Timestamp};

/// Car row from the `cars` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: DbId,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub user_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Car mod row from the `car_mods` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CarMod {
    pub id: DbId,
    pub name: String,
    pub category: ModCategory,
    pub notes: Option<String>,
    pub car_id: DbId,
}

/// A car together with its mods, the shape every car read returns.
#[derive(Debug, Clone, Serialize)]
pub struct CarWithMods {
    #[serde(flatten)]
    pub car: Car,
    pub mods: Vec<CarMod>,
}

/// Make/model/year summary shown next to a review author.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CarBrief {
    pub make: String,
    pub model: String,
    pub year: i32,
}

/// Identified car summary attached to lap records.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CarSummary {
    pub id: DbId,
    pub make: String,
    pub model: String,
    pub year: i32,
}

/// DTO for creating a car.
#[derive(Debug)]
pub struct CreateCar {
    pub user_id: DbId,
    pub make: String,
    pub model: String,
    pub year: i32,
}

/// DTO for creating a car mod.
#[derive(Debug)]
pub struct CreateCarMod {
    pub car_id: DbId,
    pub name: String,
    pub category: ModCategory,
    pub notes: Option<String>,
}
