//! Lap record models: one timed lap with optional telemetry (tire
//! pressures, suspension alignment, fuel).

use serde::Serialize;
use sqlx::FromRow;
use trackside_core::enums::{DrivingCondition, EventType};
use trackside_core::types::{DbId, Timestamp};

use crate::models::car::CarSummary;
use crate::models::track::{TrackBrief, TrackEvent};

/// Lap record row from the `lap_records` table.
///
/// `lap_time` is an opaque formatted string (e.g. "1:42.856"); it is never
/// parsed as a duration. All telemetry fields are independently optional.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LapRecord {
    pub id: DbId,
    pub lap_time: String,
    pub conditions: DrivingCondition,
    pub notes: Option<String>,
    #[serde(rename = "tirePressureFL")]
    pub tire_pressure_fl: Option<f64>,
    #[serde(rename = "tirePressureFR")]
    pub tire_pressure_fr: Option<f64>,
    #[serde(rename = "tirePressureRL")]
    pub tire_pressure_rl: Option<f64>,
    #[serde(rename = "tirePressureRR")]
    pub tire_pressure_rr: Option<f64>,
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
    pub driver_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A lap record with denormalized track/car/event summaries, the shape
/// every lap-book read returns.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LapRecordWithDetails {
    #[serde(flatten)]
    pub record: LapRecord,
    pub track: TrackBrief,
    pub track_event: Option<TrackEvent>,
    pub car: CarSummary,
}

/// Filters for the lap-book listing; always scoped to one driver.
#[derive(Debug, Default)]
pub struct LapRecordFilter {
    pub track_id: Option<DbId>,
    pub car_id: Option<DbId>,
    pub event_type: Option<EventType>,
}

/// DTO for creating a lap record.
#[derive(Debug)]
pub struct CreateLapRecord {
    pub driver_id: DbId,
    pub track_id: DbId,
    pub track_event_id: Option<DbId>,
    pub car_id: DbId,
    pub lap_time: String,
    pub conditions: DrivingCondition,
    pub notes: Option<String>,
    pub tire_pressure_fl: Option<f64>,
    pub tire_pressure_fr: Option<f64>,
    pub tire_pressure_rl: Option<f64>,
    pub tire_pressure_rr: Option<f64>,
    pub fuel_level: Option<f64>,
    pub camber_fl: Option<f64>,
    pub camber_fr: Option<f64>,
    pub camber_rl: Option<f64>,
    pub camber_rr: Option<f64>,
    pub caster_fl: Option<f64>,
    pub caster_fr: Option<f64>,
    pub toe_fl: Option<f64>,
    pub toe_fr: Option<f64>,
    pub toe_rl: Option<f64>,
    pub toe_rr: Option<f64>,
}
