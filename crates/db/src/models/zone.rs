//! Track zone and zone tip models.
//!
//! Zone positions are percentage offsets on the track's layout image, so a
//! zone renders at the same spot regardless of the displayed image size.

use serde::Serialize;
use sqlx::FromRow;
use trackside_core::enums::{DrivingCondition, EventType};
use trackside_core::types::{DbId, Timestamp};

use crate::models::user::UserBrief;

/// Track zone row from the `track_zones` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TrackZone {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub pos_x: f64,
    pub pos_y: f64,
    pub track_id: DbId,
    pub event_type: Option<EventType>,
    pub created_at: Timestamp,
}

/// Zone tip row from the `zone_tips` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ZoneTip {
    pub id: DbId,
    pub content: String,
    pub conditions: Option<DrivingCondition>,
    pub zone_id: DbId,
    pub author_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A tip with its author's identity attached.
#[derive(Debug, Clone, Serialize)]
pub struct ZoneTipWithAuthor {
    #[serde(flatten)]
    pub tip: ZoneTip,
    pub author: UserBrief,
}

/// A zone with all of its tips, the shape used in track detail.
#[derive(Debug, Clone, Serialize)]
pub struct TrackZoneWithTips {
    #[serde(flatten)]
    pub zone: TrackZone,
    pub tips: Vec<ZoneTipWithAuthor>,
}

/// DTO for creating a zone. Position is fixed at creation.
#[derive(Debug)]
pub struct CreateTrackZone {
    pub track_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub pos_x: f64,
    pub pos_y: f64,
    pub event_type: Option<EventType>,
}

/// DTO for editing a zone's text fields. Only non-`None` fields are applied.
#[derive(Debug, Default)]
pub struct UpdateTrackZone {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// DTO for creating a tip on a zone.
#[derive(Debug)]
pub struct CreateZoneTip {
    pub zone_id: DbId,
    pub author_id: DbId,
    pub content: String,
    pub conditions: Option<DrivingCondition>,
}
