//! Track entity models and read-side aggregates.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trackside_core::enums::{EventType, TrackStatus};
use trackside_core::types::{DbId, Timestamp};

use crate::models::review::ReviewWithAuthor;
use crate::models::user::{UserBrief, UserWithExperience};
use crate::models::zone::TrackZoneWithTips;

/// Track row from the `tracks` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: DbId,
    pub name: String,
    pub location: String,
    pub state: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: TrackStatus,
    pub is_imported: bool,
    pub uploaded_by_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Track event row from the `track_events` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TrackEvent {
    pub id: DbId,
    pub event_type: EventType,
    pub track_id: DbId,
}

/// Id/name/location summary attached to lap records.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TrackBrief {
    pub id: DbId,
    pub name: String,
    pub location: String,
}

/// Counts of associated rows, recomputed on every read.
#[derive(Debug, Clone, Default, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TrackCounts {
    pub reviews: i64,
    pub zones: i64,
    pub lap_records: i64,
}

/// One entry of the public track listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackListItem {
    #[serde(flatten)]
    pub track: Track,
    pub events: Vec<TrackEvent>,
    pub uploaded_by: UserBrief,
    #[serde(rename = "_count")]
    pub count: TrackCounts,
    pub avg_rating: f64,
}

/// The full track detail aggregate: events, zones with tips and tip
/// authors, reviews with author identity/experience/garage, uploader,
/// counts, and average rating.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackDetail {
    #[serde(flatten)]
    pub track: Track,
    pub events: Vec<TrackEvent>,
    pub uploaded_by: UserWithExperience,
    pub zones: Vec<TrackZoneWithTips>,
    pub reviews: Vec<ReviewWithAuthor>,
    #[serde(rename = "_count")]
    pub count: TrackCounts,
    pub avg_rating: f64,
}

/// Filters accepted by the public listing. Absent fields impose no
/// constraint.
#[derive(Debug, Default)]
pub struct TrackFilter {
    pub search: Option<String>,
    pub event_type: Option<EventType>,
    pub state: Option<String>,
}

/// DTO for creating a track together with its initial events.
#[derive(Debug)]
pub struct CreateTrack {
    pub uploaded_by_id: DbId,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub event_types: Vec<EventType>,
}

/// DTO for patching track-level fields. Only non-`None` fields are applied.
#[derive(Debug, Default)]
pub struct UpdateTrack {
    pub name: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
}

/// One entry of the bulk track-import data file, as it appears on disk.
/// Event types arrive as free-form strings and are resolved against the
/// canonical [`EventType`] set before anything is written.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportedTrack {
    pub name: String,
    pub location: String,
    pub state: String,
    pub types: Vec<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
}

/// A validated import entry ready to be upserted.
#[derive(Debug)]
pub struct ImportTrack {
    pub name: String,
    pub location: String,
    pub state: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    pub event_types: Vec<EventType>,
}
