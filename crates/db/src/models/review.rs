//! Track review models.

use serde::Serialize;
use sqlx::FromRow;
use trackside_core::enums::DrivingCondition;
use trackside_core::types::{DbId, Timestamp};

use crate::models::track::TrackEvent;
use crate::models::user::UserWithCars;

/// Track review row from the `track_reviews` table. Immutable after
/// creation.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TrackReview {
    pub id: DbId,
    pub rating: i32,
    pub content: Option<String>,
    pub conditions: DrivingCondition,
    pub track_id: DbId,
    pub track_event_id: Option<DbId>,
    pub author_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A review with its author (identity, experience, garage) and the
/// resolved track event, if one was referenced.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewWithAuthor {
    #[serde(flatten)]
    pub review: TrackReview,
    pub author: UserWithCars,
    pub track_event: Option<TrackEvent>,
}

/// DTO for creating a review.
#[derive(Debug)]
pub struct CreateTrackReview {
    pub track_id: DbId,
    pub author_id: DbId,
    pub rating: i32,
    pub content: Option<String>,
    pub conditions: DrivingCondition,
    pub track_event_id: Option<DbId>,
}
