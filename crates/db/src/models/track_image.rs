//! Track gallery image models. Only the URL returned by the upload
//! collaborator is persisted; file bytes never pass through this layer.

use serde::Serialize;
use sqlx::FromRow;
use trackside_core::types::{DbId, Timestamp};

use crate::models::user::UserBrief;

/// Track image row from the `track_images` table.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TrackImage {
    pub id: DbId,
    pub url: String,
    pub caption: Option<String>,
    pub track_id: DbId,
    pub uploaded_by_id: DbId,
    pub created_at: Timestamp,
}

/// Gallery entry with the uploader's identity.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackImageWithUploader {
    pub id: DbId,
    pub url: String,
    pub caption: Option<String>,
    pub created_at: Timestamp,
    pub uploaded_by: UserBrief,
}

/// DTO for attaching an image to a track.
#[derive(Debug)]
pub struct CreateTrackImage {
    pub track_id: DbId,
    pub uploaded_by_id: DbId,
    pub url: String,
    pub caption: Option<String>,
}
