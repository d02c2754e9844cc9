//! Admin handler for the bulk track import.
//!
//! Reads a JSON data file of US tracks and upserts each entry keyed by
//! (name, location). Imported rows are owned by the system account.

use axum::extract::State;
use serde::{Deserialize, Serialize};
use trackside_core::enums::EventType;
use trackside_core::error::CoreError;
use trackside_db::models::track::{ImportTrack, ImportedTrack};
use trackside_db::repositories::{TrackRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::extract::Json;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Shape of the on-disk data file.
#[derive(Debug, Deserialize)]
struct TracksDataFile {
    tracks: Vec<ImportedTrack>,
}

/// Per-run import counters.
#[derive(Debug, Default, Serialize)]
pub struct SyncSummary {
    pub total: usize,
    pub created: usize,
    pub updated: usize,
    pub failed: usize,
}

/// Response body for `POST /api/admin/sync-tracks`.
#[derive(Debug, Serialize)]
pub struct SyncTracksResponse {
    pub status: &'static str,
    pub summary: SyncSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

/// POST /api/admin/sync-tracks
///
/// Restricted to admin accounts and the system account itself.
pub async fn sync_tracks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<SyncTracksResponse>> {
    if !auth.email.contains("admin") && auth.email != "system@trackside.local" {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin access required".into(),
        )));
    }

    let path = std::path::Path::new(&state.config.tracks_data_dir).join("usa-tracks.json");
    let data = tokio::fs::read(&path)
        .await
        .map_err(|e| AppError::InternalError(format!("Could not read tracks data file: {e}")))?;

    let file: TracksDataFile = serde_json::from_slice(&data)
        .map_err(|e| AppError::InternalError(format!("Invalid JSON in tracks data file: {e}")))?;

    let system_user = UserRepo::find_or_create_system(&state.pool).await?;

    let mut summary = SyncSummary {
        total: file.tracks.len(),
        ..SyncSummary::default()
    };
    let mut errors = Vec::new();

    for entry in &file.tracks {
        match parse_entry(entry) {
            Ok(import) => {
                match TrackRepo::upsert_imported(&state.pool, &import, system_user.id).await {
                    Ok(true) => summary.created += 1,
                    Ok(false) => summary.updated += 1,
                    Err(e) => {
                        summary.failed += 1;
                        errors.push(format!("{}: {e}", entry.name));
                    }
                }
            }
            Err(reason) => {
                summary.failed += 1;
                errors.push(format!("{}: {reason}", entry.name));
            }
        }
    }

    tracing::info!(
        total = summary.total,
        created = summary.created,
        updated = summary.updated,
        failed = summary.failed,
        "Track sync finished"
    );

    Ok(Json(SyncTracksResponse {
        status: "success",
        summary,
        errors,
    }))
}

/// Resolve a raw file entry against the canonical event-type set.
fn parse_entry(entry: &ImportedTrack) -> Result<ImportTrack, String> {
    let event_types = entry
        .types
        .iter()
        .map(|s| s.parse::<EventType>())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ImportTrack {
        name: entry.name.clone(),
        location: entry.location.clone(),
        state: entry.state.clone(),
        description: entry.description.clone(),
        latitude: entry.latitude,
        longitude: entry.longitude,
        event_types,
    })
}
