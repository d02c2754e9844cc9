//! Route definitions for admin operations.

use axum::routing::post;
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST /sync-tracks -> bulk import
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/sync-tracks", post(admin::sync_tracks))
}
