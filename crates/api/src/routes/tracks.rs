//! Route definitions for tracks and their nested resources (images,
//! reviews, zones, tips).

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::{track_images, track_reviews, track_zones, tracks, zone_tips};
use crate::state::AppState;

/// Routes mounted at `/tracks`.
///
/// ```text
/// GET    /                            -> list (public)
/// POST   /                            -> create
/// GET    /{id}                        -> detail (public)
/// PATCH  /{id}                        -> update (uploader only)
/// GET    /{id}/images                 -> gallery (public)
/// POST   /{id}/images                 -> add image
/// DELETE /{id}/images                 -> remove image (?imageId=)
/// POST   /{id}/reviews                -> create review
/// POST   /{id}/zones                  -> create zone
/// PATCH  /{id}/zones/{zoneId}         -> edit zone text
/// DELETE /{id}/zones/{zoneId}         -> delete zone
/// POST   /{id}/zones/{zoneId}/tips    -> add tip
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tracks::list).post(tracks::create))
        .route("/{id}", get(tracks::get_by_id).patch(tracks::update))
        .route(
            "/{id}/images",
            get(track_images::list)
                .post(track_images::create)
                .delete(track_images::delete),
        )
        .route("/{id}/reviews", post(track_reviews::create))
        .route("/{id}/zones", post(track_zones::create))
        .route(
            "/{id}/zones/{zone_id}",
            patch(track_zones::update).delete(track_zones::delete),
        )
        .route("/{id}/zones/{zone_id}/tips", post(zone_tips::create))
}
