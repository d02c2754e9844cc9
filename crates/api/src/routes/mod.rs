//! Route composition.
//!
//! One module per resource, each exposing a `router()` that the top-level
//! [`api_routes`] nests under `/api`.

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

pub mod admin;
pub mod auth;
pub mod cars;
pub mod health;
pub mod lapbook;
pub mod profile;
pub mod tracks;

/// Build the `/api` route tree.
///
/// ```text
/// POST /register                              register (public)
/// POST /auth/login                            login (public)
///
/// GET  /tracks                                listing (public)
/// POST /tracks                                create
/// GET  /tracks/{id}                           detail (public)
/// PATCH /tracks/{id}                          update (uploader only)
/// GET  /tracks/{id}/images                    gallery (public)
/// POST /tracks/{id}/images                    add image
/// DELETE /tracks/{id}/images?imageId=         remove image
/// POST /tracks/{id}/reviews                   review
/// POST /tracks/{id}/zones                     create zone
/// PATCH /tracks/{id}/zones/{zoneId}           edit zone text
/// DELETE /tracks/{id}/zones/{zoneId}          delete zone
/// POST /tracks/{id}/zones/{zoneId}/tips       add tip
///
/// GET/POST /cars, PUT/DELETE /cars/{id}       garage
/// POST /cars/{id}/mods                        add mod
/// DELETE /cars/{id}/mods/{modId}              remove mod
///
/// GET/POST /lapbook, DELETE /lapbook/{id}     lap book
/// GET/PUT /profile                            profile
/// POST /admin/sync-tracks                     bulk import
/// ```
///
/// Authentication is enforced per-handler via the `AuthUser` extractor;
/// handlers without it are public.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::auth::register))
        .nest("/auth", auth::router())
        .nest("/tracks", tracks::router())
        .nest("/cars", cars::router())
        .nest("/lapbook", lapbook::router())
        .nest("/profile", profile::router())
        .nest("/admin", admin::router())
}
