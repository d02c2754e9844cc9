//! Route definitions for the garage.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{car_mods, cars};
use crate::state::AppState;

/// Routes mounted at `/cars`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// PUT    /{id}                -> update
/// DELETE /{id}                -> delete
/// POST   /{id}/mods           -> create mod
/// DELETE /{id}/mods/{modId}   -> delete mod
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cars::list).post(cars::create))
        .route("/{id}", put(cars::update).delete(cars::delete))
        .route("/{id}/mods", post(car_mods::create))
        .route("/{id}/mods/{mod_id}", delete(car_mods::delete))
}
