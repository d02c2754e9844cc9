//! Route definitions for the lap book.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::lapbook;
use crate::state::AppState;

/// Routes mounted at `/lapbook`.
///
/// ```text
/// GET    /       -> list (driver-scoped)
/// POST   /       -> create
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lapbook::list).post(lapbook::create))
        .route("/{id}", delete(lapbook::delete))
}
