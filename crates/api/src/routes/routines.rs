use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::routines;
use crate::state::AppState;

/// Routes mounted at `/routines`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /today   -> today
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(routines::list).post(routines::create))
        .route("/today", get(routines::today))
        .route("/{id}", patch(routines::update).delete(routines::delete))
}
