//! Route definitions for the `/grades` resource.

use axum::routing::{get, patch};
use axum::Router;

use crate::handlers::grades;
use crate::state::AppState;

/// Routes mounted at `/grades`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create (staff)
/// GET    /stats               -> stats
/// GET    /subject/{subject}   -> by_subject
/// GET    /class?subject=      -> class_grades (staff)
/// PATCH  /{id}                -> update (staff)
/// DELETE /{id}                -> delete (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(grades::list).post(grades::create))
        .route("/stats", get(grades::stats))
        .route("/subject/{subject}", get(grades::by_subject))
        .route("/class", get(grades::class_grades))
        .route("/{id}", patch(grades::update).delete(grades::delete))
}
