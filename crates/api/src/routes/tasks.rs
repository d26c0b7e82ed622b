//! Route definitions for the `/tasks` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /                -> list
/// POST   /                -> create (staff)
/// GET    /assigned        -> list_assigned (staff)
/// GET    /stats           -> stats
/// PATCH  /{id}            -> update
/// DELETE /{id}            -> delete (staff)
/// POST   /{id}/complete   -> complete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tasks::list).post(tasks::create))
        .route("/assigned", get(tasks::list_assigned))
        .route("/stats", get(tasks::stats))
        .route("/{id}", patch(tasks::update).delete(tasks::delete))
        .route("/{id}/complete", post(tasks::complete))
}
