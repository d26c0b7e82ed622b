//! Route definitions for the `/reports` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET    /              -> list
/// POST   /attendance    -> generate_attendance (admin)
/// POST   /grades        -> generate_grades (admin)
/// POST   /tasks         -> generate_tasks (admin)
/// GET    /{id}          -> get
/// DELETE /{id}          -> delete (admin)
/// GET    /{id}/csv      -> export_csv
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(reports::list))
        .route("/attendance", post(reports::generate_attendance))
        .route("/grades", post(reports::generate_grades))
        .route("/tasks", post(reports::generate_tasks))
        .route("/{id}", get(reports::get).delete(reports::delete))
        .route("/{id}/csv", get(reports::export_csv))
}
