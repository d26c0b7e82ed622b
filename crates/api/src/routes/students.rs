use axum::routing::get;
use axum::Router;

use crate::handlers::profiles;
use crate::state::AppState;

/// Routes mounted at `/students` (staff only).
///
/// ```text
/// GET /?class_id=  -> list_students
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(profiles::list_students))
}
