use axum::routing::{get, post};
use axum::Router;

use crate::handlers::achievements;
use crate::state::AppState;

/// Routes mounted at `/achievements`.
///
/// ```text
/// GET  /                    -> list
/// GET  /points              -> points
/// POST /check/attendance    -> check_attendance
/// POST /check/academic      -> check_academic
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(achievements::list))
        .route("/points", get(achievements::points))
        .route("/check/attendance", post(achievements::check_attendance))
        .route("/check/academic", post(achievements::check_academic))
}
