//! Route definitions for the `/attendance` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::attendance;
use crate::state::AppState;

/// Routes mounted at `/attendance`.
///
/// ```text
/// POST   /check-in        -> check_in
/// POST   /mark            -> mark (staff)
/// POST   /bulk            -> bulk_mark (staff)
/// GET    /history         -> history
/// GET    /today           -> today_record
/// GET    /stats           -> stats
/// GET    /class-summary   -> class_summary (staff)
/// PATCH  /{id}            -> update (staff)
/// DELETE /{id}            -> delete (staff)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/check-in", post(attendance::check_in))
        .route("/mark", post(attendance::mark))
        .route("/bulk", post(attendance::bulk_mark))
        .route("/history", get(attendance::history))
        .route("/today", get(attendance::today_record))
        .route("/stats", get(attendance::stats))
        .route("/class-summary", get(attendance::class_summary))
        .route(
            "/{id}",
            patch(attendance::update).delete(attendance::delete),
        )
}
