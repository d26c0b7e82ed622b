//! Route definitions for the `/schedules` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::schedules;
use crate::state::AppState;

/// Routes mounted at `/schedules`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create (admin)
/// POST   /bulk                -> bulk_create (admin)
/// GET    /day/{day}           -> for_day
/// GET    /today               -> today
/// GET    /class               -> class_wide
/// GET    /free-slots/{day}    -> free_slots_for_day
/// POST   /conflicts           -> check_conflicts
/// PATCH  /{id}                -> update (admin)
/// DELETE /{id}                -> delete (admin)
/// POST   /{id}/deactivate     -> deactivate (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(schedules::list).post(schedules::create))
        .route("/bulk", post(schedules::bulk_create))
        .route("/day/{day}", get(schedules::for_day))
        .route("/today", get(schedules::today))
        .route("/class", get(schedules::class_wide))
        .route("/free-slots/{day}", get(schedules::free_slots_for_day))
        .route("/conflicts", post(schedules::check_conflicts))
        .route(
            "/{id}",
            patch(schedules::update).delete(schedules::delete),
        )
        .route("/{id}/deactivate", post(schedules::deactivate))
}
