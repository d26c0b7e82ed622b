//! Route definitions for the `/admin` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::profiles;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// All routes require the `admin` role (enforced by handler extractors).
///
/// ```text
/// GET  /users                    -> list_users
/// POST /users                    -> create_user
/// GET  /users/{id}               -> get_user
/// PUT  /users/{id}               -> update_user
/// POST /users/{id}/deactivate    -> deactivate_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/users",
            get(profiles::list_users).post(profiles::create_user),
        )
        .route(
            "/users/{id}",
            get(profiles::get_user).put(profiles::update_user),
        )
        .route("/users/{id}/deactivate", post(profiles::deactivate_user))
}
