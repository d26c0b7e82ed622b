use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes mounted at `/settings`.
///
/// ```text
/// GET   /  -> get
/// PUT   /  -> put
/// PATCH /  -> patch
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(settings::get).put(settings::put).patch(settings::patch),
    )
}
