use axum::routing::get;
use axum::Router;

use crate::handlers::navigation;
use crate::state::AppState;

/// Routes mounted at `/navigation`. Public; a bearer token is optional.
///
/// ```text
/// GET /resolve?path=  -> resolve
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/resolve", get(navigation::resolve))
}
