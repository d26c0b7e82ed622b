//! Navigation decisions for the client router.

use axum::extract::Query;
use axum::Json;
use campus_core::access::{resolve_route, RouteDecision};
use campus_core::session::SessionState;
use serde::{Deserialize, Serialize};

use crate::middleware::auth::MaybeAuthUser;
use crate::response::DataResponse;

#[derive(Debug, Deserialize)]
pub struct ResolveParams {
    pub path: String,
}

#[derive(Debug, Serialize)]
pub struct NavigationResponse {
    pub path: String,
    pub decision: RouteDecision,
    /// Target of a redirect decision.
    pub redirect_to: Option<&'static str>,
    pub session: SessionState,
}

/// GET /api/v1/navigation/resolve?path=
///
/// What the client should render for `path` given the optional bearer token.
/// A missing or invalid token resolves as anonymous.
pub async fn resolve(
    user: MaybeAuthUser,
    Query(params): Query<ResolveParams>,
) -> Json<DataResponse<NavigationResponse>> {
    let session = user.session();
    let decision = resolve_route(&session, &params.path);

    Json(DataResponse::new(NavigationResponse {
        path: params.path,
        decision,
        redirect_to: decision.redirect_path(),
        session,
    }))
}
