//! Role-based access control.
//!
//! The extractors gate whole endpoints by role. Finer decisions (own vs
//! other users' records) go through [`AuthUser::authorize`], which consults
//! the policy table in `campus_core::access`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use campus_core::access::{authorize, Operation, Resource, Scope};
use campus_core::error::CoreError;
use campus_core::roles::Role;
use campus_core::types::DbId;

use super::auth::AuthUser;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

impl AuthUser {
    /// Check `(resource, operation)` for `target` (default: the caller).
    ///
    /// Returns the user id the operation applies to.
    pub fn authorize(
        &self,
        resource: Resource,
        operation: Operation,
        target: Option<DbId>,
    ) -> AppResult<DbId> {
        let scope = Scope::for_target(self.user_id, target);
        authorize(self.role, resource, operation, scope)?;
        Ok(target.unwrap_or(self.user_id))
    }

    /// Check `(resource, operation)` against a record owned by `owner`.
    pub fn authorize_owned(
        &self,
        resource: Resource,
        operation: Operation,
        owner: DbId,
    ) -> AppResult<()> {
        self.authorize(resource, operation, Some(owner)).map(|_| ())
    }
}

/// Requires the `admin` role. Rejects with 403 Forbidden otherwise.
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != Role::Admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}

/// Requires `teacher` or `admin`. Rejects with 403 Forbidden otherwise.
pub struct RequireStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.role.is_staff() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Teacher or Admin role required".into(),
            )));
        }
        Ok(RequireStaff(user))
    }
}
