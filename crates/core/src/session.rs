//! Client session lifecycle.
//!
//! The state is an explicit value handed to whoever needs it (route
//! resolution, the `/navigation/resolve` endpoint); nothing global holds it.

use serde::Serialize;

use crate::roles::Role;
use crate::types::DbId;

/// Where a client is in the sign-in lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// The app has started and the stored session is still being checked.
    Initializing,
    /// No valid session.
    Anonymous,
    Authenticated { user_id: DbId, role: Role },
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::Initializing
    }
}

impl SessionState {
    /// Result of resolving a stored token: a profile when it was valid.
    pub fn resolved(profile: Option<(DbId, Role)>) -> Self {
        match profile {
            Some((user_id, role)) => SessionState::Authenticated { user_id, role },
            None => SessionState::Anonymous,
        }
    }

    /// Apply an auth change (sign-in, token refresh, profile reload).
    pub fn on_auth_change(self, profile: Option<(DbId, Role)>) -> Self {
        Self::resolved(profile)
    }

    /// Tear down to anonymous.
    pub fn sign_out(self) -> Self {
        SessionState::Anonymous
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Initializing)
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            SessionState::Authenticated { role, .. } => Some(*role),
            _ => None,
        }
    }

    pub fn user_id(&self) -> Option<DbId> {
        match self {
            SessionState::Authenticated { user_id, .. } => Some(*user_id),
            _ => None,
        }
    }
}
