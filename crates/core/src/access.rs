//! Access control: the client route table and the data authorization policy.
//!
//! Two separate layers live here:
//!
//! - [`resolve_route`] decides what a client should render for a path given
//!   its [`SessionState`]. It only shapes navigation and protects nothing.
//! - [`authorize`] is the server-side policy every data operation passes
//!   through, keyed on `(role, resource, operation, scope)`.

use serde::Serialize;

use crate::error::CoreError;
use crate::roles::Role;
use crate::session::SessionState;
use crate::string_enum;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Client routes
// ---------------------------------------------------------------------------

/// Where the client lands when it lacks a session.
pub const LOGIN_PATH: &str = "/login";

/// Where the client lands when its role is not allowed on a route.
pub const DASHBOARD_PATH: &str = "/dashboard";

const STAFF: &[Role] = &[Role::Teacher, Role::Admin];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// Who may open a client route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    /// Any signed-in role.
    Authenticated,
    /// Signed in with one of these roles.
    Roles(&'static [Role]),
}

/// Every known client path.
pub const ROUTES: &[(&str, RouteAccess)] = &[
    ("/", RouteAccess::Public),
    ("/login", RouteAccess::Public),
    ("/dashboard", RouteAccess::Authenticated),
    ("/attendance", RouteAccess::Authenticated),
    ("/tasks", RouteAccess::Authenticated),
    ("/routine", RouteAccess::Authenticated),
    ("/grades", RouteAccess::Authenticated),
    ("/mark-attendance", RouteAccess::Roles(STAFF)),
    ("/manage-grades", RouteAccess::Roles(STAFF)),
    ("/assign-tasks", RouteAccess::Roles(STAFF)),
    ("/students", RouteAccess::Roles(STAFF)),
    ("/users", RouteAccess::Roles(ADMIN_ONLY)),
    ("/schedules", RouteAccess::Roles(ADMIN_ONLY)),
    ("/reports", RouteAccess::Roles(ADMIN_ONLY)),
    ("/settings", RouteAccess::Roles(ADMIN_ONLY)),
];

/// What the client should do with a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteDecision {
    /// Session still resolving; show a spinner.
    Loading,
    RedirectToLogin,
    RedirectToDashboard,
    NotFound,
    Allow,
}

impl RouteDecision {
    /// Target path of a redirect.
    pub fn redirect_path(&self) -> Option<&'static str> {
        match self {
            RouteDecision::RedirectToLogin => Some(LOGIN_PATH),
            RouteDecision::RedirectToDashboard => Some(DASHBOARD_PATH),
            _ => None,
        }
    }
}

/// Strip any query or fragment and a trailing slash (except on `/`).
fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => path,
    }
}

/// Look up the access rule for a client path.
pub fn route_access(path: &str) -> Option<RouteAccess> {
    let path = normalize_path(path);
    ROUTES
        .iter()
        .find(|(route, _)| *route == path)
        .map(|(_, access)| *access)
}

/// Decide what the client should render for `path`.
pub fn resolve_route(session: &SessionState, path: &str) -> RouteDecision {
    let Some(access) = route_access(path) else {
        return RouteDecision::NotFound;
    };
    if access == RouteAccess::Public {
        return RouteDecision::Allow;
    }

    let role = match session {
        SessionState::Initializing => return RouteDecision::Loading,
        SessionState::Anonymous => return RouteDecision::RedirectToLogin,
        SessionState::Authenticated { role, .. } => *role,
    };

    match access {
        RouteAccess::Roles(allowed) if !allowed.contains(&role) => {
            RouteDecision::RedirectToDashboard
        }
        _ => RouteDecision::Allow,
    }
}

// ---------------------------------------------------------------------------
// Data authorization
// ---------------------------------------------------------------------------

string_enum! {
    /// A protected kind of record.
    pub enum Resource ("resource") {
        Profile => "profile",
        Attendance => "attendance",
        Grade => "grade",
        Task => "task",
        Schedule => "schedule",
        Achievement => "achievement",
        Notification => "notification",
        Report => "report",
        Settings => "settings",
        Routine => "routine",
    }
}

string_enum! {
    pub enum Operation ("operation") {
        Read => "read",
        Create => "create",
        Update => "update",
        Delete => "delete",
    }
}

/// Whose records an operation touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// The caller's own records.
    Own,
    /// Any user's records. Implies [`Scope::Own`].
    Any,
}

impl Scope {
    /// `Own` when the actor targets themself (or nobody in particular).
    pub fn for_target(actor: DbId, target: Option<DbId>) -> Self {
        match target {
            Some(id) if id != actor => Scope::Any,
            _ => Scope::Own,
        }
    }
}

use Operation::{Create, Delete, Read, Update};
use Resource as R;
use Scope::{Any, Own};

/// Grants for students. Teachers hold these plus [`TEACHER_POLICY`];
/// admins hold every grant.
pub const STUDENT_POLICY: &[(Resource, Operation, Scope)] = &[
    (R::Profile, Read, Own),
    (R::Attendance, Read, Own),
    (R::Attendance, Create, Own),
    (R::Grade, Read, Own),
    (R::Task, Read, Own),
    (R::Task, Update, Own),
    (R::Schedule, Read, Own),
    (R::Notification, Read, Own),
    (R::Notification, Update, Own),
    (R::Achievement, Read, Own),
    (R::Achievement, Create, Own),
    (R::Routine, Read, Own),
    (R::Routine, Create, Own),
    (R::Routine, Update, Own),
    (R::Routine, Delete, Own),
    (R::Settings, Read, Own),
    (R::Settings, Update, Own),
];

/// Grants teachers hold on top of [`STUDENT_POLICY`].
pub const TEACHER_POLICY: &[(Resource, Operation, Scope)] = &[
    (R::Profile, Read, Any),
    (R::Attendance, Read, Any),
    (R::Attendance, Create, Any),
    (R::Attendance, Update, Any),
    (R::Attendance, Delete, Any),
    (R::Grade, Read, Any),
    (R::Grade, Create, Any),
    (R::Grade, Update, Any),
    (R::Grade, Delete, Any),
    (R::Task, Read, Any),
    (R::Task, Create, Any),
    (R::Task, Update, Any),
    (R::Task, Delete, Any),
    (R::Schedule, Read, Any),
    (R::Notification, Create, Any),
    (R::Achievement, Read, Any),
    (R::Report, Read, Any),
];

/// Widest scope `role` holds for `(resource, operation)`, if any.
pub fn granted_scope(role: Role, resource: Resource, operation: Operation) -> Option<Scope> {
    let lookup = |table: &[(Resource, Operation, Scope)]| {
        table
            .iter()
            .filter(|(r, o, _)| *r == resource && *o == operation)
            .map(|(_, _, scope)| *scope)
            .max()
    };

    match role {
        Role::Admin => Some(Scope::Any),
        Role::Teacher => lookup(TEACHER_POLICY).max(lookup(STUDENT_POLICY)),
        Role::Student => lookup(STUDENT_POLICY),
    }
}

/// Check the policy, returning [`CoreError::Forbidden`] on denial.
pub fn authorize(
    role: Role,
    resource: Resource,
    operation: Operation,
    scope: Scope,
) -> Result<(), CoreError> {
    match granted_scope(role, resource, operation) {
        Some(granted) if granted >= scope => Ok(()),
        _ => Err(CoreError::Forbidden(match scope {
            Scope::Own => format!("Role '{role}' may not {operation} {resource} records"),
            Scope::Any => {
                format!("Role '{role}' may not {operation} other users' {resource} records")
            }
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn signed_in(role: Role) -> SessionState {
        SessionState::Authenticated { user_id: 1, role }
    }

    // -----------------------------------------------------------------------
    // Routes
    // -----------------------------------------------------------------------

    #[test]
    fn anonymous_dashboard_redirects_to_login() {
        let decision = resolve_route(&SessionState::Anonymous, "/dashboard");
        assert_eq!(decision, RouteDecision::RedirectToLogin);
        assert_eq!(decision.redirect_path(), Some("/login"));
    }

    #[test]
    fn student_on_admin_route_redirects_to_dashboard() {
        let decision = resolve_route(&signed_in(Role::Student), "/users");
        assert_eq!(decision, RouteDecision::RedirectToDashboard);
        assert_eq!(decision.redirect_path(), Some("/dashboard"));
    }

    #[test]
    fn loading_while_session_resolves() {
        assert_eq!(
            resolve_route(&SessionState::Initializing, "/grades"),
            RouteDecision::Loading
        );
        // Public routes never wait.
        assert_eq!(
            resolve_route(&SessionState::Initializing, "/login"),
            RouteDecision::Allow
        );
    }

    #[test]
    fn unknown_path_is_not_found() {
        assert_eq!(
            resolve_route(&signed_in(Role::Admin), "/nope"),
            RouteDecision::NotFound
        );
        assert_eq!(
            resolve_route(&SessionState::Anonymous, "/nope"),
            RouteDecision::NotFound
        );
    }

    #[test]
    fn staff_routes() {
        assert_eq!(
            resolve_route(&signed_in(Role::Teacher), "/mark-attendance"),
            RouteDecision::Allow
        );
        assert_eq!(
            resolve_route(&signed_in(Role::Teacher), "/reports"),
            RouteDecision::RedirectToDashboard
        );
        assert_eq!(
            resolve_route(&signed_in(Role::Admin), "/students/"),
            RouteDecision::Allow
        );
    }

    #[test]
    fn query_string_is_ignored() {
        assert_eq!(
            resolve_route(&signed_in(Role::Student), "/tasks?filter=pending"),
            RouteDecision::Allow
        );
    }

    // -----------------------------------------------------------------------
    // Policy
    // -----------------------------------------------------------------------

    #[test]
    fn student_reads_own_grades_only() {
        assert!(authorize(Role::Student, Resource::Grade, Read, Own).is_ok());
        assert_matches!(
            authorize(Role::Student, Resource::Grade, Read, Any),
            Err(CoreError::Forbidden(_))
        );
        assert_matches!(
            authorize(Role::Student, Resource::Grade, Create, Own),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn teacher_inherits_student_grants() {
        assert!(authorize(Role::Teacher, Resource::Routine, Create, Own).is_ok());
        assert!(authorize(Role::Teacher, Resource::Settings, Update, Own).is_ok());
        assert!(authorize(Role::Teacher, Resource::Attendance, Create, Any).is_ok());
    }

    #[test]
    fn teacher_cannot_manage_schedules_or_reports() {
        assert!(authorize(Role::Teacher, Resource::Schedule, Create, Any).is_err());
        assert!(authorize(Role::Teacher, Resource::Report, Create, Any).is_err());
        assert!(authorize(Role::Teacher, Resource::Report, Read, Any).is_ok());
    }

    #[test]
    fn admin_may_do_anything() {
        for resource in Resource::ALL {
            for operation in Operation::ALL {
                assert!(authorize(Role::Admin, *resource, *operation, Any).is_ok());
            }
        }
    }

    #[test]
    fn any_scope_implies_own() {
        assert!(authorize(Role::Teacher, Resource::Report, Read, Own).is_ok());
    }

    #[test]
    fn scope_for_target() {
        assert_eq!(Scope::for_target(5, None), Own);
        assert_eq!(Scope::for_target(5, Some(5)), Own);
        assert_eq!(Scope::for_target(5, Some(6)), Any);
    }
}
