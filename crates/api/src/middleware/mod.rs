//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller, from a JWT Bearer token.
//! - [`auth::MaybeAuthUser`] -- the caller if a valid token was sent.
//! - [`rbac::RequireAdmin`] -- requires the `admin` role.
//! - [`rbac::RequireStaff`] -- requires `teacher` or `admin`.

pub mod auth;
pub mod rbac;
