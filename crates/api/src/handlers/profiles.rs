//! Handlers for profiles: the staff student roster and admin user management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::error::CoreError;
use campus_core::roles::Role;
use campus_core::types::DbId;
use campus_db::models::profile::{CreateProfile, Profile, ProfileUpdate};
use campus_db::repositories::{ProfileRepo, SessionRepo};
use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireStaff};
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StudentListParams {
    pub class_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RoleFilterParams {
    pub role: Option<Role>,
}

/// Request body for `POST /admin/users`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: Role,
    pub class_id: Option<String>,
    pub student_id: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
}

fn default_role() -> Role {
    Role::Student
}

/// GET /api/v1/students?class_id=
///
/// Active students by name, optionally within one class.
pub async fn list_students(
    RequireStaff(_user): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<StudentListParams>,
) -> AppResult<Json<DataResponse<Vec<Profile>>>> {
    let students = ProfileRepo::list_students(&state.pool, params.class_id.as_deref()).await?;
    tracing::debug!(count = students.len(), "Listed students");
    Ok(Json(DataResponse::new(students)))
}

/// GET /api/v1/admin/users?role=&limit=&offset=
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(filter): Query<RoleFilterParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Profile>>>> {
    let (limit, offset) = page.resolve();
    let users = ProfileRepo::list(&state.pool, filter.role, limit, offset).await?;
    Ok(Json(DataResponse::new(users)))
}

/// POST /api/v1/admin/users
///
/// Create an account with a hashed password. Duplicate emails yield 409.
pub async fn create_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Profile>>)> {
    input.validate()?;
    validate_password_strength(&input.password, MIN_PASSWORD_LENGTH)
        .map_err(AppError::BadRequest)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let profile = ProfileRepo::create(
        &state.pool,
        &CreateProfile {
            full_name: input.full_name.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            password_hash,
            role: input.role,
            class_id: input.class_id,
            student_id: input.student_id,
            department: input.department,
            phone: input.phone,
            enrollment_date: input.enrollment_date,
        },
    )
    .await?;

    tracing::info!(admin_id = admin.user_id, user_id = profile.id, role = %profile.role, "User created");
    Ok((StatusCode::CREATED, Json(DataResponse::new(profile))))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Profile>>> {
    let profile = ProfileRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("Profile", id))?;
    Ok(Json(DataResponse::new(profile)))
}

/// PUT /api/v1/admin/users/{id}
///
/// Apply one tagged edit (`details`, `enrollment`, `role`, `active`).
pub async fn update_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(update): Json<ProfileUpdate>,
) -> AppResult<Json<DataResponse<Profile>>> {
    if let ProfileUpdate::Details { full_name, .. } = &update {
        if full_name.trim().is_empty() {
            return Err(AppError::BadRequest("full_name must not be empty".into()));
        }
    }

    let profile = ProfileRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(CoreError::not_found("Profile", id))?;

    tracing::info!(admin_id = admin.user_id, user_id = id, "User updated");
    Ok(Json(DataResponse::new(profile)))
}

/// POST /api/v1/admin/users/{id}/deactivate
///
/// Soft-deactivate an account and revoke its sessions. Admins cannot
/// deactivate themselves.
pub async fn deactivate_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::BadRequest(
            "Admins cannot deactivate their own account".into(),
        ));
    }
    if !ProfileRepo::deactivate(&state.pool, id).await? {
        return Err(CoreError::not_found("Profile", id).into());
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    tracing::info!(admin_id = admin.user_id, user_id = id, "User deactivated");
    Ok(StatusCode::NO_CONTENT)
}
