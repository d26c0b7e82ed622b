//! Handlers for assigned tasks.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::access::{Operation, Resource};
use campus_core::error::CoreError;
use campus_core::notifications::NotificationType;
use campus_core::tasks::{compute_stats, TaskStats, TaskStatus};
use campus_core::types::DbId;
use campus_db::models::task::{CreateTask, Task, TaskUpdate};
use campus_db::repositories::{NotificationRepo, TaskRepo};
use chrono::Utc;
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::TargetUserParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TaskStatusParams {
    pub status: Option<TaskStatus>,
}

async fn load(state: &AppState, id: DbId) -> AppResult<Task> {
    Ok(TaskRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("Task", id))?)
}

/// GET /api/v1/tasks?status=&user_id=
///
/// Tasks assigned to a user, soonest due first.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(target): Query<TargetUserParams>,
    Query(params): Query<TaskStatusParams>,
) -> AppResult<Json<DataResponse<Vec<Task>>>> {
    let user_id = user.authorize(Resource::Task, Operation::Read, target.user_id)?;
    let tasks = TaskRepo::list_for_user(&state.pool, user_id, params.status).await?;
    tracing::debug!(user_id, count = tasks.len(), "Listed tasks");
    Ok(Json(DataResponse::new(tasks)))
}

/// GET /api/v1/tasks/assigned
///
/// Tasks the calling staff member handed out.
pub async fn list_assigned(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Task>>>> {
    let tasks = TaskRepo::list_assigned_by(&state.pool, staff.user_id).await?;
    Ok(Json(DataResponse::new(tasks)))
}

/// GET /api/v1/tasks/stats?user_id=
pub async fn stats(
    State(state): State<AppState>,
    user: AuthUser,
    Query(target): Query<TargetUserParams>,
) -> AppResult<Json<DataResponse<TaskStats>>> {
    let user_id = user.authorize(Resource::Task, Operation::Read, target.user_id)?;
    let tasks = TaskRepo::list_for_user(&state.pool, user_id, None).await?;
    let stats = compute_stats(tasks.iter().map(|t| (t.status, t.due_date)), Utc::now());
    Ok(Json(DataResponse::new(stats)))
}

/// POST /api/v1/tasks
pub async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<DataResponse<Task>>)> {
    staff.authorize(Resource::Task, Operation::Create, Some(input.assigned_to))?;
    input.validate()?;

    let task = TaskRepo::create(&state.pool, staff.user_id, &input).await?;

    if let Err(e) = NotificationRepo::notify(
        &state.pool,
        task.assigned_to,
        NotificationType::Task,
        "New task assigned",
        &task.title,
    )
    .await
    {
        tracing::warn!(error = %e, task_id = task.id, "Failed to notify assignee");
    }

    tracing::info!(
        assigned_by = staff.user_id,
        assigned_to = task.assigned_to,
        task_id = task.id,
        "Task assigned",
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(task))))
}

/// PATCH /api/v1/tasks/{id}
///
/// Staff may apply any edit. The assignee may only change the status.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(update): Json<TaskUpdate>,
) -> AppResult<Json<DataResponse<Task>>> {
    let existing = load(&state, id).await?;
    user.authorize_owned(Resource::Task, Operation::Update, existing.assigned_to)?;
    if !user.role.is_staff() && !update.is_status_change() {
        return Err(CoreError::Forbidden("Only the task status may be changed".into()).into());
    }

    let task = TaskRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(CoreError::not_found("Task", id))?;

    tracing::info!(user_id = user.user_id, task_id = id, status = %task.status, "Task updated");
    Ok(Json(DataResponse::new(task)))
}

/// POST /api/v1/tasks/{id}/complete
pub async fn complete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Task>>> {
    let existing = load(&state, id).await?;
    user.authorize_owned(Resource::Task, Operation::Update, existing.assigned_to)?;

    let task = TaskRepo::complete(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("Task", id))?;

    tracing::info!(user_id = user.user_id, task_id = id, "Task completed");
    Ok(Json(DataResponse::new(task)))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = load(&state, id).await?;
    staff.authorize_owned(Resource::Task, Operation::Delete, existing.assigned_to)?;

    TaskRepo::delete(&state.pool, id).await?;
    tracing::info!(staff_id = staff.user_id, task_id = id, "Task deleted");
    Ok(StatusCode::NO_CONTENT)
}
