//! Handlers for a user's personal daily routine.
//!
//! Routines are private: every operation is scoped to the caller, and an
//! id owned by someone else is reported as not found.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::access::{Operation, Resource};
use campus_core::error::CoreError;
use campus_core::scheduling::{day_of_week, validate_day_of_week};
use campus_core::types::DbId;
use campus_db::models::daily_routine::{CreateDailyRoutine, DailyRoutine, DailyRoutineUpdate};
use campus_db::repositories::DailyRoutineRepo;
use chrono::Utc;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/routines
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<DailyRoutine>>>> {
    let user_id = user.authorize(Resource::Routine, Operation::Read, None)?;
    let routines = DailyRoutineRepo::list_for_user(&state.pool, user_id).await?;
    Ok(Json(DataResponse::new(routines)))
}

/// GET /api/v1/routines/today
pub async fn today(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<DailyRoutine>>>> {
    let user_id = user.authorize(Resource::Routine, Operation::Read, None)?;
    let day = day_of_week(Utc::now().date_naive());
    let routines = DailyRoutineRepo::list_for_day(&state.pool, user_id, day).await?;
    Ok(Json(DataResponse::new(routines)))
}

/// POST /api/v1/routines
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateDailyRoutine>,
) -> AppResult<(StatusCode, Json<DataResponse<DailyRoutine>>)> {
    let user_id = user.authorize(Resource::Routine, Operation::Create, None)?;
    input.validate()?;

    let routine = DailyRoutineRepo::create(&state.pool, user_id, &input).await?;
    tracing::info!(user_id, routine_id = routine.id, "Routine entry created");
    Ok((StatusCode::CREATED, Json(DataResponse::new(routine))))
}

/// PATCH /api/v1/routines/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(update): Json<DailyRoutineUpdate>,
) -> AppResult<Json<DataResponse<DailyRoutine>>> {
    let user_id = user.authorize(Resource::Routine, Operation::Update, None)?;
    match &update {
        DailyRoutineUpdate::Slot { day_of_week, .. } => validate_day_of_week(*day_of_week)?,
        DailyRoutineUpdate::Activity { activity, .. } if activity.trim().is_empty() => {
            return Err(CoreError::Validation("activity must not be empty".into()).into());
        }
        DailyRoutineUpdate::Activity { .. } => {}
    }

    let routine = DailyRoutineRepo::update(&state.pool, id, user_id, &update)
        .await?
        .ok_or(CoreError::not_found("DailyRoutine", id))?;
    tracing::info!(user_id, routine_id = id, "Routine entry updated");
    Ok(Json(DataResponse::new(routine)))
}

/// DELETE /api/v1/routines/{id}
///
/// Soft delete.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let user_id = user.authorize(Resource::Routine, Operation::Delete, None)?;
    if !DailyRoutineRepo::deactivate(&state.pool, id, user_id).await? {
        return Err(CoreError::not_found("DailyRoutine", id).into());
    }
    tracing::info!(user_id, routine_id = id, "Routine entry removed");
    Ok(StatusCode::NO_CONTENT)
}
