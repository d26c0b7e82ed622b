//! Handlers for timetable entries: per-user views, free slots, conflict
//! detection and admin management.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::access::{Operation, Resource};
use campus_core::error::CoreError;
use campus_core::scheduling::{
    day_of_week, find_conflicts, free_slots, validate_day_of_week, validate_interval, FreeSlot,
    TimeInterval,
};
use campus_core::types::DbId;
use campus_db::models::schedule::{CreateSchedule, Schedule, ScheduleUpdate};
use campus_db::repositories::ScheduleRepo;
use chrono::{NaiveTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::TargetUserParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /schedules/conflicts`.
#[derive(Debug, Deserialize)]
pub struct ConflictCheckRequest {
    /// Defaults to the caller.
    pub user_id: Option<DbId>,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Entry being edited, left out of the comparison.
    pub exclude_id: Option<DbId>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BulkScheduleRequest {
    #[validate(length(min = 1, max = 200), nested)]
    pub entries: Vec<CreateSchedule>,
}

/// Active entries of `user_id` on `day` that overlap `[start, end)`.
async fn conflicts_for(
    state: &AppState,
    user_id: Option<DbId>,
    day: i16,
    candidate: &TimeInterval,
    exclude_id: Option<DbId>,
) -> AppResult<Vec<Schedule>> {
    let entries: Vec<Schedule> = ScheduleRepo::list_for_day(&state.pool, user_id, day)
        .await?
        .into_iter()
        .filter(|entry| Some(entry.id) != exclude_id)
        .collect();
    Ok(find_conflicts(&entries, candidate, Schedule::interval)
        .into_iter()
        .cloned()
        .collect())
}

/// 409 naming the first overlapping entry, if any.
fn reject_overlap(conflicts: &[Schedule]) -> AppResult<()> {
    match conflicts.first() {
        Some(first) => Err(CoreError::Conflict(format!(
            "Overlaps schedule entry {} ({}-{})",
            first.id, first.start_time, first.end_time
        ))
        .into()),
        None => Ok(()),
    }
}

/// GET /api/v1/schedules?user_id=
///
/// The week's active entries, by day then start time.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(target): Query<TargetUserParams>,
) -> AppResult<Json<DataResponse<Vec<Schedule>>>> {
    let user_id = user.authorize(Resource::Schedule, Operation::Read, target.user_id)?;
    let entries = ScheduleRepo::list_for_user(&state.pool, user_id).await?;
    tracing::debug!(user_id, count = entries.len(), "Listed schedule");
    Ok(Json(DataResponse::new(entries)))
}

/// GET /api/v1/schedules/day/{day}?user_id=
pub async fn for_day(
    State(state): State<AppState>,
    user: AuthUser,
    Path(day): Path<i16>,
    Query(target): Query<TargetUserParams>,
) -> AppResult<Json<DataResponse<Vec<Schedule>>>> {
    validate_day_of_week(day)?;
    let user_id = user.authorize(Resource::Schedule, Operation::Read, target.user_id)?;
    let entries = ScheduleRepo::list_for_day(&state.pool, Some(user_id), day).await?;
    Ok(Json(DataResponse::new(entries)))
}

/// GET /api/v1/schedules/today?user_id=
pub async fn today(
    State(state): State<AppState>,
    user: AuthUser,
    Query(target): Query<TargetUserParams>,
) -> AppResult<Json<DataResponse<Vec<Schedule>>>> {
    let user_id = user.authorize(Resource::Schedule, Operation::Read, target.user_id)?;
    let day = day_of_week(Utc::now().date_naive());
    let entries = ScheduleRepo::list_for_day(&state.pool, Some(user_id), day).await?;
    Ok(Json(DataResponse::new(entries)))
}

/// GET /api/v1/schedules/class
///
/// Entries not tied to a single user.
pub async fn class_wide(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Schedule>>>> {
    user.authorize(Resource::Schedule, Operation::Read, None)?;
    let entries = ScheduleRepo::list_class_wide(&state.pool).await?;
    Ok(Json(DataResponse::new(entries)))
}

/// GET /api/v1/schedules/free-slots/{day}?user_id=
///
/// Gaps between active entries inside the 08:00-18:00 working window.
pub async fn free_slots_for_day(
    State(state): State<AppState>,
    user: AuthUser,
    Path(day): Path<i16>,
    Query(target): Query<TargetUserParams>,
) -> AppResult<Json<DataResponse<Vec<FreeSlot>>>> {
    validate_day_of_week(day)?;
    let user_id = user.authorize(Resource::Schedule, Operation::Read, target.user_id)?;

    let intervals: Vec<TimeInterval> = ScheduleRepo::list_for_day(&state.pool, Some(user_id), day)
        .await?
        .iter()
        .map(Schedule::interval)
        .collect();
    Ok(Json(DataResponse::new(free_slots(&intervals))))
}

/// POST /api/v1/schedules/conflicts
///
/// Entries that would overlap the proposed interval.
pub async fn check_conflicts(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<ConflictCheckRequest>,
) -> AppResult<Json<DataResponse<Vec<Schedule>>>> {
    validate_day_of_week(input.day_of_week)?;
    let candidate = TimeInterval::new(input.start_time, input.end_time)?;
    let user_id = user.authorize(Resource::Schedule, Operation::Read, input.user_id)?;

    let conflicts = conflicts_for(
        &state,
        Some(user_id),
        input.day_of_week,
        &candidate,
        input.exclude_id,
    )
    .await?;
    Ok(Json(DataResponse::new(conflicts)))
}

/// POST /api/v1/schedules
///
/// Create an entry. An overlap with an existing active entry for the same
/// owner and day is rejected with 409.
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateSchedule>,
) -> AppResult<(StatusCode, Json<DataResponse<Schedule>>)> {
    input.validate()?;
    let candidate = TimeInterval::new(input.start_time, input.end_time)?;

    let conflicts = conflicts_for(&state, input.user_id, input.day_of_week, &candidate, None).await?;
    reject_overlap(&conflicts)?;

    let entry = ScheduleRepo::create(&state.pool, &input).await?;
    tracing::info!(admin_id = admin.user_id, schedule_id = entry.id, "Schedule entry created");
    Ok((StatusCode::CREATED, Json(DataResponse::new(entry))))
}

/// POST /api/v1/schedules/bulk
///
/// Insert many entries in one transaction. Overlaps are not checked.
pub async fn bulk_create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<BulkScheduleRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Vec<Schedule>>>)> {
    input.validate()?;
    for entry in &input.entries {
        validate_interval(entry.start_time, entry.end_time)?;
    }

    let entries = ScheduleRepo::bulk_create(&state.pool, &input.entries).await?;
    tracing::info!(admin_id = admin.user_id, count = entries.len(), "Schedule entries created");
    Ok((StatusCode::CREATED, Json(DataResponse::new(entries))))
}

/// PATCH /api/v1/schedules/{id}
///
/// Moving an active entry, or reactivating one, is rejected with 409 when
/// the resulting slot overlaps another active entry of the same owner.
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(update): Json<ScheduleUpdate>,
) -> AppResult<Json<DataResponse<Schedule>>> {
    let existing = ScheduleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("Schedule", id))?;

    match &update {
        ScheduleUpdate::Timing {
            day_of_week,
            start_time,
            end_time,
        } => {
            validate_day_of_week(*day_of_week)?;
            let candidate = TimeInterval::new(*start_time, *end_time)?;
            if existing.is_active {
                let conflicts =
                    conflicts_for(&state, existing.user_id, *day_of_week, &candidate, Some(id))
                        .await?;
                reject_overlap(&conflicts)?;
            }
        }
        ScheduleUpdate::Active { is_active: true } => {
            let conflicts = conflicts_for(
                &state,
                existing.user_id,
                existing.day_of_week,
                &existing.interval(),
                Some(id),
            )
            .await?;
            reject_overlap(&conflicts)?;
        }
        _ => {}
    }

    let entry = ScheduleRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(CoreError::not_found("Schedule", id))?;
    tracing::info!(admin_id = admin.user_id, schedule_id = id, "Schedule entry updated");
    Ok(Json(DataResponse::new(entry)))
}

/// POST /api/v1/schedules/{id}/deactivate
pub async fn deactivate(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ScheduleRepo::deactivate(&state.pool, id).await? {
        return Err(CoreError::not_found("Schedule", id).into());
    }
    tracing::info!(admin_id = admin.user_id, schedule_id = id, "Schedule entry deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/schedules/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ScheduleRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found("Schedule", id).into());
    }
    tracing::info!(admin_id = admin.user_id, schedule_id = id, "Schedule entry deleted");
    Ok(StatusCode::NO_CONTENT)
}
