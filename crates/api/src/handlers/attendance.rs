//! Handlers for attendance: self check-in, staff marking, history and stats.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::access::{Operation, Resource};
use campus_core::attendance::{
    compute_stats, records_check_in_time, simulate_biometric_match, validate_scan_payload,
    AttendanceStats, AttendanceStatus, CheckInMethod,
};
use campus_core::error::CoreError;
use campus_core::types::DbId;
use campus_db::models::attendance::{Attendance, AttendanceUpdate, DateRange, MarkAttendance};
use campus_db::repositories::AttendanceRepo;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::{PaginationParams, TargetUserParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /attendance/check-in`.
#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    pub method: CheckInMethod,
    /// Decoded QR/barcode content.
    pub payload: Option<String>,
    pub class_id: Option<String>,
}

/// Request body for `POST /attendance/mark`.
#[derive(Debug, Deserialize)]
pub struct MarkRequest {
    pub user_id: DbId,
    pub status: AttendanceStatus,
    /// Defaults to today (UTC).
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub check_in_method: Option<CheckInMethod>,
    pub class_id: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct BulkEntry {
    pub user_id: DbId,
    pub status: AttendanceStatus,
    pub notes: Option<String>,
}

/// Request body for `POST /attendance/bulk`.
#[derive(Debug, Deserialize, Validate)]
pub struct BulkMarkRequest {
    pub date: Option<NaiveDate>,
    pub class_id: Option<String>,
    #[validate(length(min = 1, max = 500))]
    pub records: Vec<BulkEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ClassSummaryParams {
    pub date: Option<NaiveDate>,
    pub class_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClassSummary {
    pub date: NaiveDate,
    pub class_id: Option<String>,
    pub stats: AttendanceStats,
    pub records: Vec<Attendance>,
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Build a mark, stamping arrivals with the current time.
fn build_mark(
    user_id: DbId,
    date: NaiveDate,
    status: AttendanceStatus,
    method: CheckInMethod,
    class_id: Option<String>,
    marked_by: Option<DbId>,
    notes: Option<String>,
) -> MarkAttendance {
    MarkAttendance {
        user_id,
        date,
        status,
        check_in_time: records_check_in_time(status).then(Utc::now),
        check_in_method: method,
        class_id,
        marked_by,
        notes,
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/attendance/check-in
///
/// Record the caller as present today. A second check-in on the same day is
/// rejected with 409; staff corrections go through `/attendance/mark`.
pub async fn check_in(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CheckInRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Attendance>>)> {
    let user_id = user.authorize(Resource::Attendance, Operation::Create, None)?;
    validate_scan_payload(input.method, input.payload.as_deref())?;

    let notes = match input.method {
        CheckInMethod::Biometric => Some(simulate_biometric_match(Utc::now())),
        _ => None,
    };
    let mark = build_mark(
        user_id,
        today(),
        AttendanceStatus::Present,
        input.method,
        input.class_id,
        None,
        notes,
    );

    let record = AttendanceRepo::check_in(&state.pool, &mark)
        .await?
        .ok_or_else(|| CoreError::Conflict("Already checked in today".into()))?;

    tracing::info!(user_id, attendance_id = record.id, method = %input.method, "Checked in");
    Ok((StatusCode::CREATED, Json(DataResponse::new(record))))
}

/// POST /api/v1/attendance/mark
///
/// Mark (or re-mark) one user's attendance for a day.
pub async fn mark(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<MarkRequest>,
) -> AppResult<Json<DataResponse<Attendance>>> {
    staff.authorize(Resource::Attendance, Operation::Create, Some(input.user_id))?;

    let mark = build_mark(
        input.user_id,
        input.date.unwrap_or_else(today),
        input.status,
        input.check_in_method.unwrap_or(CheckInMethod::Manual),
        input.class_id,
        Some(staff.user_id),
        input.notes,
    );
    let record = AttendanceRepo::mark(&state.pool, &mark).await?;

    tracing::info!(
        marked_by = staff.user_id,
        user_id = record.user_id,
        status = %record.status,
        "Attendance marked",
    );
    Ok(Json(DataResponse::new(record)))
}

/// POST /api/v1/attendance/bulk
///
/// Mark a roster in one transaction.
pub async fn bulk_mark(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<BulkMarkRequest>,
) -> AppResult<Json<DataResponse<Vec<Attendance>>>> {
    input.validate()?;
    let date = input.date.unwrap_or_else(today);

    let marks: Vec<MarkAttendance> = input
        .records
        .into_iter()
        .map(|entry| {
            build_mark(
                entry.user_id,
                date,
                entry.status,
                CheckInMethod::Manual,
                input.class_id.clone(),
                Some(staff.user_id),
                entry.notes,
            )
        })
        .collect();
    let records = AttendanceRepo::bulk_mark(&state.pool, &marks).await?;

    tracing::info!(marked_by = staff.user_id, %date, count = records.len(), "Bulk attendance marked");
    Ok(Json(DataResponse::new(records)))
}

/// GET /api/v1/attendance/history?user_id=&from=&to=&limit=&offset=
pub async fn history(
    State(state): State<AppState>,
    user: AuthUser,
    Query(target): Query<TargetUserParams>,
    Query(range): Query<DateRange>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Attendance>>>> {
    let user_id = user.authorize(Resource::Attendance, Operation::Read, target.user_id)?;
    let (limit, offset) = page.resolve();

    let records = AttendanceRepo::history(&state.pool, user_id, range, limit, offset).await?;
    tracing::debug!(user_id, count = records.len(), "Listed attendance history");
    Ok(Json(DataResponse::new(records)))
}

/// GET /api/v1/attendance/today?user_id=
///
/// Today's record, or `null` before check-in.
pub async fn today_record(
    State(state): State<AppState>,
    user: AuthUser,
    Query(target): Query<TargetUserParams>,
) -> AppResult<Json<DataResponse<Option<Attendance>>>> {
    let user_id = user.authorize(Resource::Attendance, Operation::Read, target.user_id)?;
    let record = AttendanceRepo::for_user_on(&state.pool, user_id, today()).await?;
    Ok(Json(DataResponse::new(record)))
}

/// GET /api/v1/attendance/stats?user_id=&from=&to=
pub async fn stats(
    State(state): State<AppState>,
    user: AuthUser,
    Query(target): Query<TargetUserParams>,
    Query(range): Query<DateRange>,
) -> AppResult<Json<DataResponse<AttendanceStats>>> {
    let user_id = user.authorize(Resource::Attendance, Operation::Read, target.user_id)?;
    let statuses = AttendanceRepo::statuses_for_user(&state.pool, user_id, range).await?;
    Ok(Json(DataResponse::new(compute_stats(statuses))))
}

/// GET /api/v1/attendance/class-summary?date=&class_id=
pub async fn class_summary(
    RequireStaff(_staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<ClassSummaryParams>,
) -> AppResult<Json<DataResponse<ClassSummary>>> {
    let date = params.date.unwrap_or_else(today);
    let class_id = params.class_id.as_deref();
    let stats = AttendanceRepo::day_summary(&state.pool, date, class_id).await?;
    let records = AttendanceRepo::for_day(&state.pool, date, class_id).await?;

    Ok(Json(DataResponse::new(ClassSummary {
        date,
        class_id: params.class_id,
        stats,
        records,
    })))
}

/// PATCH /api/v1/attendance/{id}
///
/// Apply one tagged edit (`status`, `check_out`, `notes`).
pub async fn update(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(update): Json<AttendanceUpdate>,
) -> AppResult<Json<DataResponse<Attendance>>> {
    let existing = AttendanceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("Attendance", id))?;
    staff.authorize_owned(Resource::Attendance, Operation::Update, existing.user_id)?;

    if let AttendanceUpdate::CheckOut { check_out_time } = &update {
        if existing
            .check_in_time
            .is_some_and(|check_in| *check_out_time < check_in)
        {
            return Err(AppError::BadRequest(
                "check_out_time must not precede check_in_time".into(),
            ));
        }
    }

    let record = AttendanceRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(CoreError::not_found("Attendance", id))?;

    tracing::info!(staff_id = staff.user_id, attendance_id = id, "Attendance updated");
    Ok(Json(DataResponse::new(record)))
}

/// DELETE /api/v1/attendance/{id}
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = AttendanceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("Attendance", id))?;
    staff.authorize_owned(Resource::Attendance, Operation::Delete, existing.user_id)?;

    AttendanceRepo::delete(&state.pool, id).await?;
    tracing::info!(staff_id = staff.user_id, attendance_id = id, "Attendance deleted");
    Ok(StatusCode::NO_CONTENT)
}
