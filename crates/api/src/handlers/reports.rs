//! Handlers for stored report snapshots and their CSV export.
//!
//! Generating a report reads the live rows matching the filters, summarises
//! them and stores `{filters, stats, columns, rows}` as one JSON document.
//! Later reads and exports never touch the source tables again. `columns`
//! keeps the row field order, which the `JSONB` column does not.

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use campus_core::access::{Operation, Resource};
use campus_core::attendance;
use campus_core::csv_export::{attachment_filename, columns_of, to_csv, to_csv_with_columns};
use campus_core::error::CoreError;
use campus_core::grading::GradeMarks;
use campus_core::reports::{grade_report_stats, ReportType};
use campus_core::tasks;
use campus_core::types::DbId;
use campus_db::models::attendance::DateRange;
use campus_db::models::grade::GradeFilter;
use campus_db::models::report::{CreateReport, Report};
use campus_db::models::task::TaskFilter;
use campus_db::repositories::{AttendanceRepo, GradeRepo, ReportRepo, TaskRepo};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /reports/attendance`.
#[derive(Debug, Deserialize)]
pub struct AttendanceReportRequest {
    pub user_id: Option<DbId>,
    #[serde(flatten)]
    pub range: DateRange,
}

#[derive(Debug, Deserialize)]
pub struct ReportListParams {
    pub user_id: Option<DbId>,
    pub report_type: Option<ReportType>,
}

fn to_json<T: Serialize>(value: &T) -> AppResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| AppError::InternalError(format!("Failed to serialize report: {e}")))
}

/// Assemble the stored document, recording the row columns in serialisation order.
fn snapshot<F: Serialize, S: Serialize, R: Serialize>(
    filters: &F,
    stats: &S,
    rows: &[R],
) -> AppResult<Value> {
    let rows = to_json(&rows)?;
    let columns = columns_of(rows.as_array().map(Vec::as_slice).unwrap_or_default());
    Ok(json!({
        "filters": to_json(filters)?,
        "stats": to_json(stats)?,
        "columns": columns,
        "rows": rows,
    }))
}

/// Persist a generated snapshot.
async fn store(
    state: &AppState,
    user: AuthUser,
    report_type: ReportType,
    user_id: Option<DbId>,
    data: Value,
) -> AppResult<(StatusCode, Json<DataResponse<Report>>)> {
    let report = ReportRepo::create(
        &state.pool,
        &CreateReport {
            report_type,
            generated_by: user.user_id,
            user_id,
            data,
        },
    )
    .await?;

    tracing::info!(
        generated_by = user.user_id,
        report_id = report.id,
        report_type = %report_type,
        "Report generated",
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(report))))
}

/// POST /api/v1/reports/attendance
pub async fn generate_attendance(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<AttendanceReportRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<Report>>)> {
    user.authorize(Resource::Report, Operation::Create, input.user_id)?;

    let rows = AttendanceRepo::list_for_report(&state.pool, input.user_id, input.range).await?;
    let stats = attendance::compute_stats(rows.iter().map(|r| r.status));
    let data = snapshot(&input.range, &stats, &rows)?;
    store(&state, user, ReportType::Attendance, input.user_id, data).await
}

/// POST /api/v1/reports/grades
pub async fn generate_grades(
    State(state): State<AppState>,
    user: AuthUser,
    Json(filter): Json<GradeFilter>,
) -> AppResult<(StatusCode, Json<DataResponse<Report>>)> {
    user.authorize(Resource::Report, Operation::Create, filter.student_id)?;

    let rows = GradeRepo::list_filtered(&state.pool, &filter).await?;
    let marks: Vec<GradeMarks> = rows.iter().map(GradeMarks::from).collect();
    let data = snapshot(&filter, &grade_report_stats(&marks), &rows)?;
    store(&state, user, ReportType::Grades, filter.student_id, data).await
}

/// POST /api/v1/reports/tasks
pub async fn generate_tasks(
    State(state): State<AppState>,
    user: AuthUser,
    Json(filter): Json<TaskFilter>,
) -> AppResult<(StatusCode, Json<DataResponse<Report>>)> {
    user.authorize(Resource::Report, Operation::Create, filter.assigned_to)?;

    let rows = TaskRepo::list_filtered(&state.pool, &filter).await?;
    let stats = tasks::compute_stats(rows.iter().map(|t| (t.status, t.due_date)), Utc::now());
    let data = snapshot(&filter, &stats, &rows)?;
    store(&state, user, ReportType::Tasks, filter.assigned_to, data).await
}

/// GET /api/v1/reports?user_id=&report_type=&limit=&offset=
///
/// Newest first. Without `user_id` every report is listed.
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<ReportListParams>,
    Query(page): Query<PaginationParams>,
) -> AppResult<Json<DataResponse<Vec<Report>>>> {
    user.authorize(Resource::Report, Operation::Read, None)?;
    let (limit, offset) = page.resolve();

    let reports =
        ReportRepo::list(&state.pool, params.user_id, params.report_type, limit, offset).await?;
    tracing::debug!(count = reports.len(), "Listed reports");
    Ok(Json(DataResponse::new(reports)))
}

async fn load(state: &AppState, user: AuthUser, id: DbId) -> AppResult<Report> {
    user.authorize(Resource::Report, Operation::Read, None)?;
    Ok(ReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("Report", id))?)
}

/// GET /api/v1/reports/{id}
pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Report>>> {
    let report = load(&state, user, id).await?;
    Ok(Json(DataResponse::new(report)))
}

/// GET /api/v1/reports/{id}/csv
///
/// Download the snapshot's `rows` as CSV, in the stored `columns` order.
/// Snapshots without `columns` fall back to the first row's keys.
pub async fn export_csv(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let report = load(&state, user, id).await?;

    let rows = report
        .data
        .get("rows")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let columns: Option<Vec<String>> = report
        .data
        .get("columns")
        .and_then(Value::as_array)
        .map(|cols| {
            cols.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        });
    let body = match columns {
        Some(columns) => to_csv_with_columns(&columns, rows),
        None => to_csv(rows),
    };

    let filename = attachment_filename(&format!("{}_report_{}", report.report_type, report.id));
    let disposition = format!("attachment; filename=\"{filename}\"");

    tracing::debug!(report_id = id, rows = rows.len(), "Exported report as CSV");
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// DELETE /api/v1/reports/{id}
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ReportRepo::delete(&state.pool, id).await? {
        return Err(CoreError::not_found("Report", id).into());
    }
    tracing::info!(admin_id = admin.user_id, report_id = id, "Report deleted");
    Ok(StatusCode::NO_CONTENT)
}
