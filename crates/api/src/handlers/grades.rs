//! Handlers for grades and grade statistics.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use campus_core::access::{Operation, Resource};
use campus_core::error::CoreError;
use campus_core::grading::{compute_stats, validate_marks, GradeMarks, GradeStats};
use campus_core::notifications::NotificationType;
use campus_core::roles::Role;
use campus_core::types::DbId;
use campus_db::models::grade::{CreateGrade, Grade, GradeUpdate};
use campus_db::repositories::{GradeRepo, NotificationRepo};
use serde::Deserialize;
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireStaff;
use crate::query::TargetUserParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ClassGradesParams {
    pub subject: String,
}

/// GET /api/v1/grades?user_id=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(target): Query<TargetUserParams>,
) -> AppResult<Json<DataResponse<Vec<Grade>>>> {
    let student_id = user.authorize(Resource::Grade, Operation::Read, target.user_id)?;
    let grades = GradeRepo::list_for_student(&state.pool, student_id).await?;
    tracing::debug!(student_id, count = grades.len(), "Listed grades");
    Ok(Json(DataResponse::new(grades)))
}

/// GET /api/v1/grades/stats?user_id=
///
/// Overall average, letter, per-subject totals and the best subject.
pub async fn stats(
    State(state): State<AppState>,
    user: AuthUser,
    Query(target): Query<TargetUserParams>,
) -> AppResult<Json<DataResponse<GradeStats>>> {
    let student_id = user.authorize(Resource::Grade, Operation::Read, target.user_id)?;
    let rows = GradeRepo::rows_for_student(&state.pool, student_id).await?;
    let marks: Vec<GradeMarks> = rows.iter().map(GradeMarks::from).collect();
    Ok(Json(DataResponse::new(compute_stats(&marks))))
}

/// GET /api/v1/grades/subject/{subject}?user_id=
pub async fn by_subject(
    State(state): State<AppState>,
    user: AuthUser,
    Path(subject): Path<String>,
    Query(target): Query<TargetUserParams>,
) -> AppResult<Json<DataResponse<Vec<Grade>>>> {
    let student_id = user.authorize(Resource::Grade, Operation::Read, target.user_id)?;
    let grades = GradeRepo::list_for_subject(&state.pool, &subject, Some(student_id)).await?;
    Ok(Json(DataResponse::new(grades)))
}

/// GET /api/v1/grades/class?subject=
///
/// Every grade in a subject. Teachers see the grades they recorded; admins
/// see all of them.
pub async fn class_grades(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Query(params): Query<ClassGradesParams>,
) -> AppResult<Json<DataResponse<Vec<Grade>>>> {
    let teacher_id = (staff.role == Role::Teacher).then_some(staff.user_id);
    let grades = GradeRepo::list_for_class_subject(&state.pool, &params.subject, teacher_id).await?;
    tracing::debug!(subject = %params.subject, count = grades.len(), "Listed class grades");
    Ok(Json(DataResponse::new(grades)))
}

/// POST /api/v1/grades
///
/// Record a grade and notify the student. A missing letter is derived from
/// the marks.
pub async fn create(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Json(input): Json<CreateGrade>,
) -> AppResult<(StatusCode, Json<DataResponse<Grade>>)> {
    staff.authorize(Resource::Grade, Operation::Create, Some(input.student_id))?;
    input.validate()?;
    validate_marks(input.obtained_marks, input.max_marks)?;

    let grade = GradeRepo::create(&state.pool, staff.user_id, &input).await?;

    let message = format!(
        "You received {} in {} ({}/{})",
        grade.grade, grade.subject, input.obtained_marks, input.max_marks
    );
    if let Err(e) = NotificationRepo::notify(
        &state.pool,
        grade.student_id,
        NotificationType::Grade,
        "New grade posted",
        &message,
    )
    .await
    {
        tracing::warn!(error = %e, grade_id = grade.id, "Failed to notify student of grade");
    }

    tracing::info!(
        teacher_id = staff.user_id,
        student_id = grade.student_id,
        grade_id = grade.id,
        "Grade recorded",
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(grade))))
}

/// PATCH /api/v1/grades/{id}
pub async fn update(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(update): Json<GradeUpdate>,
) -> AppResult<Json<DataResponse<Grade>>> {
    let existing = GradeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("Grade", id))?;
    staff.authorize_owned(Resource::Grade, Operation::Update, existing.student_id)?;

    match &update {
        GradeUpdate::Marks {
            obtained_marks,
            max_marks,
        } => validate_marks(*obtained_marks, *max_marks)?,
        GradeUpdate::Letter { grade } if grade.trim().is_empty() || grade.len() > 3 => {
            return Err(CoreError::Validation("Letter grade must be 1-3 characters".into()).into());
        }
        _ => {}
    }

    let grade = GradeRepo::update(&state.pool, id, &update)
        .await?
        .ok_or(CoreError::not_found("Grade", id))?;

    tracing::info!(teacher_id = staff.user_id, grade_id = id, "Grade updated");
    Ok(Json(DataResponse::new(grade)))
}

/// DELETE /api/v1/grades/{id}
pub async fn delete(
    RequireStaff(staff): RequireStaff,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = GradeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::not_found("Grade", id))?;
    staff.authorize_owned(Resource::Grade, Operation::Delete, existing.student_id)?;

    GradeRepo::delete(&state.pool, id).await?;
    tracing::info!(teacher_id = staff.user_id, grade_id = id, "Grade deleted");
    Ok(StatusCode::NO_CONTENT)
}
