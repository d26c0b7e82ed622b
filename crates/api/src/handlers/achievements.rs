//! Handlers for achievement badges.
//!
//! The check endpoints evaluate a user's attendance streak or grade average
//! against the fixed badge table and award whatever is newly earned.
//! Awarding is idempotent, so repeated checks never duplicate a badge.

use axum::extract::{Query, State};
use axum::Json;
use campus_core::access::{Operation, Resource};
use campus_core::achievements::{
    academic_badges, compute_streak, streak_badges, total_points, Badge, Streak, STREAK_WINDOW,
};
use campus_core::grading::{average_row_percentage, GradeMarks};
use campus_core::notifications::NotificationType;
use campus_core::types::DbId;
use campus_db::models::achievement::Achievement;
use campus_db::repositories::{AchievementRepo, AttendanceRepo, GradeRepo, NotificationRepo};
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::query::TargetUserParams;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PointsSummary {
    pub user_id: DbId,
    pub total_points: i64,
    pub badges: usize,
}

/// Outcome of a badge check.
#[derive(Debug, Serialize)]
pub struct BadgeCheck {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak: Option<Streak>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_percentage: Option<f64>,
    /// Badges earned by this check; already-held badges are left out.
    pub awarded: Vec<Achievement>,
}

/// Award each qualifying badge, notifying the user of new ones.
async fn award_all(state: &AppState, user_id: DbId, badges: &[Badge]) -> AppResult<Vec<Achievement>> {
    let mut awarded = Vec::new();
    for badge in badges {
        let Some(achievement) = AchievementRepo::award(&state.pool, user_id, badge).await? else {
            continue;
        };
        tracing::info!(user_id, badge = badge.name, points = badge.points, "Badge awarded");

        let message = format!("{} (+{} points)", badge.description, badge.points);
        if let Err(e) = NotificationRepo::notify(
            &state.pool,
            user_id,
            NotificationType::Announcement,
            &format!("Badge earned: {}", badge.name),
            &message,
        )
        .await
        {
            tracing::warn!(error = %e, user_id, "Failed to notify badge award");
        }
        awarded.push(achievement);
    }
    Ok(awarded)
}

/// GET /api/v1/achievements?user_id=
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(target): Query<TargetUserParams>,
) -> AppResult<Json<DataResponse<Vec<Achievement>>>> {
    let user_id = user.authorize(Resource::Achievement, Operation::Read, target.user_id)?;
    let achievements = AchievementRepo::list_for_user(&state.pool, user_id).await?;
    Ok(Json(DataResponse::new(achievements)))
}

/// GET /api/v1/achievements/points?user_id=
pub async fn points(
    State(state): State<AppState>,
    user: AuthUser,
    Query(target): Query<TargetUserParams>,
) -> AppResult<Json<DataResponse<PointsSummary>>> {
    let user_id = user.authorize(Resource::Achievement, Operation::Read, target.user_id)?;
    let achievements = AchievementRepo::list_for_user(&state.pool, user_id).await?;

    Ok(Json(DataResponse::new(PointsSummary {
        user_id,
        total_points: total_points(achievements.iter().map(|a| a.points)),
        badges: achievements.len(),
    })))
}

/// POST /api/v1/achievements/check/attendance?user_id=
///
/// Scan the most recent attendance rows for streak badges.
pub async fn check_attendance(
    State(state): State<AppState>,
    user: AuthUser,
    Query(target): Query<TargetUserParams>,
) -> AppResult<Json<DataResponse<BadgeCheck>>> {
    let user_id = user.authorize(Resource::Achievement, Operation::Create, target.user_id)?;

    let statuses = AttendanceRepo::recent_statuses(&state.pool, user_id, STREAK_WINDOW).await?;
    let streak = compute_streak(statuses);
    let awarded = award_all(&state, user_id, &streak_badges(streak)).await?;

    tracing::debug!(user_id, max_streak = streak.max, awarded = awarded.len(), "Checked attendance badges");
    Ok(Json(DataResponse::new(BadgeCheck {
        streak: Some(streak),
        average_percentage: None,
        awarded,
    })))
}

/// POST /api/v1/achievements/check/academic?user_id=
///
/// Compare the mean per-grade percentage against the academic badges.
pub async fn check_academic(
    State(state): State<AppState>,
    user: AuthUser,
    Query(target): Query<TargetUserParams>,
) -> AppResult<Json<DataResponse<BadgeCheck>>> {
    let user_id = user.authorize(Resource::Achievement, Operation::Create, target.user_id)?;

    let rows = GradeRepo::rows_for_student(&state.pool, user_id).await?;
    if rows.is_empty() {
        return Ok(Json(DataResponse::new(BadgeCheck {
            streak: None,
            average_percentage: None,
            awarded: Vec::new(),
        })));
    }

    let marks: Vec<GradeMarks> = rows.iter().map(GradeMarks::from).collect();
    let average = average_row_percentage(&marks);
    let awarded = award_all(&state, user_id, &academic_badges(average)).await?;

    tracing::debug!(user_id, average, awarded = awarded.len(), "Checked academic badges");
    Ok(Json(DataResponse::new(BadgeCheck {
        streak: None,
        average_percentage: Some(average),
        awarded,
    })))
}
