//! Role-specific dashboard summary.

use axum::extract::State;
use axum::Json;
use campus_core::attendance::{compute_stats as attendance_stats, AttendanceStats};
use campus_core::grading::{compute_stats as grade_stats, GradeMarks};
use campus_core::roles::Role;
use campus_core::scheduling::day_of_week;
use campus_core::tasks::{compute_stats as task_stats, TaskStats};
use campus_db::models::attendance::{Attendance, DateRange};
use campus_db::models::profile::RoleCount;
use campus_db::repositories::{
    AchievementRepo, AttendanceRepo, GradeRepo, NotificationRepo, ProfileRepo, ScheduleRepo,
    TaskRepo,
};
use chrono::Utc;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum DashboardSummary {
    Student {
        today: Option<Attendance>,
        attendance: AttendanceStats,
        tasks: TaskStats,
        average_percentage: i64,
        letter_grade: &'static str,
        total_points: i64,
        classes_today: usize,
        unread_notifications: i64,
    },
    Teacher {
        students: usize,
        attendance_today: AttendanceStats,
        tasks_assigned: usize,
        unread_notifications: i64,
    },
    Admin {
        users_by_role: Vec<RoleCount>,
        attendance_today: AttendanceStats,
        unread_notifications: i64,
    },
}

/// GET /api/v1/dashboard
pub async fn summary(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let pool = &state.pool;
    let today = Utc::now().date_naive();
    let unread_notifications = NotificationRepo::unread_count(pool, user.user_id).await?;

    let summary = match user.role {
        Role::Student => {
            let statuses =
                AttendanceRepo::statuses_for_user(pool, user.user_id, DateRange::default()).await?;
            let tasks = TaskRepo::list_for_user(pool, user.user_id, None).await?;
            let grades = GradeRepo::rows_for_student(pool, user.user_id).await?;
            let marks: Vec<GradeMarks> = grades.iter().map(GradeMarks::from).collect();
            let grades = grade_stats(&marks);

            DashboardSummary::Student {
                today: AttendanceRepo::for_user_on(pool, user.user_id, today).await?,
                attendance: attendance_stats(statuses),
                tasks: task_stats(tasks.iter().map(|t| (t.status, t.due_date)), Utc::now()),
                average_percentage: grades.average_percentage,
                letter_grade: grades.letter_grade,
                total_points: AchievementRepo::total_points(pool, user.user_id).await?,
                classes_today: ScheduleRepo::list_for_day(pool, Some(user.user_id), day_of_week(today))
                    .await?
                    .len(),
                unread_notifications,
            }
        }
        Role::Teacher => DashboardSummary::Teacher {
            students: ProfileRepo::list_students(pool, None).await?.len(),
            attendance_today: AttendanceRepo::day_summary(pool, today, None).await?,
            tasks_assigned: TaskRepo::list_assigned_by(pool, user.user_id).await?.len(),
            unread_notifications,
        },
        Role::Admin => DashboardSummary::Admin {
            users_by_role: ProfileRepo::count_by_role(pool).await?,
            attendance_today: AttendanceRepo::day_summary(pool, today, None).await?,
            unread_notifications,
        },
    };

    tracing::debug!(user_id = user.user_id, role = %user.role, "Built dashboard summary");
    Ok(Json(DataResponse::new(summary)))
}
