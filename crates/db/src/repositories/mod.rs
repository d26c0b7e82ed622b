//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod achievement_repo;
pub mod attendance_repo;
pub mod daily_routine_repo;
pub mod grade_repo;
pub mod notification_repo;
pub mod profile_repo;
pub mod report_repo;
pub mod schedule_repo;
pub mod session_repo;
pub mod settings_repo;
pub mod task_repo;

pub use achievement_repo::AchievementRepo;
pub use attendance_repo::AttendanceRepo;
pub use daily_routine_repo::DailyRoutineRepo;
pub use grade_repo::GradeRepo;
pub use notification_repo::NotificationRepo;
pub use profile_repo::ProfileRepo;
pub use report_repo::ReportRepo;
pub use schedule_repo::ScheduleRepo;
pub use session_repo::SessionRepo;
pub use settings_repo::SettingsRepo;
pub use task_repo::TaskRepo;

/// Decode a list of `TEXT` enum values fetched with `query_scalar`.
pub(crate) fn decode_text<T>(values: Vec<String>) -> Result<Vec<T>, sqlx::Error>
where
    T: std::str::FromStr<Err = campus_core::error::CoreError>,
{
    values
        .into_iter()
        .map(|v| v.parse::<T>().map_err(|e| sqlx::Error::Decode(Box::new(e))))
        .collect()
}
