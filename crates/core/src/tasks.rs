//! Task enums and progress summary.

use serde::Serialize;

use crate::string_enum;
use crate::types::Timestamp;

string_enum! {
    pub enum TaskPriority ("task priority") {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

string_enum! {
    /// Lifecycle status. Transitions are not enforced.
    pub enum TaskStatus ("task status") {
        Pending => "pending",
        InProgress => "in_progress",
        Completed => "completed",
    }
}

string_enum! {
    pub enum TaskCategory ("task category") {
        Academic => "academic",
        Career => "career",
        Personal => "personal",
        Extracurricular => "extracurricular",
    }
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

impl Default for TaskCategory {
    fn default() -> Self {
        TaskCategory::Academic
    }
}

/// Counts by status plus overdue tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
    pub in_progress: i64,
    /// Not completed and past the due date.
    pub overdue: i64,
}

/// Whether a task with this status and due date is overdue at `now`.
pub fn is_overdue(status: TaskStatus, due_date: Option<Timestamp>, now: Timestamp) -> bool {
    status != TaskStatus::Completed && due_date.is_some_and(|due| due < now)
}

/// Summarise `(status, due_date)` pairs as of `now`.
pub fn compute_stats<I>(tasks: I, now: Timestamp) -> TaskStats
where
    I: IntoIterator<Item = (TaskStatus, Option<Timestamp>)>,
{
    let mut stats = TaskStats::default();
    for (status, due_date) in tasks {
        stats.total += 1;
        match status {
            TaskStatus::Completed => stats.completed += 1,
            TaskStatus::Pending => stats.pending += 1,
            TaskStatus::InProgress => stats.in_progress += 1,
        }
        if is_overdue(status, due_date, now) {
            stats.overdue += 1;
        }
    }
    stats
}

/// `completed_at` follows the status: set on completion, cleared otherwise.
pub fn completed_at_for(status: TaskStatus, now: Timestamp) -> Option<Timestamp> {
    (status == TaskStatus::Completed).then_some(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn counts_by_status_and_overdue() {
        let now = Utc::now();
        let yesterday = Some(now - Duration::days(1));
        let tomorrow = Some(now + Duration::days(1));

        let stats = compute_stats(
            [
                (TaskStatus::Pending, yesterday),
                (TaskStatus::InProgress, yesterday),
                (TaskStatus::Completed, yesterday),
                (TaskStatus::Pending, tomorrow),
                (TaskStatus::Pending, None),
            ],
            now,
        );

        assert_eq!(
            stats,
            TaskStats {
                total: 5,
                completed: 1,
                pending: 3,
                in_progress: 1,
                overdue: 2,
            }
        );
    }

    #[test]
    fn completed_at_tracks_status() {
        let now = Utc::now();
        assert_eq!(completed_at_for(TaskStatus::Completed, now), Some(now));
        assert_eq!(completed_at_for(TaskStatus::InProgress, now), None);
    }

    #[test]
    fn in_progress_uses_snake_case() {
        assert_eq!(TaskStatus::InProgress.as_str(), "in_progress");
        assert_eq!(
            "extracurricular".parse::<TaskCategory>().unwrap(),
            TaskCategory::Extracurricular
        );
        assert!("urgent".parse::<TaskPriority>().is_err());
    }
}
