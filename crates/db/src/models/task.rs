//! Task models and DTOs.

use campus_core::tasks::{TaskCategory, TaskPriority, TaskStatus};
use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: DbId,
    pub assigned_by: Option<DbId>,
    #[sqlx(try_from = "String")]
    pub category: TaskCategory,
    #[sqlx(try_from = "String")]
    pub priority: TaskPriority,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    pub due_date: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a task. The assigner comes from the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTask {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub assigned_to: DbId,
    #[serde(default)]
    pub category: TaskCategory,
    #[serde(default)]
    pub priority: TaskPriority,
    pub due_date: Option<Timestamp>,
}

/// Task edits.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskUpdate {
    /// `completed_at` follows the status.
    Status { status: TaskStatus },
    Details {
        title: String,
        description: Option<String>,
        due_date: Option<Timestamp>,
    },
    Priority { priority: TaskPriority },
    Category { category: TaskCategory },
    Reassign { assigned_to: DbId },
}

impl TaskUpdate {
    /// Only status changes are self-service for the assignee.
    pub fn is_status_change(&self) -> bool {
        matches!(self, TaskUpdate::Status { .. })
    }
}

/// Filters for task listing and reports.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TaskFilter {
    pub assigned_to: Option<DbId>,
    pub status: Option<TaskStatus>,
    pub category: Option<TaskCategory>,
}
