//! Repository for the `tasks` table.

use campus_core::tasks::{completed_at_for, TaskCategory, TaskStatus};
use campus_core::types::DbId;
use chrono::Utc;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, TaskFilter, TaskUpdate};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, description, assigned_to, assigned_by, category, priority, \
                       status, due_date, completed_at, created_at, updated_at";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Assign a new task, returning the created row.
    pub async fn create(
        pool: &PgPool,
        assigned_by: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks
                (title, description, assigned_to, assigned_by, category, priority, due_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.assigned_to)
            .bind(assigned_by)
            .bind(input.category.as_str())
            .bind(input.priority.as_str())
            .bind(input.due_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE id = $1");
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A user's tasks by due date (undated last), optionally by status.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        status: Option<TaskStatus>,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE assigned_to = $1 AND ($2::TEXT IS NULL OR status = $2)
             ORDER BY due_date ASC NULLS LAST, id"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .bind(status.map(TaskStatus::as_str))
            .fetch_all(pool)
            .await
    }

    /// Tasks a teacher or admin has assigned, newest first.
    pub async fn list_assigned_by(
        pool: &PgPool,
        assigned_by: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks WHERE assigned_by = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(assigned_by)
            .fetch_all(pool)
            .await
    }

    /// Tasks matching every supplied filter, for reports.
    pub async fn list_filtered(pool: &PgPool, filter: &TaskFilter) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tasks
             WHERE ($1::BIGINT IS NULL OR assigned_to = $1)
               AND ($2::TEXT IS NULL OR status = $2)
               AND ($3::TEXT IS NULL OR category = $3)
             ORDER BY due_date ASC NULLS LAST, id"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(filter.assigned_to)
            .bind(filter.status.map(TaskStatus::as_str))
            .bind(filter.category.map(TaskCategory::as_str))
            .fetch_all(pool)
            .await
    }

    /// Apply one edit. Returns `None` if no row matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        update: &TaskUpdate,
    ) -> Result<Option<Task>, sqlx::Error> {
        match update {
            TaskUpdate::Status { status } => {
                let query = format!(
                    "UPDATE tasks SET status = $2, completed_at = $3
                     WHERE id = $1
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Task>(&query)
                    .bind(id)
                    .bind(status.as_str())
                    .bind(completed_at_for(*status, Utc::now()))
                    .fetch_optional(pool)
                    .await
            }
            TaskUpdate::Details {
                title,
                description,
                due_date,
            } => {
                let query = format!(
                    "UPDATE tasks SET title = $2, description = $3, due_date = $4
                     WHERE id = $1
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Task>(&query)
                    .bind(id)
                    .bind(title)
                    .bind(description)
                    .bind(due_date)
                    .fetch_optional(pool)
                    .await
            }
            TaskUpdate::Priority { priority } => {
                let query =
                    format!("UPDATE tasks SET priority = $2 WHERE id = $1 RETURNING {COLUMNS}");
                sqlx::query_as::<_, Task>(&query)
                    .bind(id)
                    .bind(priority.as_str())
                    .fetch_optional(pool)
                    .await
            }
            TaskUpdate::Category { category } => {
                let query =
                    format!("UPDATE tasks SET category = $2 WHERE id = $1 RETURNING {COLUMNS}");
                sqlx::query_as::<_, Task>(&query)
                    .bind(id)
                    .bind(category.as_str())
                    .fetch_optional(pool)
                    .await
            }
            TaskUpdate::Reassign { assigned_to } => {
                let query =
                    format!("UPDATE tasks SET assigned_to = $2 WHERE id = $1 RETURNING {COLUMNS}");
                sqlx::query_as::<_, Task>(&query)
                    .bind(id)
                    .bind(assigned_to)
                    .fetch_optional(pool)
                    .await
            }
        }
    }

    /// Mark a task completed.
    pub async fn complete(pool: &PgPool, id: DbId) -> Result<Option<Task>, sqlx::Error> {
        Self::update(
            pool,
            id,
            &TaskUpdate::Status {
                status: TaskStatus::Completed,
            },
        )
        .await
    }

    /// Hard-delete a task. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
