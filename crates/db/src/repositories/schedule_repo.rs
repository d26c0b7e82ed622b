//! Repository for the `schedules` table.
//!
//! Entries are soft-deleted via `is_active`; list queries only return
//! active entries.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::schedule::{CreateSchedule, Schedule, ScheduleUpdate};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, day_of_week, start_time, end_time, subject, room, \
                       location, type, is_active, created_at, updated_at";

fn insert_query() -> String {
    format!(
        "INSERT INTO schedules
            (user_id, day_of_week, start_time, end_time, subject, room, location, type)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         RETURNING {COLUMNS}"
    )
}

/// Provides CRUD operations for schedule entries.
pub struct ScheduleRepo;

impl ScheduleRepo {
    pub async fn create(pool: &PgPool, input: &CreateSchedule) -> Result<Schedule, sqlx::Error> {
        sqlx::query_as::<_, Schedule>(&insert_query())
            .bind(input.user_id)
            .bind(input.day_of_week)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(&input.subject)
            .bind(&input.room)
            .bind(&input.location)
            .bind(input.schedule_type.as_str())
            .fetch_one(pool)
            .await
    }

    /// Insert several entries in one transaction.
    pub async fn bulk_create(
        pool: &PgPool,
        inputs: &[CreateSchedule],
    ) -> Result<Vec<Schedule>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut results = Vec::with_capacity(inputs.len());
        let query = insert_query();

        for input in inputs {
            let row = sqlx::query_as::<_, Schedule>(&query)
                .bind(input.user_id)
                .bind(input.day_of_week)
                .bind(input.start_time)
                .bind(input.end_time)
                .bind(&input.subject)
                .bind(&input.room)
                .bind(&input.location)
                .bind(input.schedule_type.as_str())
                .fetch_one(&mut *tx)
                .await?;
            results.push(row);
        }

        tx.commit().await?;
        Ok(results)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Schedule>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM schedules WHERE id = $1");
        sqlx::query_as::<_, Schedule>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A user's active entries for the week, by day then start time.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Schedule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM schedules
             WHERE user_id = $1 AND is_active = true
             ORDER BY day_of_week, start_time"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Active entries on one day for a user (`None` = class-wide), by start time.
    pub async fn list_for_day(
        pool: &PgPool,
        user_id: Option<DbId>,
        day_of_week: i16,
    ) -> Result<Vec<Schedule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM schedules
             WHERE user_id IS NOT DISTINCT FROM $1
               AND day_of_week = $2
               AND is_active = true
             ORDER BY start_time"
        );
        sqlx::query_as::<_, Schedule>(&query)
            .bind(user_id)
            .bind(day_of_week)
            .fetch_all(pool)
            .await
    }

    /// Active class-wide entries, by day then start time.
    pub async fn list_class_wide(pool: &PgPool) -> Result<Vec<Schedule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM schedules
             WHERE user_id IS NULL AND is_active = true
             ORDER BY day_of_week, start_time"
        );
        sqlx::query_as::<_, Schedule>(&query).fetch_all(pool).await
    }

    /// Apply one edit. Returns `None` if no row matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        update: &ScheduleUpdate,
    ) -> Result<Option<Schedule>, sqlx::Error> {
        match update {
            ScheduleUpdate::Timing {
                day_of_week,
                start_time,
                end_time,
            } => {
                let query = format!(
                    "UPDATE schedules SET day_of_week = $2, start_time = $3, end_time = $4
                     WHERE id = $1
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Schedule>(&query)
                    .bind(id)
                    .bind(day_of_week)
                    .bind(start_time)
                    .bind(end_time)
                    .fetch_optional(pool)
                    .await
            }
            ScheduleUpdate::Details {
                subject,
                room,
                location,
                schedule_type,
            } => {
                let query = format!(
                    "UPDATE schedules SET subject = $2, room = $3, location = $4, type = $5
                     WHERE id = $1
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Schedule>(&query)
                    .bind(id)
                    .bind(subject)
                    .bind(room)
                    .bind(location)
                    .bind(schedule_type.as_str())
                    .fetch_optional(pool)
                    .await
            }
            ScheduleUpdate::Active { is_active } => {
                let query =
                    format!("UPDATE schedules SET is_active = $2 WHERE id = $1 RETURNING {COLUMNS}");
                sqlx::query_as::<_, Schedule>(&query)
                    .bind(id)
                    .bind(is_active)
                    .fetch_optional(pool)
                    .await
            }
        }
    }

    /// Soft-delete an entry. Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE schedules SET is_active = false WHERE id = $1 AND is_active = true",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Hard-delete an entry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM schedules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
