//! Repository for the `attendance` table.
//!
//! `(user_id, date)` is unique (`uq_attendance_user_date`). Staff marking is
//! an upsert on that key; student self check-in is insert-if-absent.

use campus_core::attendance::{compute_stats, AttendanceStats, AttendanceStatus};
use campus_core::types::DbId;
use chrono::NaiveDate;
use sqlx::PgPool;

use super::decode_text;
use crate::models::attendance::{Attendance, AttendanceUpdate, DateRange, MarkAttendance};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, date, status, check_in_time, check_out_time, \
                       check_in_method, class_id, marked_by, notes, created_at, updated_at";

/// Upsert on `(user_id, date)`. A repeat arrival keeps the first check-in
/// time; a non-arrival status clears it.
fn upsert_query() -> String {
    format!(
        "INSERT INTO attendance
            (user_id, date, status, check_in_time, check_in_method, class_id, marked_by, notes)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
         ON CONFLICT ON CONSTRAINT uq_attendance_user_date DO UPDATE SET
            status = EXCLUDED.status,
            check_in_time = CASE
                WHEN EXCLUDED.check_in_time IS NULL THEN NULL
                ELSE COALESCE(attendance.check_in_time, EXCLUDED.check_in_time)
            END,
            check_in_method = EXCLUDED.check_in_method,
            class_id = COALESCE(EXCLUDED.class_id, attendance.class_id),
            marked_by = EXCLUDED.marked_by,
            notes = COALESCE(EXCLUDED.notes, attendance.notes)
         RETURNING {COLUMNS}"
    )
}

/// Provides attendance marking and history queries.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Mark (or re-mark) a user's attendance for a day in one statement.
    pub async fn mark(pool: &PgPool, input: &MarkAttendance) -> Result<Attendance, sqlx::Error> {
        sqlx::query_as::<_, Attendance>(&upsert_query())
            .bind(input.user_id)
            .bind(input.date)
            .bind(input.status.as_str())
            .bind(input.check_in_time)
            .bind(input.check_in_method.as_str())
            .bind(&input.class_id)
            .bind(input.marked_by)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Mark many users in one transaction. Either every row lands or none.
    pub async fn bulk_mark(
        pool: &PgPool,
        inputs: &[MarkAttendance],
    ) -> Result<Vec<Attendance>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut results = Vec::with_capacity(inputs.len());
        let query = upsert_query();

        for input in inputs {
            let row = sqlx::query_as::<_, Attendance>(&query)
                .bind(input.user_id)
                .bind(input.date)
                .bind(input.status.as_str())
                .bind(input.check_in_time)
                .bind(input.check_in_method.as_str())
                .bind(&input.class_id)
                .bind(input.marked_by)
                .bind(&input.notes)
                .fetch_one(&mut *tx)
                .await?;
            results.push(row);
        }

        tx.commit().await?;
        tracing::debug!(count = results.len(), "Bulk attendance marked");
        Ok(results)
    }

    /// Self check-in: insert only if the user has no record for the day.
    ///
    /// Returns `None` when a record already exists.
    pub async fn check_in(
        pool: &PgPool,
        input: &MarkAttendance,
    ) -> Result<Option<Attendance>, sqlx::Error> {
        let query = format!(
            "INSERT INTO attendance
                (user_id, date, status, check_in_time, check_in_method, class_id, marked_by, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             ON CONFLICT ON CONSTRAINT uq_attendance_user_date DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(input.user_id)
            .bind(input.date)
            .bind(input.status.as_str())
            .bind(input.check_in_time)
            .bind(input.check_in_method.as_str())
            .bind(&input.class_id)
            .bind(input.marked_by)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Attendance>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attendance WHERE id = $1");
        sqlx::query_as::<_, Attendance>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A user's records, newest date first, within an optional window.
    pub async fn history(
        pool: &PgPool,
        user_id: DbId,
        range: DateRange,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Attendance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance
             WHERE user_id = $1
               AND ($2::DATE IS NULL OR date >= $2)
               AND ($3::DATE IS NULL OR date <= $3)
             ORDER BY date DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(user_id)
            .bind(range.from)
            .bind(range.to)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Records for reports: optionally one user, within an optional window.
    pub async fn list_for_report(
        pool: &PgPool,
        user_id: Option<DbId>,
        range: DateRange,
    ) -> Result<Vec<Attendance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance
             WHERE ($1::BIGINT IS NULL OR user_id = $1)
               AND ($2::DATE IS NULL OR date >= $2)
               AND ($3::DATE IS NULL OR date <= $3)
             ORDER BY date DESC, user_id"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(user_id)
            .bind(range.from)
            .bind(range.to)
            .fetch_all(pool)
            .await
    }

    /// The user's record for one day, if any.
    pub async fn for_user_on(
        pool: &PgPool,
        user_id: DbId,
        date: NaiveDate,
    ) -> Result<Option<Attendance>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attendance WHERE user_id = $1 AND date = $2");
        sqlx::query_as::<_, Attendance>(&query)
            .bind(user_id)
            .bind(date)
            .fetch_optional(pool)
            .await
    }

    /// Every record for a day, optionally within one class.
    pub async fn for_day(
        pool: &PgPool,
        date: NaiveDate,
        class_id: Option<&str>,
    ) -> Result<Vec<Attendance>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance
             WHERE date = $1 AND ($2::TEXT IS NULL OR class_id = $2)
             ORDER BY user_id"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(date)
            .bind(class_id)
            .fetch_all(pool)
            .await
    }

    /// Presence summary for one day, optionally within one class.
    pub async fn day_summary(
        pool: &PgPool,
        date: NaiveDate,
        class_id: Option<&str>,
    ) -> Result<AttendanceStats, sqlx::Error> {
        let values: Vec<String> = sqlx::query_scalar(
            "SELECT status FROM attendance
             WHERE date = $1 AND ($2::TEXT IS NULL OR class_id = $2)",
        )
        .bind(date)
        .bind(class_id)
        .fetch_all(pool)
        .await?;
        Ok(compute_stats(decode_text::<AttendanceStatus>(values)?))
    }

    /// Statuses for a user within an optional window, for stats.
    pub async fn statuses_for_user(
        pool: &PgPool,
        user_id: DbId,
        range: DateRange,
    ) -> Result<Vec<AttendanceStatus>, sqlx::Error> {
        let values: Vec<String> = sqlx::query_scalar(
            "SELECT status FROM attendance
             WHERE user_id = $1
               AND ($2::DATE IS NULL OR date >= $2)
               AND ($3::DATE IS NULL OR date <= $3)",
        )
        .bind(user_id)
        .bind(range.from)
        .bind(range.to)
        .fetch_all(pool)
        .await?;
        decode_text(values)
    }

    /// The `limit` most recent statuses, newest first, for streaks.
    pub async fn recent_statuses(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<AttendanceStatus>, sqlx::Error> {
        let values: Vec<String> = sqlx::query_scalar(
            "SELECT status FROM attendance
             WHERE user_id = $1
             ORDER BY date DESC
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;
        decode_text(values)
    }

    /// Apply one edit. Returns `None` if no row matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        update: &AttendanceUpdate,
    ) -> Result<Option<Attendance>, sqlx::Error> {
        match update {
            AttendanceUpdate::Status { status } => {
                let query = format!(
                    "UPDATE attendance SET
                        status = $2,
                        check_in_time = CASE WHEN $3 THEN COALESCE(check_in_time, NOW()) ELSE NULL END
                     WHERE id = $1
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Attendance>(&query)
                    .bind(id)
                    .bind(status.as_str())
                    .bind(campus_core::attendance::records_check_in_time(*status))
                    .fetch_optional(pool)
                    .await
            }
            AttendanceUpdate::CheckOut { check_out_time } => {
                let query = format!(
                    "UPDATE attendance SET check_out_time = $2 WHERE id = $1 RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Attendance>(&query)
                    .bind(id)
                    .bind(check_out_time)
                    .fetch_optional(pool)
                    .await
            }
            AttendanceUpdate::Notes { notes } => {
                let query =
                    format!("UPDATE attendance SET notes = $2 WHERE id = $1 RETURNING {COLUMNS}");
                sqlx::query_as::<_, Attendance>(&query)
                    .bind(id)
                    .bind(notes)
                    .fetch_optional(pool)
                    .await
            }
        }
    }

    /// Hard-delete a record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM attendance WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
