//! Repository for the `reports` table. Reports are never updated.

use campus_core::reports::ReportType;
use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::report::{CreateReport, Report};

const COLUMNS: &str = "id, report_type, generated_by, user_id, data, file_url, generated_at, \
                       created_at, updated_at";

pub struct ReportRepo;

impl ReportRepo {
    /// Store a report snapshot.
    pub async fn create(pool: &PgPool, input: &CreateReport) -> Result<Report, sqlx::Error> {
        let query = format!(
            "INSERT INTO reports (report_type, generated_by, user_id, data)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(input.report_type.as_str())
            .bind(input.generated_by)
            .bind(input.user_id)
            .bind(&input.data)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = $1");
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Newest first, optionally about one user and/or of one type.
    pub async fn list(
        pool: &PgPool,
        user_id: Option<DbId>,
        report_type: Option<ReportType>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Report>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reports
             WHERE ($1::BIGINT IS NULL OR user_id = $1)
               AND ($2::TEXT IS NULL OR report_type = $2)
             ORDER BY generated_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(user_id)
            .bind(report_type.map(ReportType::as_str))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
