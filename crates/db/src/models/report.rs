//! Report models and DTOs.

use campus_core::reports::ReportType;
use campus_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `reports` table. Reports are write-once snapshots.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub id: DbId,
    #[sqlx(try_from = "String")]
    pub report_type: ReportType,
    pub generated_by: DbId,
    pub user_id: Option<DbId>,
    pub data: serde_json::Value,
    pub file_url: Option<String>,
    pub generated_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload, assembled by the API from live data.
#[derive(Debug, Clone)]
pub struct CreateReport {
    pub report_type: ReportType,
    pub generated_by: DbId,
    pub user_id: Option<DbId>,
    pub data: serde_json::Value,
}
