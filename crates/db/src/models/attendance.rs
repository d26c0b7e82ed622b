//! Attendance models and DTOs.

use campus_core::attendance::{AttendanceStatus, CheckInMethod};
use campus_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `attendance` table. At most one per `(user_id, date)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attendance {
    pub id: DbId,
    pub user_id: DbId,
    pub date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub status: AttendanceStatus,
    pub check_in_time: Option<Timestamp>,
    pub check_out_time: Option<Timestamp>,
    #[sqlx(try_from = "String")]
    pub check_in_method: CheckInMethod,
    pub class_id: Option<String>,
    pub marked_by: Option<DbId>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A single mark. `check_in_time` is filled by the caller for arrivals.
#[derive(Debug, Clone)]
pub struct MarkAttendance {
    pub user_id: DbId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub check_in_time: Option<Timestamp>,
    pub check_in_method: CheckInMethod,
    pub class_id: Option<String>,
    pub marked_by: Option<DbId>,
    pub notes: Option<String>,
}

/// Attendance edits.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttendanceUpdate {
    /// Re-status the record; arrivals keep (or gain) a check-in time.
    Status { status: AttendanceStatus },
    CheckOut { check_out_time: Timestamp },
    Notes { notes: Option<String> },
}

/// Optional date window for history queries (inclusive).
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
