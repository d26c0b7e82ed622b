//! Schedule entry models and DTOs.

use campus_core::scheduling::{ScheduleType, TimeInterval};
use campus_core::types::{DbId, Timestamp};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `schedules` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Schedule {
    pub id: DbId,
    /// `None` for class-wide entries.
    pub user_id: Option<DbId>,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub subject: Option<String>,
    pub room: Option<String>,
    pub location: Option<String>,
    #[sqlx(rename = "type", try_from = "String")]
    #[serde(rename = "type")]
    pub schedule_type: ScheduleType,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Schedule {
    pub fn interval(&self) -> TimeInterval {
        TimeInterval {
            start: self.start_time,
            end: self.end_time,
        }
    }
}

/// DTO for creating a schedule entry.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateSchedule {
    pub user_id: Option<DbId>,
    #[validate(range(min = 0, max = 6))]
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[validate(length(max = 100))]
    pub subject: Option<String>,
    #[validate(length(max = 50))]
    pub room: Option<String>,
    #[validate(length(max = 200))]
    pub location: Option<String>,
    #[serde(rename = "type", default)]
    pub schedule_type: ScheduleType,
}

/// Schedule edits.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScheduleUpdate {
    Timing {
        day_of_week: i16,
        start_time: NaiveTime,
        end_time: NaiveTime,
    },
    Details {
        subject: Option<String>,
        room: Option<String>,
        location: Option<String>,
        #[serde(rename = "type")]
        schedule_type: ScheduleType,
    },
    Active { is_active: bool },
}
