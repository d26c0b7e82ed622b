//! Daily routine models and DTOs.

use campus_core::types::{DbId, Timestamp};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `daily_routines` table. Soft-deleted via `is_active`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyRoutine {
    pub id: DbId,
    pub user_id: DbId,
    pub day_of_week: i16,
    pub time_slot: NaiveTime,
    pub activity: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDailyRoutine {
    #[validate(range(min = 0, max = 6))]
    pub day_of_week: i16,
    pub time_slot: NaiveTime,
    #[validate(length(min = 1, max = 200))]
    pub activity: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DailyRoutineUpdate {
    Slot { day_of_week: i16, time_slot: NaiveTime },
    Activity {
        activity: String,
        description: Option<String>,
    },
}
