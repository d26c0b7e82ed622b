//! Achievement models.

use campus_core::achievements::BadgeType;
use campus_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `achievements` table. Unique per `(user_id, badge_name)`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Achievement {
    pub id: DbId,
    pub user_id: DbId,
    #[sqlx(try_from = "String")]
    pub badge_type: BadgeType,
    pub badge_name: String,
    pub description: Option<String>,
    pub points: i32,
    pub earned_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
