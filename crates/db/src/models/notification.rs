//! Notification models and DTOs.

use campus_core::notifications::NotificationType;
use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub message: String,
    #[sqlx(rename = "type", try_from = "String")]
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for sending one notification.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNotification {
    pub user_id: DbId,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
    #[serde(rename = "type", default)]
    pub notification_type: NotificationType,
}

/// DTO for sending the same notification to many users.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBulkNotification {
    #[validate(length(min = 1, max = 1000))]
    pub user_ids: Vec<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
    #[serde(rename = "type", default)]
    pub notification_type: NotificationType,
}
