//! Per-user settings models and DTOs.

use campus_core::settings::{NotificationPreference, Theme, DEFAULT_LANGUAGE};
use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `settings` table. One per user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Settings {
    pub id: DbId,
    pub user_id: DbId,
    #[sqlx(try_from = "String")]
    pub theme: Theme,
    pub language: String,
    #[sqlx(try_from = "String")]
    pub notification_preference: NotificationPreference,
    pub privacy_controls: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_privacy() -> serde_json::Value {
    serde_json::json!({})
}

/// Full replacement of a user's settings (`PUT`).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpsertSettings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_language")]
    #[validate(length(min = 2, max = 10))]
    pub language: String,
    #[serde(default)]
    pub notification_preference: NotificationPreference,
    #[serde(default = "default_privacy")]
    pub privacy_controls: serde_json::Value,
}

impl Default for UpsertSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            language: default_language(),
            notification_preference: NotificationPreference::default(),
            privacy_controls: default_privacy(),
        }
    }
}

/// Single-setting edits (`PATCH`).
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SettingsUpdate {
    Theme { theme: Theme },
    Language { language: String },
    NotificationPreference { notification_preference: NotificationPreference },
    PrivacyControls { privacy_controls: serde_json::Value },
}
