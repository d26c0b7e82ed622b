//! Repository for the `settings` table (one row per user).

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::settings::{Settings, SettingsUpdate, UpsertSettings};

const COLUMNS: &str = "id, user_id, theme, language, notification_preference, \
                       privacy_controls, created_at, updated_at";

pub struct SettingsRepo;

impl SettingsRepo {
    pub async fn find_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<Settings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM settings WHERE user_id = $1");
        sqlx::query_as::<_, Settings>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace every setting for a user.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &UpsertSettings,
    ) -> Result<Settings, sqlx::Error> {
        let query = format!(
            "INSERT INTO settings (user_id, theme, language, notification_preference, privacy_controls)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT uq_settings_user_id DO UPDATE SET
                theme = EXCLUDED.theme,
                language = EXCLUDED.language,
                notification_preference = EXCLUDED.notification_preference,
                privacy_controls = EXCLUDED.privacy_controls
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Settings>(&query)
            .bind(user_id)
            .bind(input.theme.as_str())
            .bind(&input.language)
            .bind(input.notification_preference.as_str())
            .bind(&input.privacy_controls)
            .fetch_one(pool)
            .await
    }

    /// Change one setting, creating the row with defaults if needed.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        update: &SettingsUpdate,
    ) -> Result<Settings, sqlx::Error> {
        let (column, value) = match update {
            SettingsUpdate::Theme { theme } => ("theme", serde_json::json!(theme.as_str())),
            SettingsUpdate::Language { language } => ("language", serde_json::json!(language)),
            SettingsUpdate::NotificationPreference {
                notification_preference,
            } => (
                "notification_preference",
                serde_json::json!(notification_preference.as_str()),
            ),
            SettingsUpdate::PrivacyControls { privacy_controls } => {
                ("privacy_controls", privacy_controls.clone())
            }
        };

        // Text columns take the JSON string's text; privacy_controls the JSON itself.
        let expr = if column == "privacy_controls" {
            "$2::JSONB"
        } else {
            "$2::JSONB #>> '{}'"
        };
        let query = format!(
            "INSERT INTO settings (user_id, {column}) VALUES ($1, {expr})
             ON CONFLICT ON CONSTRAINT uq_settings_user_id DO UPDATE SET
                {column} = EXCLUDED.{column}
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Settings>(&query)
            .bind(user_id)
            .bind(value)
            .fetch_one(pool)
            .await
    }
}
