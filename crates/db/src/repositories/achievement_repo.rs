//! Repository for the `achievements` table.

use campus_core::achievements::Badge;
use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::achievement::Achievement;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, badge_type, badge_name, description, points, earned_at, \
                       created_at, updated_at";

/// Provides achievement queries and idempotent awarding.
pub struct AchievementRepo;

impl AchievementRepo {
    /// A user's badges, most recently earned first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Achievement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM achievements WHERE user_id = $1 ORDER BY earned_at DESC, id DESC"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Award a badge unless the user already holds it.
    ///
    /// A single conditional insert on `uq_achievements_user_badge`, so two
    /// concurrent awards store one row. Returns `None` when already held.
    pub async fn award(
        pool: &PgPool,
        user_id: DbId,
        badge: &Badge,
    ) -> Result<Option<Achievement>, sqlx::Error> {
        let query = format!(
            "INSERT INTO achievements (user_id, badge_type, badge_name, description, points)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT ON CONSTRAINT uq_achievements_user_badge DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Achievement>(&query)
            .bind(user_id)
            .bind(badge.badge_type.as_str())
            .bind(badge.name)
            .bind(badge.description)
            .bind(badge.points)
            .fetch_optional(pool)
            .await
    }

    /// Sum of a user's points (0 with no badges).
    pub async fn total_points(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let total: Option<i64> = sqlx::query_scalar(
            "SELECT SUM(points)::BIGINT FROM achievements WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(total.unwrap_or(0))
    }
}
