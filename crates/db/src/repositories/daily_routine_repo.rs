//! Repository for the `daily_routines` table.

use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::daily_routine::{CreateDailyRoutine, DailyRoutine, DailyRoutineUpdate};

const COLUMNS: &str = "id, user_id, day_of_week, time_slot, activity, description, is_active, \
                       created_at, updated_at";

pub struct DailyRoutineRepo;

impl DailyRoutineRepo {
    /// A user's active routine for the week, by day then time slot.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<DailyRoutine>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_routines
             WHERE user_id = $1 AND is_active = true
             ORDER BY day_of_week, time_slot"
        );
        sqlx::query_as::<_, DailyRoutine>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_for_day(
        pool: &PgPool,
        user_id: DbId,
        day_of_week: i16,
    ) -> Result<Vec<DailyRoutine>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_routines
             WHERE user_id = $1 AND day_of_week = $2 AND is_active = true
             ORDER BY time_slot"
        );
        sqlx::query_as::<_, DailyRoutine>(&query)
            .bind(user_id)
            .bind(day_of_week)
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateDailyRoutine,
    ) -> Result<DailyRoutine, sqlx::Error> {
        let query = format!(
            "INSERT INTO daily_routines (user_id, day_of_week, time_slot, activity, description)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DailyRoutine>(&query)
            .bind(user_id)
            .bind(input.day_of_week)
            .bind(input.time_slot)
            .bind(&input.activity)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Apply one edit to the owner's active entry. `None` if nothing matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        update: &DailyRoutineUpdate,
    ) -> Result<Option<DailyRoutine>, sqlx::Error> {
        match update {
            DailyRoutineUpdate::Slot {
                day_of_week,
                time_slot,
            } => {
                let query = format!(
                    "UPDATE daily_routines SET day_of_week = $3, time_slot = $4
                     WHERE id = $1 AND user_id = $2 AND is_active = true
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, DailyRoutine>(&query)
                    .bind(id)
                    .bind(user_id)
                    .bind(day_of_week)
                    .bind(time_slot)
                    .fetch_optional(pool)
                    .await
            }
            DailyRoutineUpdate::Activity {
                activity,
                description,
            } => {
                let query = format!(
                    "UPDATE daily_routines SET activity = $3, description = $4
                     WHERE id = $1 AND user_id = $2 AND is_active = true
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, DailyRoutine>(&query)
                    .bind(id)
                    .bind(user_id)
                    .bind(activity)
                    .bind(description)
                    .fetch_optional(pool)
                    .await
            }
        }
    }

    /// Soft-delete the owner's entry. Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE daily_routines SET is_active = false
             WHERE id = $1 AND user_id = $2 AND is_active = true",
        )
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
