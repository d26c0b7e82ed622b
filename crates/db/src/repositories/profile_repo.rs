//! Repository for the `profiles` table.

use campus_core::roles::Role;
use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::profile::{CreateProfile, Profile, ProfileUpdate, RoleCount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, full_name, email, password_hash, role, class_id, student_id, \
                       department, phone, profile_pic, enrollment_date, is_active, \
                       created_at, updated_at";

/// Provides CRUD operations for profiles.
pub struct ProfileRepo;

impl ProfileRepo {
    /// Insert a new profile, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateProfile) -> Result<Profile, sqlx::Error> {
        let query = format!(
            "INSERT INTO profiles
                (full_name, email, password_hash, role, class_id, student_id,
                 department, phone, enrollment_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(input.role.as_str())
            .bind(&input.class_id)
            .bind(&input.student_id)
            .bind(&input.department)
            .bind(&input.phone)
            .bind(input.enrollment_date)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as::<_, Profile>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a profile by email (case-insensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Profile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM profiles WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, Profile>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List profiles, optionally restricted to one role, newest first.
    pub async fn list(
        pool: &PgPool,
        role: Option<Role>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM profiles
             WHERE ($1::TEXT IS NULL OR role = $1)
             ORDER BY created_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(role.map(Role::as_str))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Active students ordered by name, optionally within one class.
    pub async fn list_students(
        pool: &PgPool,
        class_id: Option<&str>,
    ) -> Result<Vec<Profile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM profiles
             WHERE role = 'student' AND is_active = true
               AND ($1::TEXT IS NULL OR class_id = $1)
             ORDER BY full_name"
        );
        sqlx::query_as::<_, Profile>(&query)
            .bind(class_id)
            .fetch_all(pool)
            .await
    }

    /// Apply one field-group edit. Returns `None` if no row matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        update: &ProfileUpdate,
    ) -> Result<Option<Profile>, sqlx::Error> {
        match update {
            ProfileUpdate::Details {
                full_name,
                phone,
                department,
                profile_pic,
            } => {
                let query = format!(
                    "UPDATE profiles SET full_name = $2, phone = $3, department = $4,
                        profile_pic = $5
                     WHERE id = $1
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Profile>(&query)
                    .bind(id)
                    .bind(full_name)
                    .bind(phone)
                    .bind(department)
                    .bind(profile_pic)
                    .fetch_optional(pool)
                    .await
            }
            ProfileUpdate::Enrollment {
                class_id,
                student_id,
                enrollment_date,
            } => {
                let query = format!(
                    "UPDATE profiles SET class_id = $2, student_id = $3, enrollment_date = $4
                     WHERE id = $1
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Profile>(&query)
                    .bind(id)
                    .bind(class_id)
                    .bind(student_id)
                    .bind(enrollment_date)
                    .fetch_optional(pool)
                    .await
            }
            ProfileUpdate::Role { role } => {
                let query = format!("UPDATE profiles SET role = $2 WHERE id = $1 RETURNING {COLUMNS}");
                sqlx::query_as::<_, Profile>(&query)
                    .bind(id)
                    .bind(role.as_str())
                    .fetch_optional(pool)
                    .await
            }
            ProfileUpdate::Active { is_active } => {
                let query =
                    format!("UPDATE profiles SET is_active = $2 WHERE id = $1 RETURNING {COLUMNS}");
                sqlx::query_as::<_, Profile>(&query)
                    .bind(id)
                    .bind(is_active)
                    .fetch_optional(pool)
                    .await
            }
        }
    }

    /// Soft-deactivate a profile. Returns `true` if the row was updated.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE profiles SET is_active = false WHERE id = $1 AND is_active = true")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Active profiles per role.
    pub async fn count_by_role(pool: &PgPool) -> Result<Vec<RoleCount>, sqlx::Error> {
        sqlx::query_as::<_, RoleCount>(
            "SELECT role, COUNT(*) AS count FROM profiles
             WHERE is_active = true
             GROUP BY role
             ORDER BY role",
        )
        .fetch_all(pool)
        .await
    }
}
