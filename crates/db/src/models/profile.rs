//! Profile (user account) models and DTOs.

use campus_core::roles::Role;
use campus_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `profiles` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Profile {
    pub id: DbId,
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub class_id: Option<String>,
    pub student_id: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub profile_pic: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert payload. The API hashes the password before building this.
#[derive(Debug, Clone)]
pub struct CreateProfile {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub class_id: Option<String>,
    pub student_id: Option<String>,
    pub department: Option<String>,
    pub phone: Option<String>,
    pub enrollment_date: Option<NaiveDate>,
}

/// Profile edits, one variant per field group.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfileUpdate {
    Details {
        full_name: String,
        phone: Option<String>,
        department: Option<String>,
        profile_pic: Option<String>,
    },
    Enrollment {
        class_id: Option<String>,
        student_id: Option<String>,
        enrollment_date: Option<NaiveDate>,
    },
    Role {
        role: Role,
    },
    Active {
        is_active: bool,
    },
}

/// Number of profiles holding a role.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RoleCount {
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub count: i64,
}
