//! Account roles.
//!
//! These must match the `CHECK` constraint on `profiles.role` in
//! `20260301000002_create_profiles.sql`.

use crate::string_enum;

pub const ROLE_STUDENT: &str = "student";
pub const ROLE_TEACHER: &str = "teacher";
pub const ROLE_ADMIN: &str = "admin";

string_enum! {
    /// The role carried by every profile and embedded in access tokens.
    pub enum Role ("role") {
        Student => "student",
        Teacher => "teacher",
        Admin => "admin",
    }
}

impl Role {
    /// Teachers and admins share the "staff" surfaces (marking attendance,
    /// managing grades, assigning tasks, listing students).
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Teacher | Role::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_roles() {
        assert_eq!(ROLE_STUDENT.parse::<Role>().unwrap(), Role::Student);
        assert_eq!(ROLE_TEACHER.parse::<Role>().unwrap(), Role::Teacher);
        assert_eq!(ROLE_ADMIN.parse::<Role>().unwrap(), Role::Admin);
    }

    #[test]
    fn rejects_unknown_role() {
        let err = "principal".parse::<Role>().unwrap_err();
        assert!(err.to_string().contains("Invalid role"));
    }

    #[test]
    fn staff_excludes_students() {
        assert!(!Role::Student.is_staff());
        assert!(Role::Teacher.is_staff());
        assert!(Role::Admin.is_staff());
    }
}
