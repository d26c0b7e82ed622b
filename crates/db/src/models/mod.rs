//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts, validated with `validator`
//! - A tagged update enum with one variant per mutable field set
//!
//! Enum-valued `TEXT` columns decode into the `campus_core` enums via
//! `#[sqlx(try_from = "String")]` and are bound with `as_str()`.

pub mod achievement;
pub mod attendance;
pub mod daily_routine;
pub mod grade;
pub mod notification;
pub mod profile;
pub mod report;
pub mod schedule;
pub mod session;
pub mod settings;
pub mod task;
