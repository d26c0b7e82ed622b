//! Campus domain logic.
//!
//! Pure functions and types shared by the database and API crates: status
//! enums, attendance/grade/task aggregation, schedule interval checks,
//! achievement thresholds, CSV export and the access policy. Nothing here
//! performs I/O.

pub mod access;
pub mod achievements;
pub mod attendance;
pub mod csv_export;
pub mod error;
pub mod grading;
pub mod notifications;
pub mod pagination;
pub mod reports;
pub mod roles;
pub mod scheduling;
pub mod session;
pub mod settings;
pub mod tasks;
pub mod types;
