//! Request handlers, one module per resource.

pub mod achievements;
pub mod attendance;
pub mod auth;
pub mod dashboard;
pub mod grades;
pub mod navigation;
pub mod notifications;
pub mod profiles;
pub mod reports;
pub mod routines;
pub mod schedules;
pub mod settings;
pub mod tasks;
