//! In-app notification kinds.

use crate::string_enum;

string_enum! {
    pub enum NotificationType ("notification type") {
        Attendance => "attendance",
        Grade => "grade",
        Task => "task",
        Announcement => "announcement",
    }
}

impl Default for NotificationType {
    fn default() -> Self {
        NotificationType::Announcement
    }
}
