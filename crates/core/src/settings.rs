//! Per-user preferences.

use crate::string_enum;

/// Default interface language.
pub const DEFAULT_LANGUAGE: &str = "en";

string_enum! {
    pub enum Theme ("theme") {
        Light => "light",
        Dark => "dark",
    }
}

string_enum! {
    pub enum NotificationPreference ("notification preference") {
        Email => "email",
        Sms => "sms",
        Push => "push",
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

impl Default for NotificationPreference {
    fn default() -> Self {
        NotificationPreference::Email
    }
}

/// A valid stored theme wins; otherwise the OS colour-scheme preference decides.
pub fn resolve_theme(stored: Option<&str>, prefers_dark: bool) -> Theme {
    match stored.and_then(|s| s.parse::<Theme>().ok()) {
        Some(theme) => theme,
        None if prefers_dark => Theme::Dark,
        None => Theme::Light,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_theme_wins() {
        assert_eq!(resolve_theme(Some("light"), true), Theme::Light);
        assert_eq!(resolve_theme(Some("dark"), false), Theme::Dark);
    }

    #[test]
    fn falls_back_to_os_preference() {
        assert_eq!(resolve_theme(None, true), Theme::Dark);
        assert_eq!(resolve_theme(None, false), Theme::Light);
        assert_eq!(resolve_theme(Some("sepia"), true), Theme::Dark);
    }
}
