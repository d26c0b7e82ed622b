//! Achievement badges: attendance streaks and academic thresholds.
//!
//! The badge table is fixed. Awarding itself is an atomic conditional
//! insert in the database layer keyed on `(user_id, badge_name)`; this
//! module only decides which badges a user qualifies for.

use serde::Serialize;

use crate::attendance::AttendanceStatus;
use crate::string_enum;

/// Number of most recent attendance rows scanned for a streak.
pub const STREAK_WINDOW: i64 = 30;

string_enum! {
    /// Category of an earned badge.
    pub enum BadgeType ("badge type") {
        Attendance => "attendance",
        Academic => "academic",
        Task => "task",
        Participation => "participation",
    }
}

/// A badge definition from the fixed table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Badge {
    pub badge_type: BadgeType,
    pub name: &'static str,
    pub description: &'static str,
    /// Streak length (attendance) or average percentage (academic).
    pub threshold: f64,
    pub points: i32,
}

pub const WEEK_WARRIOR: Badge = Badge {
    badge_type: BadgeType::Attendance,
    name: "Week Warrior",
    description: "Attended 7 consecutive days",
    threshold: 7.0,
    points: 50,
};

pub const PERFECT_MONTH: Badge = Badge {
    badge_type: BadgeType::Attendance,
    name: "Perfect Month",
    description: "Attended 30 consecutive days",
    threshold: 30.0,
    points: 200,
};

pub const ACADEMIC_EXCELLENCE: Badge = Badge {
    badge_type: BadgeType::Academic,
    name: "Academic Excellence",
    description: "Achieved 90%+ average grade",
    threshold: 90.0,
    points: 100,
};

pub const SCHOLAR: Badge = Badge {
    badge_type: BadgeType::Academic,
    name: "Scholar",
    description: "Achieved 95%+ average grade",
    threshold: 95.0,
    points: 150,
};

pub const BADGES: &[Badge] = &[WEEK_WARRIOR, PERFECT_MONTH, ACADEMIC_EXCELLENCE, SCHOLAR];

// ---------------------------------------------------------------------------
// Streaks
// ---------------------------------------------------------------------------

/// Attendance streak over the scanned window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Streak {
    /// Run length at the end of the scan (the oldest row scanned).
    pub current: u32,
    /// Longest run seen anywhere in the scan.
    pub max: u32,
}

/// Walk statuses (most recent first) counting consecutive attended days.
///
/// `absent` resets the run, `present` and `late` extend it, and `excused`
/// or `half_day` leave it unchanged.
pub fn compute_streak<I>(statuses_most_recent_first: I) -> Streak
where
    I: IntoIterator<Item = AttendanceStatus>,
{
    let mut streak = Streak::default();
    for status in statuses_most_recent_first {
        match status {
            AttendanceStatus::Absent => streak.current = 0,
            AttendanceStatus::Present | AttendanceStatus::Late => {
                streak.current += 1;
                streak.max = streak.max.max(streak.current);
            }
            AttendanceStatus::Excused | AttendanceStatus::HalfDay => {}
        }
    }
    streak
}

/// Attendance badges whose streak threshold is met by `streak.max`.
pub fn streak_badges(streak: Streak) -> Vec<Badge> {
    qualifying(BadgeType::Attendance, f64::from(streak.max))
}

/// Academic badges whose threshold is met by `average_percentage`.
///
/// Each threshold is evaluated independently, so 95% earns both.
pub fn academic_badges(average_percentage: f64) -> Vec<Badge> {
    qualifying(BadgeType::Academic, average_percentage)
}

fn qualifying(badge_type: BadgeType, value: f64) -> Vec<Badge> {
    BADGES
        .iter()
        .filter(|badge| badge.badge_type == badge_type && value >= badge.threshold)
        .copied()
        .collect()
}

/// Sum of points across earned achievements.
pub fn total_points<I>(points: I) -> i64
where
    I: IntoIterator<Item = i32>,
{
    points.into_iter().map(i64::from).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use AttendanceStatus::*;

    #[test]
    fn badge_descriptions() {
        let described: Vec<(&str, &str)> = BADGES.iter().map(|b| (b.name, b.description)).collect();
        assert_eq!(
            described,
            vec![
                ("Week Warrior", "Attended 7 consecutive days"),
                ("Perfect Month", "Attended 30 consecutive days"),
                ("Academic Excellence", "Achieved 90%+ average grade"),
                ("Scholar", "Achieved 95%+ average grade"),
            ]
        );
    }

    fn names(badges: &[Badge]) -> Vec<&'static str> {
        badges.iter().map(|b| b.name).collect()
    }

    #[test]
    fn empty_history_has_no_streak() {
        assert_eq!(compute_streak([]), Streak::default());
    }

    #[test]
    fn absent_resets_running_streak() {
        let streak = compute_streak([Present, Present, Present, Absent, Late]);
        assert_eq!(streak.current, 1);
        assert_eq!(streak.max, 3);
    }

    #[test]
    fn excused_and_half_day_do_not_break_streak() {
        let streak = compute_streak([Present, Excused, Late, HalfDay, Present]);
        assert_eq!(streak.current, 3);
        assert_eq!(streak.max, 3);
    }

    #[test]
    fn week_of_attendance_earns_week_warrior() {
        let streak = compute_streak(std::iter::repeat(Present).take(7));
        assert_eq!(names(&streak_badges(streak)), ["Week Warrior"]);
    }

    #[test]
    fn badges_follow_longest_run() {
        // 7 present, then an absence, then 2 present: the run broke but
        // the week was still attended.
        let statuses = std::iter::repeat(Present)
            .take(7)
            .chain([Absent, Present, Present]);
        let streak = compute_streak(statuses);
        assert_eq!(streak.current, 2);
        assert_eq!(names(&streak_badges(streak)), ["Week Warrior"]);
    }

    #[test]
    fn full_window_earns_both_attendance_badges() {
        let streak = compute_streak(std::iter::repeat(Late).take(STREAK_WINDOW as usize));
        assert_eq!(names(&streak_badges(streak)), ["Week Warrior", "Perfect Month"]);
    }

    #[test]
    fn six_days_earns_nothing() {
        let streak = compute_streak(std::iter::repeat(Present).take(6));
        assert!(streak_badges(streak).is_empty());
    }

    #[test]
    fn academic_thresholds_are_independent() {
        assert!(academic_badges(89.99).is_empty());
        assert_eq!(names(&academic_badges(90.0)), ["Academic Excellence"]);
        assert_eq!(
            names(&academic_badges(95.0)),
            ["Academic Excellence", "Scholar"]
        );
    }

    #[test]
    fn points_are_summed() {
        assert_eq!(total_points([50, 200, 100]), 350);
        assert_eq!(total_points([]), 0);
    }
}
