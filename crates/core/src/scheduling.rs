//! Weekly schedule entries: interval overlap and free-slot derivation.
//!
//! Times are wall-clock `NaiveTime`s within a single day; the day itself
//! is carried separately as `day_of_week` (0 = Sunday ... 6 = Saturday).

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::error::CoreError;
use crate::string_enum;

/// Start of the working window used for free-slot derivation (08:00).
pub const WORK_DAY_START_HOUR: u32 = 8;

/// End of the working window used for free-slot derivation (18:00).
pub const WORK_DAY_END_HOUR: u32 = 18;

/// Highest valid `day_of_week` value (Saturday).
pub const MAX_DAY_OF_WEEK: i16 = 6;

string_enum! {
    /// Kind of schedule entry.
    pub enum ScheduleType ("schedule type") {
        Class => "class",
        Exam => "exam",
        Activity => "activity",
        Meeting => "meeting",
    }
}

impl Default for ScheduleType {
    fn default() -> Self {
        ScheduleType::Class
    }
}

fn at_hour(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// `[08:00, 18:00)`.
pub fn work_day() -> TimeInterval {
    TimeInterval {
        start: at_hour(WORK_DAY_START_HOUR),
        end: at_hour(WORK_DAY_END_HOUR),
    }
}

// ---------------------------------------------------------------------------
// Intervals
// ---------------------------------------------------------------------------

/// A half-open `[start, end)` time range within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl TimeInterval {
    /// Build an interval, rejecting empty or inverted ranges.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, CoreError> {
        validate_interval(start, end)?;
        Ok(Self { start, end })
    }

    /// Whole minutes between start and end.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Half-open overlap: `a.start < b.end && b.start < a.end`.
///
/// Touching intervals (`[9:00,10:00)` and `[10:00,11:00)`) do not overlap.
pub fn overlaps(a: &TimeInterval, b: &TimeInterval) -> bool {
    a.start < b.end && b.start < a.end
}

/// Entries whose interval overlaps `candidate`.
///
/// The caller is responsible for restricting `entries` to the same user,
/// day and active state, and for excluding the entry being edited.
pub fn find_conflicts<'a, T, F>(entries: &'a [T], candidate: &TimeInterval, interval_of: F) -> Vec<&'a T>
where
    F: Fn(&T) -> TimeInterval,
{
    entries
        .iter()
        .filter(|entry| overlaps(&interval_of(entry), candidate))
        .collect()
}

// ---------------------------------------------------------------------------
// Free slots
// ---------------------------------------------------------------------------

/// A gap in a day's schedule inside the working window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreeSlot {
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_minutes: i64,
}

impl From<TimeInterval> for FreeSlot {
    fn from(interval: TimeInterval) -> Self {
        Self {
            start_time: interval.start,
            end_time: interval.end,
            duration_minutes: interval.duration_minutes(),
        }
    }
}

/// Derive the free gaps in one day's active entries within `[08:00, 18:00)`.
///
/// Entries are sorted by start time. Overlapping entries are merged by
/// tracking the furthest end seen so far, and gaps are clipped to the
/// working window.
pub fn free_slots(entries: &[TimeInterval]) -> Vec<FreeSlot> {
    let window = work_day();
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|interval| interval.start);

    let mut slots = Vec::new();
    let mut cursor = window.start;

    for interval in &sorted {
        if cursor >= window.end {
            break;
        }
        let gap_end = interval.start.min(window.end);
        if gap_end > cursor {
            slots.push(FreeSlot::from(TimeInterval {
                start: cursor,
                end: gap_end,
            }));
        }
        cursor = cursor.max(interval.end);
    }

    if cursor < window.end {
        slots.push(FreeSlot::from(TimeInterval {
            start: cursor,
            end: window.end,
        }));
    }

    slots
}

// ---------------------------------------------------------------------------
// Validation / calendar helpers
// ---------------------------------------------------------------------------

/// `day_of_week` must be within `0..=6`.
pub fn validate_day_of_week(day: i16) -> Result<(), CoreError> {
    if !(0..=MAX_DAY_OF_WEEK).contains(&day) {
        return Err(CoreError::Validation(format!(
            "day_of_week must be between 0 and {MAX_DAY_OF_WEEK}, got {day}"
        )));
    }
    Ok(())
}

/// `end` must be strictly after `start`.
pub fn validate_interval(start: NaiveTime, end: NaiveTime) -> Result<(), CoreError> {
    if end <= start {
        return Err(CoreError::Validation(format!(
            "end_time ({end}) must be after start_time ({start})"
        )));
    }
    Ok(())
}

/// Day-of-week index for a calendar date, 0 = Sunday.
pub fn day_of_week(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn iv(sh: u32, sm: u32, eh: u32, em: u32) -> TimeInterval {
        TimeInterval::new(t(sh, sm), t(eh, em)).unwrap()
    }

    // -----------------------------------------------------------------------
    // Overlap
    // -----------------------------------------------------------------------

    #[test]
    fn partial_overlap_conflicts() {
        let a = iv(9, 0, 10, 0);
        let b = iv(9, 30, 10, 30);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn touching_intervals_do_not_conflict() {
        let a = iv(9, 0, 10, 0);
        let b = iv(10, 0, 11, 0);
        assert!(!overlaps(&a, &b));
        assert!(!overlaps(&b, &a));
    }

    #[test]
    fn containment_conflicts() {
        let outer = iv(8, 0, 12, 0);
        let inner = iv(9, 0, 10, 0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn find_conflicts_filters_entries() {
        let entries = vec![("Math", iv(9, 0, 10, 0)), ("Art", iv(11, 0, 12, 0))];
        let found = find_conflicts(&entries, &iv(9, 45, 11, 0), |(_, i)| *i);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, "Math");
    }

    #[test]
    fn inverted_interval_rejected() {
        assert!(TimeInterval::new(t(10, 0), t(9, 0)).is_err());
        assert!(TimeInterval::new(t(10, 0), t(10, 0)).is_err());
    }

    // -----------------------------------------------------------------------
    // Free slots
    // -----------------------------------------------------------------------

    #[test]
    fn empty_day_is_one_full_slot() {
        let slots = free_slots(&[]);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].start_time, t(8, 0));
        assert_eq!(slots[0].end_time, t(18, 0));
        assert_eq!(slots[0].duration_minutes, 600);
    }

    #[test]
    fn gaps_before_between_and_after() {
        let slots = free_slots(&[iv(14, 0, 15, 30), iv(9, 0, 10, 30)]);
        let spans: Vec<(NaiveTime, NaiveTime, i64)> = slots
            .iter()
            .map(|s| (s.start_time, s.end_time, s.duration_minutes))
            .collect();
        assert_eq!(
            spans,
            vec![
                (t(8, 0), t(9, 0), 60),
                (t(10, 30), t(14, 0), 210),
                (t(15, 30), t(18, 0), 150),
            ]
        );
    }

    #[test]
    fn back_to_back_entries_leave_no_gap() {
        let slots = free_slots(&[iv(8, 0, 9, 0), iv(9, 0, 18, 0)]);
        assert!(slots.is_empty());
    }

    #[test]
    fn overlapping_entries_are_merged() {
        // 9-12 swallows 10-11; the gap starts at 12, not 11.
        let slots = free_slots(&[iv(9, 0, 12, 0), iv(10, 0, 11, 0)]);
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[1].start_time, t(12, 0));
        assert_eq!(slots[1].duration_minutes, 360);
    }

    #[test]
    fn entries_outside_window_are_clipped() {
        let slots = free_slots(&[iv(7, 0, 8, 30), iv(17, 30, 19, 0)]);
        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].start_time, t(8, 30));
        assert_eq!(slots[0].end_time, t(17, 30));
    }

    // -----------------------------------------------------------------------
    // Validation / calendar
    // -----------------------------------------------------------------------

    #[test]
    fn day_of_week_range() {
        assert!(validate_day_of_week(0).is_ok());
        assert!(validate_day_of_week(6).is_ok());
        assert!(validate_day_of_week(7).is_err());
        assert!(validate_day_of_week(-1).is_err());
    }

    #[test]
    fn sunday_is_zero() {
        // 2026-10-18 is a Sunday.
        assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()), 0);
        assert_eq!(day_of_week(NaiveDate::from_ymd_opt(2026, 10, 24).unwrap()), 6);
    }
}
