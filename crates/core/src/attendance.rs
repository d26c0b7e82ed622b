//! Attendance statuses, check-in methods, and presence aggregation.
//!
//! Pure logic -- the caller fetches the attendance rows and passes their
//! statuses in.

use rand::Rng;
use serde::Serialize;

use crate::error::CoreError;
use crate::string_enum;

/// Weight of a half-day towards the effective-days count.
pub const HALF_DAY_WEIGHT: f64 = 0.5;

/// Maximum accepted length of a scanned QR / barcode payload.
pub const MAX_SCAN_PAYLOAD_LEN: usize = 512;

string_enum! {
    /// Status of a single attendance record.
    pub enum AttendanceStatus ("attendance status") {
        Present => "present",
        Absent => "absent",
        Late => "late",
        Excused => "excused",
        HalfDay => "half_day",
    }
}

string_enum! {
    /// How a check-in was captured.
    pub enum CheckInMethod ("check-in method") {
        Qr => "qr",
        Barcode => "barcode",
        /// Simulated only; no hardware integration.
        Biometric => "biometric",
        Manual => "manual",
        Proximity => "proximity",
        Facial => "facial",
    }
}

/// Only arrivals get a check-in timestamp.
pub fn records_check_in_time(status: AttendanceStatus) -> bool {
    matches!(status, AttendanceStatus::Present | AttendanceStatus::Late)
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Per-user presence summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceStats {
    pub total: i64,
    pub present: i64,
    pub absent: i64,
    pub late: i64,
    pub excused: i64,
    pub half_day: i64,
    /// `present + late + 0.5 * half_day`.
    pub effective_days: f64,
    /// `round(100 * effective_days / total)`, or 0 with no records.
    pub percentage: i64,
}

/// Summarise a user's attendance statuses.
pub fn compute_stats<I>(statuses: I) -> AttendanceStats
where
    I: IntoIterator<Item = AttendanceStatus>,
{
    let mut stats = AttendanceStats {
        total: 0,
        present: 0,
        absent: 0,
        late: 0,
        excused: 0,
        half_day: 0,
        effective_days: 0.0,
        percentage: 0,
    };

    for status in statuses {
        stats.total += 1;
        match status {
            AttendanceStatus::Present => stats.present += 1,
            AttendanceStatus::Absent => stats.absent += 1,
            AttendanceStatus::Late => stats.late += 1,
            AttendanceStatus::Excused => stats.excused += 1,
            AttendanceStatus::HalfDay => stats.half_day += 1,
        }
    }

    stats.effective_days =
        (stats.present + stats.late) as f64 + stats.half_day as f64 * HALF_DAY_WEIGHT;

    if stats.total > 0 {
        stats.percentage = (stats.effective_days / stats.total as f64 * 100.0).round() as i64;
    }

    stats
}

// ---------------------------------------------------------------------------
// Check-in capture
// ---------------------------------------------------------------------------

/// Validate the raw payload captured by a scanner-based check-in.
///
/// QR and barcode check-ins must carry the decoded payload; the other
/// methods ignore it.
pub fn validate_scan_payload(
    method: CheckInMethod,
    payload: Option<&str>,
) -> Result<(), CoreError> {
    if !matches!(method, CheckInMethod::Qr | CheckInMethod::Barcode) {
        return Ok(());
    }

    let payload = payload.map(str::trim).unwrap_or_default();
    if payload.is_empty() {
        return Err(CoreError::Validation(format!(
            "A scanned payload is required for {method} check-in"
        )));
    }
    if payload.len() > MAX_SCAN_PAYLOAD_LEN {
        return Err(CoreError::Validation(format!(
            "Scanned payload must be at most {MAX_SCAN_PAYLOAD_LEN} characters"
        )));
    }
    Ok(())
}

/// Produce a synthetic biometric match id: `bio_<unix_millis>_<9 base-36 chars>`.
pub fn simulate_biometric_match(now: crate::types::Timestamp) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..9)
        .filter_map(|_| std::char::from_digit(rng.random_range(0..36), 36))
        .collect();
    format!("bio_{}_{suffix}", now.timestamp_millis())
}
