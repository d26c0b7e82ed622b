//! Grade aggregation and letter-grade mapping.
//!
//! Pure logic -- no database access. Percentages are computed from summed
//! marks (`Σobtained / Σmax`), not from the mean of per-row ratios, except
//! for [`average_row_percentage`] which the achievement and report paths
//! use.

use serde::Serialize;

use crate::error::CoreError;

/// Letter-grade step function, highest threshold first.
const LETTER_THRESHOLDS: &[(f64, &str)] = &[
    (90.0, "A+"),
    (85.0, "A"),
    (80.0, "B+"),
    (75.0, "B"),
    (70.0, "C+"),
    (65.0, "C"),
    (60.0, "D"),
];

/// Grade assigned below the lowest threshold.
const FAILING_GRADE: &str = "F";

/// Map a percentage to its letter grade.
pub fn letter_grade(percentage: f64) -> &'static str {
    LETTER_THRESHOLDS
        .iter()
        .find(|(min, _)| percentage >= *min)
        .map(|(_, letter)| *letter)
        .unwrap_or(FAILING_GRADE)
}

/// Letter for one pair of marks, from the unrounded percentage.
/// A non-positive `max` counts as 0%.
pub fn marks_letter(obtained: f64, max: f64) -> &'static str {
    if max > 0.0 {
        letter_grade(obtained / max * 100.0)
    } else {
        letter_grade(0.0)
    }
}

/// `round(100 * obtained / max)`, or 0 when `max` is not positive.
pub fn rounded_percentage(obtained: f64, max: f64) -> i64 {
    if max > 0.0 {
        (obtained / max * 100.0).round() as i64
    } else {
        0
    }
}

/// Reject marks a teacher could not have meant.
pub fn validate_marks(obtained: f64, max: f64) -> Result<(), CoreError> {
    if !obtained.is_finite() || !max.is_finite() {
        return Err(CoreError::Validation("Marks must be finite numbers".into()));
    }
    if max <= 0.0 {
        return Err(CoreError::Validation(
            "max_marks must be greater than zero".into(),
        ));
    }
    if obtained < 0.0 || obtained > max {
        return Err(CoreError::Validation(format!(
            "obtained_marks must be between 0 and {max}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// The subset of a grade row the aggregations need.
#[derive(Debug, Clone)]
pub struct GradeMarks {
    pub subject: String,
    pub obtained_marks: Option<f64>,
    pub max_marks: Option<f64>,
}

/// Marks totals for a single subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectStats {
    pub subject: String,
    pub obtained: f64,
    pub total: f64,
    pub count: i64,
    pub percentage: i64,
}

impl SubjectStats {
    /// Obtained/total ratio; a subject with no possible marks ranks as 0.
    fn ratio(&self) -> f64 {
        if self.total > 0.0 {
            self.obtained / self.total
        } else {
            0.0
        }
    }
}

/// A student's overall and per-subject grade summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeStats {
    pub average_percentage: i64,
    pub letter_grade: &'static str,
    pub total_marks: f64,
    pub max_possible_marks: f64,
    pub total_grades: i64,
    /// Subjects in first-encounter order.
    pub subjects: Vec<SubjectStats>,
    pub best_subject: Option<String>,
}

/// Summarise a student's grade rows. Missing marks count as zero.
pub fn compute_stats(rows: &[GradeMarks]) -> GradeStats {
    let mut subjects: Vec<SubjectStats> = Vec::new();
    let mut total_marks = 0.0;
    let mut max_possible_marks = 0.0;

    for row in rows {
        let obtained = row.obtained_marks.unwrap_or(0.0);
        let max = row.max_marks.unwrap_or(0.0);
        total_marks += obtained;
        max_possible_marks += max;

        match subjects.iter_mut().find(|s| s.subject == row.subject) {
            Some(entry) => {
                entry.obtained += obtained;
                entry.total += max;
                entry.count += 1;
            }
            None => subjects.push(SubjectStats {
                subject: row.subject.clone(),
                obtained,
                total: max,
                count: 1,
                percentage: 0,
            }),
        }
    }

    for entry in &mut subjects {
        entry.percentage = rounded_percentage(entry.obtained, entry.total);
    }

    let average_percentage = rounded_percentage(total_marks, max_possible_marks);
    let best_subject = best_subject(&subjects).map(|s| s.subject.clone());

    GradeStats {
        average_percentage,
        letter_grade: letter_grade(average_percentage as f64),
        total_marks,
        max_possible_marks,
        total_grades: rows.len() as i64,
        subjects,
        best_subject,
    }
}

/// The subject with the highest obtained/total ratio. Ties keep the
/// subject encountered first.
pub fn best_subject(subjects: &[SubjectStats]) -> Option<&SubjectStats> {
    subjects.iter().fold(None, |best, candidate| match best {
        Some(current) if current.ratio() >= candidate.ratio() => Some(current),
        _ => Some(candidate),
    })
}

/// Mean of per-row percentages over every row (rows without marks add 0).
pub fn average_row_percentage(rows: &[GradeMarks]) -> f64 {
    let sum: f64 = rows
        .iter()
        .map(|row| match (row.obtained_marks, row.max_marks) {
            (Some(obtained), Some(max)) if max > 0.0 => obtained / max * 100.0,
            _ => 0.0,
        })
        .sum();
    sum / rows.len().max(1) as f64
}
