//! Report kinds and the grade-report summary.
//!
//! Reports are stored as opaque JSON snapshots; only the grade summary
//! needs computation beyond what the other core modules already provide.

use serde::Serialize;

use crate::grading::GradeMarks;
use crate::string_enum;

string_enum! {
    pub enum ReportType ("report type") {
        Attendance => "attendance",
        Grades => "grades",
        Tasks => "tasks",
    }
}

/// Per-subject line of a grade report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectAverage {
    pub subject: String,
    pub total_grades: i64,
    pub average_percentage: f64,
}

/// Summary block of a grade report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeReportStats {
    pub total_grades: i64,
    pub average_percentage: f64,
    pub subjects: Vec<SubjectAverage>,
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn row_percentage(row: &GradeMarks) -> f64 {
    match (row.obtained_marks, row.max_marks) {
        (Some(obtained), Some(max)) if max > 0.0 => obtained / max * 100.0,
        _ => 0.0,
    }
}

/// Mean of per-row percentages overall and per subject, to 2 decimals.
pub fn grade_report_stats(rows: &[GradeMarks]) -> GradeReportStats {
    // (subject, count, sum of row percentages), first-encounter order.
    let mut per_subject: Vec<(String, i64, f64)> = Vec::new();

    for row in rows {
        let pct = row_percentage(row);
        match per_subject.iter_mut().find(|(s, _, _)| *s == row.subject) {
            Some((_, count, sum)) => {
                *count += 1;
                *sum += pct;
            }
            None => per_subject.push((row.subject.clone(), 1, pct)),
        }
    }

    let overall = crate::grading::average_row_percentage(rows);

    GradeReportStats {
        total_grades: rows.len() as i64,
        average_percentage: round2(overall),
        subjects: per_subject
            .into_iter()
            .map(|(subject, count, sum)| SubjectAverage {
                subject,
                total_grades: count,
                average_percentage: round2(sum / count as f64),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(subject: &str, obtained: f64, max: f64) -> GradeMarks {
        GradeMarks {
            subject: subject.into(),
            obtained_marks: Some(obtained),
            max_marks: Some(max),
        }
    }

    #[test]
    fn empty_report() {
        let stats = grade_report_stats(&[]);
        assert_eq!(stats.total_grades, 0);
        assert_eq!(stats.average_percentage, 0.0);
        assert!(stats.subjects.is_empty());
    }

    #[test]
    fn averages_row_percentages_per_subject() {
        let stats = grade_report_stats(&[
            row("Math", 2.0, 3.0),
            row("Math", 1.0, 1.0),
            row("Art", 50.0, 100.0),
        ]);
        assert_eq!(stats.total_grades, 3);
        // (66.667 + 100 + 50) / 3 = 72.222
        assert_eq!(stats.average_percentage, 72.22);
        assert_eq!(stats.subjects[0].subject, "Math");
        assert_eq!(stats.subjects[0].total_grades, 2);
        assert_eq!(stats.subjects[0].average_percentage, 83.33);
        assert_eq!(stats.subjects[1].average_percentage, 50.0);
    }

    #[test]
    fn report_type_text() {
        assert_eq!(ReportType::Grades.as_str(), "grades");
        assert!("payroll".parse::<ReportType>().is_err());
    }
}
