//! Grade models and DTOs.

use campus_core::grading::GradeMarks;
use campus_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `grades` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Grade {
    pub id: DbId,
    pub student_id: DbId,
    pub subject: String,
    pub obtained_marks: Option<f64>,
    pub max_marks: Option<f64>,
    /// Letter grade; derived from the marks when not supplied.
    pub grade: String,
    pub exam_type: Option<String>,
    pub semester: Option<String>,
    pub academic_year: Option<String>,
    pub teacher_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Grade> for GradeMarks {
    fn from(row: &Grade) -> Self {
        GradeMarks {
            subject: row.subject.clone(),
            obtained_marks: row.obtained_marks,
            max_marks: row.max_marks,
        }
    }
}

/// DTO for recording a grade. The grading teacher comes from the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateGrade {
    pub student_id: DbId,
    #[validate(length(min = 1, max = 100))]
    pub subject: String,
    pub obtained_marks: f64,
    pub max_marks: f64,
    #[validate(length(min = 1, max = 3))]
    pub grade: Option<String>,
    #[validate(length(max = 50))]
    pub exam_type: Option<String>,
    #[validate(length(max = 50))]
    pub semester: Option<String>,
    #[validate(length(max = 20))]
    pub academic_year: Option<String>,
}

/// Grade edits.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GradeUpdate {
    /// New marks; the letter is re-derived.
    Marks { obtained_marks: f64, max_marks: f64 },
    /// Override the letter without touching marks.
    Letter { grade: String },
    Details {
        exam_type: Option<String>,
        semester: Option<String>,
        academic_year: Option<String>,
    },
}

/// Filters for report generation. `None` matches everything.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GradeFilter {
    pub student_id: Option<DbId>,
    pub subject: Option<String>,
    pub semester: Option<String>,
    pub academic_year: Option<String>,
}
