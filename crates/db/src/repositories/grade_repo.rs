//! Repository for the `grades` table.

use campus_core::grading::marks_letter;
use campus_core::types::DbId;
use sqlx::PgPool;

use crate::models::grade::{CreateGrade, Grade, GradeFilter, GradeUpdate};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, student_id, subject, obtained_marks, max_marks, grade, exam_type, \
                       semester, academic_year, teacher_id, created_at, updated_at";

/// Provides CRUD operations for grades.
pub struct GradeRepo;

impl GradeRepo {
    /// Record a grade. The letter is derived from the marks unless supplied.
    pub async fn create(
        pool: &PgPool,
        teacher_id: DbId,
        input: &CreateGrade,
    ) -> Result<Grade, sqlx::Error> {
        let letter = input
            .grade
            .clone()
            .unwrap_or_else(|| marks_letter(input.obtained_marks, input.max_marks).to_string());
        let query = format!(
            "INSERT INTO grades
                (student_id, subject, obtained_marks, max_marks, grade, exam_type,
                 semester, academic_year, teacher_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Grade>(&query)
            .bind(input.student_id)
            .bind(&input.subject)
            .bind(input.obtained_marks)
            .bind(input.max_marks)
            .bind(letter)
            .bind(&input.exam_type)
            .bind(&input.semester)
            .bind(&input.academic_year)
            .bind(teacher_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Grade>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM grades WHERE id = $1");
        sqlx::query_as::<_, Grade>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// A student's grades, newest first.
    pub async fn list_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Grade>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM grades WHERE student_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Grade>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Grades in one subject, optionally for one student, newest first.
    pub async fn list_for_subject(
        pool: &PgPool,
        subject: &str,
        student_id: Option<DbId>,
    ) -> Result<Vec<Grade>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM grades
             WHERE subject = $1 AND ($2::BIGINT IS NULL OR student_id = $2)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Grade>(&query)
            .bind(subject)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Class view of a subject, optionally restricted to one grading teacher.
    pub async fn list_for_class_subject(
        pool: &PgPool,
        subject: &str,
        teacher_id: Option<DbId>,
    ) -> Result<Vec<Grade>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM grades
             WHERE subject = $1 AND ($2::BIGINT IS NULL OR teacher_id = $2)
             ORDER BY student_id, created_at DESC"
        );
        sqlx::query_as::<_, Grade>(&query)
            .bind(subject)
            .bind(teacher_id)
            .fetch_all(pool)
            .await
    }

    /// A student's rows in insertion order, for aggregation.
    pub async fn rows_for_student(
        pool: &PgPool,
        student_id: DbId,
    ) -> Result<Vec<Grade>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM grades WHERE student_id = $1 ORDER BY id");
        sqlx::query_as::<_, Grade>(&query)
            .bind(student_id)
            .fetch_all(pool)
            .await
    }

    /// Grades matching every supplied filter, for reports.
    pub async fn list_filtered(
        pool: &PgPool,
        filter: &GradeFilter,
    ) -> Result<Vec<Grade>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM grades
             WHERE ($1::BIGINT IS NULL OR student_id = $1)
               AND ($2::TEXT IS NULL OR subject = $2)
               AND ($3::TEXT IS NULL OR semester = $3)
               AND ($4::TEXT IS NULL OR academic_year = $4)
             ORDER BY id"
        );
        sqlx::query_as::<_, Grade>(&query)
            .bind(filter.student_id)
            .bind(&filter.subject)
            .bind(&filter.semester)
            .bind(&filter.academic_year)
            .fetch_all(pool)
            .await
    }

    /// Apply one edit. Returns `None` if no row matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        update: &GradeUpdate,
    ) -> Result<Option<Grade>, sqlx::Error> {
        match update {
            GradeUpdate::Marks {
                obtained_marks,
                max_marks,
            } => {
                let query = format!(
                    "UPDATE grades SET obtained_marks = $2, max_marks = $3, grade = $4
                     WHERE id = $1
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Grade>(&query)
                    .bind(id)
                    .bind(obtained_marks)
                    .bind(max_marks)
                    .bind(marks_letter(*obtained_marks, *max_marks))
                    .fetch_optional(pool)
                    .await
            }
            GradeUpdate::Letter { grade } => {
                let query = format!("UPDATE grades SET grade = $2 WHERE id = $1 RETURNING {COLUMNS}");
                sqlx::query_as::<_, Grade>(&query)
                    .bind(id)
                    .bind(grade)
                    .fetch_optional(pool)
                    .await
            }
            GradeUpdate::Details {
                exam_type,
                semester,
                academic_year,
            } => {
                let query = format!(
                    "UPDATE grades SET exam_type = $2, semester = $3, academic_year = $4
                     WHERE id = $1
                     RETURNING {COLUMNS}"
                );
                sqlx::query_as::<_, Grade>(&query)
                    .bind(id)
                    .bind(exam_type)
                    .bind(semester)
                    .bind(academic_year)
                    .fetch_optional(pool)
                    .await
            }
        }
    }

    /// Hard-delete a grade. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM grades WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
