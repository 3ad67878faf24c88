//! Exam repository

use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};

use crate::{
    db::filters::{Filters, FilterField, field},
    error::AppResult,
    models::{Exam, Question},
};

/// Query-string keys that may filter exam lists
pub const FILTERABLE: &[FilterField] = &[
    field("id"),
    field("name"),
    field("course_id"),
    field("multiple_correct"),
    field("hidden"),
];

/// Repository for exam database operations
pub struct ExamRepository;

impl ExamRepository {
    /// Create a new exam
    pub async fn create<'e, E: PgExecutor<'e>>(
        db: E,
        name: &str,
        course_id: i32,
        multiple_correct: bool,
        hidden: bool,
    ) -> AppResult<Exam> {
        let exam = sqlx::query_as::<_, Exam>(
            r#"
            INSERT INTO exams (name, course_id, multiple_correct, hidden)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(course_id)
        .bind(multiple_correct)
        .bind(hidden)
        .fetch_one(db)
        .await?;

        Ok(exam)
    }

    /// Find exam by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> AppResult<Option<Exam>> {
        let exam = sqlx::query_as::<_, Exam>(r#"SELECT * FROM exams WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(exam)
    }

    /// Find exam by course and name
    pub async fn find_by_course_and_name(
        pool: &PgPool,
        course_id: i32,
        name: &str,
    ) -> AppResult<Option<Exam>> {
        let exam =
            sqlx::query_as::<_, Exam>(r#"SELECT * FROM exams WHERE course_id = $1 AND name = $2"#)
                .bind(course_id)
                .bind(name)
                .fetch_optional(pool)
                .await?;

        Ok(exam)
    }

    /// Update exam
    pub async fn update<'e, E: PgExecutor<'e>>(
        db: E,
        id: i32,
        name: Option<&str>,
        course_id: Option<i32>,
        multiple_correct: Option<bool>,
        hidden: Option<bool>,
    ) -> AppResult<Exam> {
        let exam = sqlx::query_as::<_, Exam>(
            r#"
            UPDATE exams
            SET
                name = COALESCE($2, name),
                course_id = COALESCE($3, course_id),
                multiple_correct = COALESCE($4, multiple_correct),
                hidden = COALESCE($5, hidden),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(course_id)
        .bind(multiple_correct)
        .bind(hidden)
        .fetch_one(db)
        .await?;

        Ok(exam)
    }

    /// Delete exam
    pub async fn delete<'e, E: PgExecutor<'e>>(db: E, id: i32) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM exams WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;

        Ok(())
    }

    /// List exams matching the given filters, ordered by id
    pub async fn list(pool: &PgPool, filters: &Filters) -> AppResult<Vec<Exam>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM exams WHERE 1 = 1");
        filters.apply(&mut qb);
        qb.push(" ORDER BY id");

        let exams = qb.build_query_as::<Exam>().fetch_all(pool).await?;
        Ok(exams)
    }

    /// List all exams of a course, ordered by id
    pub async fn list_by_course(pool: &PgPool, course_id: i32) -> AppResult<Vec<Exam>> {
        let exams =
            sqlx::query_as::<_, Exam>(r#"SELECT * FROM exams WHERE course_id = $1 ORDER BY id"#)
                .bind(course_id)
                .fetch_all(pool)
                .await?;

        Ok(exams)
    }

    /// Count all questions under an exam (hidden flag does not apply here)
    pub async fn question_count(pool: &PgPool, exam_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM questions WHERE exam_id = $1"#)
            .bind(exam_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Positional lookup: the idx-th (1-based) question of an exam
    ///
    /// Visibility of the exam itself is the caller's concern; a hidden
    /// exam must be rejected before this lookup.
    pub async fn positional_question(
        pool: &PgPool,
        exam_id: i32,
        idx: i64,
    ) -> AppResult<Option<Question>> {
        if idx < 1 {
            return Ok(None);
        }
        let question = sqlx::query_as::<_, Question>(
            r#"
            SELECT * FROM questions
            WHERE exam_id = $1
            ORDER BY id
            OFFSET $2 LIMIT 1
            "#,
        )
        .bind(exam_id)
        .bind(idx - 1)
        .fetch_optional(pool)
        .await?;

        Ok(question)
    }
}
