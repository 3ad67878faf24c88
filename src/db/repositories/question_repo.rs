//! Question repository

use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};

use crate::{
    db::filters::{Filters, FilterField, aliased, field},
    error::AppResult,
    models::Question,
};

/// Query-string keys that may filter question lists
///
/// `type` is the wire name for the `question_type` column.
pub const FILTERABLE: &[FilterField] = &[
    field("id"),
    field("text"),
    field("image"),
    field("reason"),
    field("exam_id"),
    field("correct"),
    aliased("type", "question_type"),
];

/// Repository for question database operations
pub struct QuestionRepository;

impl QuestionRepository {
    /// Create a new question
    pub async fn create<'e, E: PgExecutor<'e>>(
        db: E,
        question_type: &str,
        text: &str,
        image: Option<&str>,
        reason: Option<&str>,
        exam_id: i32,
        correct: Option<bool>,
    ) -> AppResult<Question> {
        let question = sqlx::query_as::<_, Question>(
            r#"
            INSERT INTO questions (question_type, text, image, reason, exam_id, correct)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(question_type)
        .bind(text)
        .bind(image)
        .bind(reason)
        .bind(exam_id)
        .bind(correct)
        .fetch_one(db)
        .await?;

        Ok(question)
    }

    /// Find question by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> AppResult<Option<Question>> {
        let question = sqlx::query_as::<_, Question>(r#"SELECT * FROM questions WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(question)
    }

    /// Update question
    ///
    /// The question type is an immutable tagged kind and cannot change.
    pub async fn update<'e, E: PgExecutor<'e>>(
        db: E,
        id: i32,
        text: Option<&str>,
        image: Option<&str>,
        reason: Option<&str>,
        exam_id: Option<i32>,
        correct: Option<bool>,
    ) -> AppResult<Question> {
        let question = sqlx::query_as::<_, Question>(
            r#"
            UPDATE questions
            SET
                text = COALESCE($2, text),
                image = COALESCE($3, image),
                reason = COALESCE($4, reason),
                exam_id = COALESCE($5, exam_id),
                correct = COALESCE($6, correct),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(text)
        .bind(image)
        .bind(reason)
        .bind(exam_id)
        .bind(correct)
        .fetch_one(db)
        .await?;

        Ok(question)
    }

    /// Delete question
    pub async fn delete<'e, E: PgExecutor<'e>>(db: E, id: i32) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM questions WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;

        Ok(())
    }

    /// List questions matching the given filters, ordered by id
    pub async fn list(pool: &PgPool, filters: &Filters) -> AppResult<Vec<Question>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM questions WHERE 1 = 1");
        filters.apply(&mut qb);
        qb.push(" ORDER BY id");

        let questions = qb.build_query_as::<Question>().fetch_all(pool).await?;
        Ok(questions)
    }

    /// List all questions of a course across all its exams, ordered by id
    pub async fn list_by_course(pool: &PgPool, course_id: i32) -> AppResult<Vec<Question>> {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT q.*
            FROM questions q
            JOIN exams e ON e.id = q.exam_id
            WHERE e.course_id = $1
            ORDER BY q.id
            "#,
        )
        .bind(course_id)
        .fetch_all(pool)
        .await?;

        Ok(questions)
    }

    /// List all questions of an exam, ordered by id
    pub async fn list_by_exam(pool: &PgPool, exam_id: i32) -> AppResult<Vec<Question>> {
        let questions =
            sqlx::query_as::<_, Question>(r#"SELECT * FROM questions WHERE exam_id = $1 ORDER BY id"#)
                .bind(exam_id)
                .fetch_all(pool)
                .await?;

        Ok(questions)
    }

    /// Count all questions of a course, hidden exams included
    ///
    /// Progress aggregation counts questions regardless of the hidden
    /// flag, unlike serialization visibility.
    pub async fn count_by_course(pool: &PgPool, course_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM questions q
            JOIN exams e ON e.id = q.exam_id
            WHERE e.course_id = $1
            "#,
        )
        .bind(course_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Count all questions of an exam
    pub async fn count_by_exam(pool: &PgPool, exam_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM questions WHERE exam_id = $1"#)
            .bind(exam_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
