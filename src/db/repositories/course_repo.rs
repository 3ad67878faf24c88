//! Course repository

use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};

use crate::{
    db::filters::{Filters, FilterField, field},
    error::AppResult,
    models::{Course, Question},
};

/// Query-string keys that may filter course lists
pub const FILTERABLE: &[FilterField] = &[field("id"), field("code"), field("name")];

/// Repository for course database operations
pub struct CourseRepository;

impl CourseRepository {
    /// Create a new course
    pub async fn create<'e, E: PgExecutor<'e>>(db: E, code: &str, name: &str) -> AppResult<Course> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            INSERT INTO courses (code, name)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(code)
        .bind(name)
        .fetch_one(db)
        .await?;

        Ok(course)
    }

    /// Find course by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> AppResult<Option<Course>> {
        let course = sqlx::query_as::<_, Course>(r#"SELECT * FROM courses WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(course)
    }

    /// Find course by its unique code
    pub async fn find_by_code(pool: &PgPool, code: &str) -> AppResult<Option<Course>> {
        let course = sqlx::query_as::<_, Course>(r#"SELECT * FROM courses WHERE code = $1"#)
            .bind(code)
            .fetch_optional(pool)
            .await?;

        Ok(course)
    }

    /// Update course
    pub async fn update<'e, E: PgExecutor<'e>>(
        db: E,
        id: i32,
        code: Option<&str>,
        name: Option<&str>,
    ) -> AppResult<Course> {
        let course = sqlx::query_as::<_, Course>(
            r#"
            UPDATE courses
            SET
                code = COALESCE($2, code),
                name = COALESCE($3, name),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(code)
        .bind(name)
        .fetch_one(db)
        .await?;

        Ok(course)
    }

    /// Delete course
    pub async fn delete<'e, E: PgExecutor<'e>>(db: E, id: i32) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM courses WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;

        Ok(())
    }

    /// List courses matching the given filters, ordered by id
    pub async fn list(pool: &PgPool, filters: &Filters) -> AppResult<Vec<Course>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM courses WHERE 1 = 1");
        filters.apply(&mut qb);
        qb.push(" ORDER BY id");

        let courses = qb.build_query_as::<Course>().fetch_all(pool).await?;
        Ok(courses)
    }

    /// Count questions reachable through the course's non-hidden exams
    pub async fn visible_question_count(pool: &PgPool, course_id: i32) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM questions q
            JOIN exams e ON e.id = q.exam_id
            WHERE e.course_id = $1 AND e.hidden = FALSE
            "#,
        )
        .bind(course_id)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Positional lookup: the idx-th (1-based) question among the course's
    /// non-hidden exams, in stable question order
    ///
    /// The visible subset is re-derived on every call; positions are never
    /// cached here because visibility can change between calls.
    pub async fn positional_question(
        pool: &PgPool,
        course_id: i32,
        idx: i64,
    ) -> AppResult<Option<Question>> {
        if idx < 1 {
            return Ok(None);
        }
        let question = sqlx::query_as::<_, Question>(
            r#"
            SELECT q.*
            FROM questions q
            JOIN exams e ON e.id = q.exam_id
            WHERE e.course_id = $1 AND e.hidden = FALSE
            ORDER BY q.id
            OFFSET $2 LIMIT 1
            "#,
        )
        .bind(course_id)
        .bind(idx - 1)
        .fetch_optional(pool)
        .await?;

        Ok(question)
    }
}
