//! Alternative repository

use std::collections::BTreeSet;

use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};

use crate::{
    db::filters::{Filters, FilterField, field},
    error::AppResult,
    models::Alternative,
};

/// Query-string keys that may filter alternative lists
pub const FILTERABLE: &[FilterField] = &[
    field("id"),
    field("text"),
    field("correct"),
    field("question_id"),
];

/// Repository for alternative database operations
pub struct AlternativeRepository;

impl AlternativeRepository {
    /// Create a new alternative
    pub async fn create<'e, E: PgExecutor<'e>>(
        db: E,
        text: &str,
        correct: bool,
        question_id: i32,
    ) -> AppResult<Alternative> {
        let alternative = sqlx::query_as::<_, Alternative>(
            r#"
            INSERT INTO alternatives (text, correct, question_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(text)
        .bind(correct)
        .bind(question_id)
        .fetch_one(db)
        .await?;

        Ok(alternative)
    }

    /// Find alternative by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> AppResult<Option<Alternative>> {
        let alternative =
            sqlx::query_as::<_, Alternative>(r#"SELECT * FROM alternatives WHERE id = $1"#)
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(alternative)
    }

    /// Update alternative
    pub async fn update<'e, E: PgExecutor<'e>>(
        db: E,
        id: i32,
        text: Option<&str>,
        correct: Option<bool>,
    ) -> AppResult<Alternative> {
        let alternative = sqlx::query_as::<_, Alternative>(
            r#"
            UPDATE alternatives
            SET
                text = COALESCE($2, text),
                correct = COALESCE($3, correct)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(text)
        .bind(correct)
        .fetch_one(db)
        .await?;

        Ok(alternative)
    }

    /// Delete alternative
    pub async fn delete<'e, E: PgExecutor<'e>>(db: E, id: i32) -> AppResult<()> {
        sqlx::query(r#"DELETE FROM alternatives WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;

        Ok(())
    }

    /// List alternatives matching the given filters, ordered by id
    pub async fn list(pool: &PgPool, filters: &Filters) -> AppResult<Vec<Alternative>> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT * FROM alternatives WHERE 1 = 1");
        filters.apply(&mut qb);
        qb.push(" ORDER BY id");

        let alternatives = qb.build_query_as::<Alternative>().fetch_all(pool).await?;
        Ok(alternatives)
    }

    /// List all alternatives of a question, ordered by id
    pub async fn list_by_question(pool: &PgPool, question_id: i32) -> AppResult<Vec<Alternative>> {
        let alternatives = sqlx::query_as::<_, Alternative>(
            r#"SELECT * FROM alternatives WHERE question_id = $1 ORDER BY id"#,
        )
        .bind(question_id)
        .fetch_all(pool)
        .await?;

        Ok(alternatives)
    }

    /// The set of alternative ids marked correct for a question
    pub async fn correct_ids(pool: &PgPool, question_id: i32) -> AppResult<BTreeSet<i64>> {
        let ids: Vec<i32> = sqlx::query_scalar(
            r#"SELECT id FROM alternatives WHERE question_id = $1 AND correct = TRUE"#,
        )
        .bind(question_id)
        .fetch_all(pool)
        .await?;

        Ok(ids.into_iter().map(i64::from).collect())
    }
}
