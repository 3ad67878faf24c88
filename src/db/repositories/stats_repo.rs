//! Progress record repository
//!
//! The stats table is append-only: answering writes a new row unless an
//! active row for the (user, question) pair exists, and resetting marks
//! rows instead of deleting them. A partial unique index on
//! (user_id, question_id) WHERE NOT reset backs the idempotence invariant
//! under concurrent submissions.

use sqlx::{PgExecutor, PgPool};

use crate::{error::AppResult, models::ProgressRecord};

/// Active-record counts for a scope, partitioned by outcome
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct OutcomeCounts {
    pub correct: i64,
    pub incorrect: i64,
}

/// Repository for progress record database operations
pub struct StatsRepository;

impl StatsRepository {
    /// Record an answer outcome unless an active record already exists
    ///
    /// Returns whether a new record was written. The insert races against
    /// concurrent submissions for the same pair; the partial unique index
    /// turns the loser's insert into a unique violation, reported as
    /// "not recorded".
    pub async fn record_answer(
        pool: &PgPool,
        user_id: i32,
        question_id: i32,
        correct: bool,
    ) -> AppResult<bool> {
        let inserted: Result<Option<ProgressRecord>, sqlx::Error> =
            sqlx::query_as::<_, ProgressRecord>(
                r#"
            INSERT INTO stats (user_id, question_id, correct)
            SELECT $1, $2, $3
            WHERE NOT EXISTS (
                SELECT 1 FROM stats
                WHERE user_id = $1 AND question_id = $2 AND reset = FALSE
            )
            RETURNING *
            "#,
            )
        .bind(user_id)
        .bind(question_id)
        .bind(correct)
        .fetch_optional(pool)
        .await;

        match inserted {
            Ok(row) => Ok(row.is_some()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// Whether an active record exists for the pair
    pub async fn answered(pool: &PgPool, user_id: i32, question_id: i32) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM stats
            WHERE user_id = $1 AND question_id = $2 AND reset = FALSE
            "#,
        )
        .bind(user_id)
        .bind(question_id)
        .fetch_one(pool)
        .await?;

        Ok(count > 0)
    }

    /// Mark all active records for the user's questions in a course as reset
    ///
    /// Rows are kept for history; returns how many were marked.
    pub async fn reset_course<'e, E: PgExecutor<'e>>(
        db: E,
        user_id: i32,
        course_id: i32,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE stats SET reset = TRUE
            WHERE user_id = $1 AND reset = FALSE AND question_id IN (
                SELECT q.id FROM questions q
                JOIN exams e ON e.id = q.exam_id
                WHERE e.course_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .execute(db)
        .await?;

        Ok(result.rows_affected())
    }

    /// Mark all active records for the user's questions in an exam as reset
    pub async fn reset_exam<'e, E: PgExecutor<'e>>(
        db: E,
        user_id: i32,
        exam_id: i32,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE stats SET reset = TRUE
            WHERE user_id = $1 AND reset = FALSE AND question_id IN (
                SELECT id FROM questions WHERE exam_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(exam_id)
        .execute(db)
        .await?;

        Ok(result.rows_affected())
    }

    /// Count the user's active records across a course, by outcome
    ///
    /// Questions under hidden exams are counted too: aggregation reflects
    /// everything the user has answered, not the admin-gated view.
    pub async fn aggregate_course(
        pool: &PgPool,
        user_id: i32,
        course_id: i32,
    ) -> AppResult<OutcomeCounts> {
        let counts = sqlx::query_as::<_, OutcomeCounts>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE s.correct) AS correct,
                COUNT(*) FILTER (WHERE NOT s.correct) AS incorrect
            FROM stats s
            JOIN questions q ON q.id = s.question_id
            JOIN exams e ON e.id = q.exam_id
            WHERE s.user_id = $1 AND s.reset = FALSE AND e.course_id = $2
            "#,
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_one(pool)
        .await?;

        Ok(counts)
    }

    /// Count the user's active records across an exam, by outcome
    pub async fn aggregate_exam(
        pool: &PgPool,
        user_id: i32,
        exam_id: i32,
    ) -> AppResult<OutcomeCounts> {
        let counts = sqlx::query_as::<_, OutcomeCounts>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE s.correct) AS correct,
                COUNT(*) FILTER (WHERE NOT s.correct) AS incorrect
            FROM stats s
            JOIN questions q ON q.id = s.question_id
            WHERE s.user_id = $1 AND s.reset = FALSE AND q.exam_id = $2
            "#,
        )
        .bind(user_id)
        .bind(exam_id)
        .fetch_one(pool)
        .await?;

        Ok(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures;

    #[tokio::test]
    async fn test_record_answer_writes_once_per_active_pair() {
        let pool = fixtures::test_pool().await;
        let user_id = fixtures::seed_user(&pool).await;
        let code = format!("REC-{}", fixtures::unique_tag());
        let (_, exam_id, question_id) = fixtures::seed_question(&pool, &code).await;

        let first = StatsRepository::record_answer(&pool, user_id, question_id, true)
            .await
            .unwrap();
        assert!(first);

        // A second submission for the same pair is a no-op, whatever its
        // outcome; the first verdict stands.
        let second = StatsRepository::record_answer(&pool, user_id, question_id, false)
            .await
            .unwrap();
        assert!(!second);

        let counts = StatsRepository::aggregate_exam(&pool, user_id, exam_id)
            .await
            .unwrap();
        assert_eq!(counts.correct, 1);
        assert_eq!(counts.incorrect, 0);
    }

    #[tokio::test]
    async fn test_reset_frees_the_slot_and_hides_history() {
        let pool = fixtures::test_pool().await;
        let user_id = fixtures::seed_user(&pool).await;
        let code = format!("RST-{}", fixtures::unique_tag());
        let (course_id, _, question_id) = fixtures::seed_question(&pool, &code).await;

        assert!(
            StatsRepository::record_answer(&pool, user_id, question_id, true)
                .await
                .unwrap()
        );

        let marked = StatsRepository::reset_course(&pool, user_id, course_id)
            .await
            .unwrap();
        assert_eq!(marked, 1);
        assert!(
            !StatsRepository::answered(&pool, user_id, question_id)
                .await
                .unwrap()
        );

        // Resetting frees the slot for a fresh record.
        assert!(
            StatsRepository::record_answer(&pool, user_id, question_id, false)
                .await
                .unwrap()
        );

        // The reset row is kept but stays out of the aggregate.
        let counts = StatsRepository::aggregate_course(&pool, user_id, course_id)
            .await
            .unwrap();
        assert_eq!(counts.correct, 0);
        assert_eq!(counts.incorrect, 1);

        let rows: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM stats WHERE user_id = $1 AND question_id = $2",
        )
        .bind(user_id)
        .bind(question_id)
        .fetch_one(&pool)
        .await
        .unwrap();
        assert_eq!(rows, 2);
    }

    #[tokio::test]
    async fn test_repeated_reset_marks_nothing_new() {
        let pool = fixtures::test_pool().await;
        let user_id = fixtures::seed_user(&pool).await;
        let code = format!("RST2-{}", fixtures::unique_tag());
        let (course_id, _, question_id) = fixtures::seed_question(&pool, &code).await;

        StatsRepository::record_answer(&pool, user_id, question_id, true)
            .await
            .unwrap();
        assert_eq!(
            StatsRepository::reset_course(&pool, user_id, course_id)
                .await
                .unwrap(),
            1
        );
        assert_eq!(
            StatsRepository::reset_course(&pool, user_id, course_id)
                .await
                .unwrap(),
            0
        );
    }
}
