//! Progress aggregation and reset
//!
//! Aggregates a requester's active progress records over a course or a
//! single exam, and resets them by marking rather than deleting. Totals
//! count every question in scope, hidden exams included; visibility
//! gates serialization, not progress accounting.

use sqlx::PgPool;

use crate::{
    db::repositories::{ExamRepository, QuestionRepository, StatsRepository},
    error::{AppError, AppResult},
    handlers::stats::response::StatsResponse,
    middleware::Requester,
    services::ContentService,
    utils::{grade, percentage},
};

/// Service for progress aggregates and resets
pub struct StatsService;

impl StatsService {
    /// Aggregate the requester's progress over a course, or over one of
    /// its exams when `exam_name` is given
    pub async fn aggregate(
        pool: &PgPool,
        requester: &Requester,
        course_code: &str,
        exam_name: Option<&str>,
    ) -> AppResult<StatsResponse> {
        let user_id = requester.id.ok_or(AppError::Unauthorized)?;
        let course = ContentService::course_by_code(pool, course_code).await?;

        let (counts, total) = match exam_name {
            Some(name) => {
                let exam = ExamRepository::find_by_course_and_name(pool, course.id, name)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Exam not found".to_string()))?;
                (
                    StatsRepository::aggregate_exam(pool, user_id, exam.id).await?,
                    QuestionRepository::count_by_exam(pool, exam.id).await?,
                )
            }
            None => (
                StatsRepository::aggregate_course(pool, user_id, course.id).await?,
                QuestionRepository::count_by_course(pool, course.id).await?,
            ),
        };

        let answered = counts.correct + counts.incorrect;
        let pct = percentage(counts.correct, answered);

        Ok(StatsResponse {
            answered,
            correct: counts.correct,
            incorrect: counts.incorrect,
            total,
            percentage: pct,
            grade: grade(pct).to_string(),
        })
    }

    /// Mark the requester's active records in the scope as reset
    ///
    /// Returns how many records were marked. Records are kept as history,
    /// never deleted.
    pub async fn reset(
        pool: &PgPool,
        requester: &Requester,
        course_code: &str,
        exam_name: Option<&str>,
    ) -> AppResult<u64> {
        let user_id = requester.id.ok_or(AppError::Unauthorized)?;
        let course = ContentService::course_by_code(pool, course_code).await?;

        let marked = match exam_name {
            Some(name) => {
                let exam = ExamRepository::find_by_course_and_name(pool, course.id, name)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Exam not found".to_string()))?;
                StatsRepository::reset_exam(pool, user_id, exam.id).await?
            }
            None => StatsRepository::reset_course(pool, user_id, course.id).await?,
        };

        Ok(marked)
    }
}
