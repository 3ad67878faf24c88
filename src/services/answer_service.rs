//! Answer submission service
//!
//! Resolves the answer key for a question, evaluates the submission and
//! records the outcome. Recording is first-attempt-wins: a later answer
//! to an already-answered question is still graded but not recorded.

use sqlx::PgPool;

use crate::{
    db::repositories::{AlternativeRepository, ExamRepository, QuestionRepository, StatsRepository},
    error::{AppError, AppResult},
    handlers::answer::request::AnswerRequest,
    middleware::Requester,
    services::evaluator::{self, AnswerKey, Submission},
};

/// Outcome of a graded submission
#[derive(Debug, Clone, Copy)]
pub struct AnswerOutcome {
    /// Whether a new progress record was written
    pub recorded: bool,
    /// Whether the submission was graded correct
    pub correct: bool,
}

/// Service for grading and recording answers
pub struct AnswerService;

impl AnswerService {
    /// Grade a submission and record its outcome for the requester
    pub async fn submit(
        pool: &PgPool,
        requester: &Requester,
        payload: &AnswerRequest,
    ) -> AppResult<AnswerOutcome> {
        let user_id = requester.id.ok_or(AppError::Unauthorized)?;

        let question_id = payload
            .question
            .as_ref()
            .and_then(parse_id)
            .ok_or(AppError::MissingParameter("question"))?;

        let question = QuestionRepository::find_by_id(pool, question_id as i32)
            .await?
            .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

        let (key, submission) = if question.multiple() {
            let exam = ExamRepository::find_by_id(pool, question.exam_id)
                .await?
                .ok_or_else(|| {
                    AppError::Database("Question references missing exam".to_string())
                })?;

            let answered_ids = payload
                .alternative
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(|value| parse_id(value).ok_or(AppError::MissingParameter("alternative")))
                .collect::<AppResult<_>>()?;

            let key = AnswerKey::Multiple {
                correct_ids: AlternativeRepository::correct_ids(pool, question.id).await?,
                multiple_correct: exam.multiple_correct,
            };
            (key, Submission::Alternatives(answered_ids))
        } else {
            // An omitted boolean answer counts as answering "false"
            let key = AnswerKey::Boolean {
                correct: question.correct.unwrap_or(false),
            };
            (key, Submission::Boolean(payload.correct.unwrap_or(false)))
        };

        let correct = evaluator::evaluate(&key, &submission)?;
        let recorded = StatsRepository::record_answer(pool, user_id, question.id, correct).await?;

        Ok(AnswerOutcome { recorded, correct })
    }
}

/// Parse an id that may arrive as a JSON number or a numeric string
fn parse_id(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_id_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_id(&json!(42)), Some(42));
        assert_eq!(parse_id(&json!("42")), Some(42));
        assert_eq!(parse_id(&json!(" 7 ")), Some(7));
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert_eq!(parse_id(&json!("abc")), None);
        assert_eq!(parse_id(&json!(1.5)), None);
        assert_eq!(parse_id(&json!(null)), None);
        assert_eq!(parse_id(&json!([1])), None);
    }
}
