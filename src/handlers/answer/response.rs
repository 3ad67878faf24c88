//! Answer response DTOs

use serde::Serialize;

/// Outcome of a graded submission
///
/// `recorded` is false when an active progress record for the question
/// already existed; the grading result is reported either way.
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub recorded: bool,
    pub correct: bool,
}
