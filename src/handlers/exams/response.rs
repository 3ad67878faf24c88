//! Exam response DTOs

use serde::{Deserialize, Serialize};

/// Serialized exam
///
/// A hidden exam never reaches this shape for non-admin requesters; it
/// is omitted from lists and NotFound on direct lookup. The `hidden`
/// flag itself stays internal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExamResponse {
    pub id: i32,
    pub name: String,
    pub course_id: i32,
    pub multiple_correct: bool,
    pub question_count: i64,
}
