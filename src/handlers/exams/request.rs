//! Exam request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_EXAM_NAME_LENGTH;

/// Create exam request
///
/// `hidden` is admin-only and silently stripped from other requesters.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateExamRequest {
    #[validate(length(min = 1, max = MAX_EXAM_NAME_LENGTH))]
    pub name: String,

    pub course_id: i32,

    /// Whether grading requires the exact set of correct alternatives
    pub multiple_correct: Option<bool>,

    pub hidden: Option<bool>,
}

/// Update exam request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateExamRequest {
    #[validate(length(min = 1, max = MAX_EXAM_NAME_LENGTH))]
    pub name: Option<String>,

    pub course_id: Option<i32>,
    pub multiple_correct: Option<bool>,
    pub hidden: Option<bool>,
}
