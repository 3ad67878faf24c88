//! Question request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_QUESTION_TEXT_LENGTH;

/// Create question request
///
/// `type` must be one of the supported question types; boolean questions
/// must carry `correct`. Both rules are checked in the content service
/// because they span fields.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[serde(rename = "type")]
    pub question_type: String,

    #[validate(length(min = 1, max = MAX_QUESTION_TEXT_LENGTH))]
    pub text: String,

    /// Image file name, or an absolute URL kept verbatim
    pub image: Option<String>,

    /// Explanation shown after answering
    pub reason: Option<String>,

    pub exam_id: i32,

    /// Correct value for boolean questions
    pub correct: Option<bool>,
}

/// Update question request; the question type is immutable
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuestionRequest {
    #[validate(length(min = 1, max = MAX_QUESTION_TEXT_LENGTH))]
    pub text: Option<String>,

    pub image: Option<String>,
    pub reason: Option<String>,
    pub exam_id: Option<i32>,
    pub correct: Option<bool>,
}
