//! Alternative request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::MAX_ALTERNATIVE_TEXT_LENGTH;

/// Create alternative request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAlternativeRequest {
    #[validate(length(min = 1, max = MAX_ALTERNATIVE_TEXT_LENGTH))]
    pub text: String,

    pub correct: Option<bool>,

    pub question_id: i32,
}

/// Update alternative request; the owning question cannot change
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAlternativeRequest {
    #[validate(length(min = 1, max = MAX_ALTERNATIVE_TEXT_LENGTH))]
    pub text: Option<String>,

    pub correct: Option<bool>,
}
