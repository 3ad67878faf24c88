//! Course request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_COURSE_CODE_LENGTH, MAX_COURSE_NAME_LENGTH};

/// Create course request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = MAX_COURSE_CODE_LENGTH))]
    pub code: String,

    #[validate(length(min = 1, max = MAX_COURSE_NAME_LENGTH))]
    pub name: String,
}

/// Update course request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    #[validate(length(min = 1, max = MAX_COURSE_CODE_LENGTH))]
    pub code: Option<String>,

    #[validate(length(min = 1, max = MAX_COURSE_NAME_LENGTH))]
    pub name: Option<String>,
}
