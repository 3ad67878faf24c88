//! Question response DTOs

use serde::{Deserialize, Serialize};

/// Serialized question
///
/// Multiple-choice questions carry their alternatives and no `correct`
/// field; boolean questions the other way around. `image` is the
/// resolved URL, not the stored file name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub id: i32,
    pub text: String,
    pub exam_id: i32,
    pub multiple: bool,

    #[serde(rename = "type")]
    pub question_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<NestedAlternative>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Alternative nested in a question, without the back-reference to the
/// question it belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NestedAlternative {
    pub id: i32,
    pub text: String,
    pub correct: bool,
}
