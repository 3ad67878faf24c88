//! Alternative response DTOs

use serde::{Deserialize, Serialize};

/// Serialized alternative, as returned by the standalone endpoints
///
/// When nested under a question the back-reference is dropped; see
/// `NestedAlternative` in the question responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlternativeResponse {
    pub id: i32,
    pub text: String,
    pub correct: bool,
    pub question_id: i32,
}
