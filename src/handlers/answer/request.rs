//! Answer request DTOs

use serde::Deserialize;

/// Answer submission
///
/// `question` and `alternative` ids may arrive as numbers or numeric
/// strings; the service parses them, reporting a missing parameter for
/// anything else. `correct` is the boolean answer; when omitted for a
/// boolean question it counts as answering false.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question: Option<serde_json::Value>,

    /// Selected alternative ids for multiple-choice questions
    pub alternative: Option<Vec<serde_json::Value>>,

    /// Submitted value for boolean questions
    pub correct: Option<bool>,
}
