//! Progress statistics response DTOs

use serde::{Deserialize, Serialize};

/// Aggregated progress over a course or exam
///
/// `total` counts every question in scope, hidden exams included;
/// `percentage` and `grade` score the answered portion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub answered: i64,
    pub correct: i64,
    pub incorrect: i64,
    pub total: i64,
    pub percentage: f64,
    pub grade: String,
}

/// Result of a progress reset
#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub success: bool,
    /// How many records were marked as reset
    pub reset: u64,
}
