//! Alternative model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Alternative database model
///
/// One selectable option under a multiple-choice question.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Alternative {
    pub id: i32,
    pub text: String,
    pub correct: bool,
    pub question_id: i32,
    pub created_at: DateTime<Utc>,
}
