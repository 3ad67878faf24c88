//! Progress record model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One answer outcome for a (user, question) pair
///
/// Append-only: a new row is never written while an active (reset=false)
/// row exists for the same pair. Resetting flips `reset` to true instead
/// of deleting, so history survives for aggregation.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: i32,
    pub user_id: i32,
    pub question_id: i32,
    pub correct: bool,
    pub reset: bool,
    pub created_at: DateTime<Utc>,
}
