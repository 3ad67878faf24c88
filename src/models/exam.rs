//! Exam model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Exam database model
///
/// A named set of questions under a course. Hidden exams (and every
/// question under them) are invisible to non-admin requesters in all
/// read paths; `multiple_correct` switches answer grading between
/// subset-sufficient and exact-match semantics.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Exam {
    pub id: i32,
    pub name: String,
    pub course_id: i32,
    pub multiple_correct: bool,
    pub hidden: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Exam {
    /// Whether this exam is visible to the given requester capability
    pub fn visible_to(&self, admin: bool) -> bool {
        !self.hidden || admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exam(hidden: bool) -> Exam {
        Exam {
            id: 1,
            name: "final".to_string(),
            course_id: 1,
            multiple_correct: false,
            hidden,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_visibility() {
        assert!(exam(false).visible_to(false));
        assert!(exam(false).visible_to(true));
        assert!(!exam(true).visible_to(false));
        assert!(exam(true).visible_to(true));
    }
}
