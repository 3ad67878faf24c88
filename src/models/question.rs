//! Question model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::constants::question_types;

/// Question database model
///
/// `question_type` is an immutable tagged kind: "boolean" questions carry
/// a single `correct` value, "multiple" questions own an ordered set of
/// alternatives instead (and `correct` stays NULL).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i32,
    pub question_type: String,
    pub text: String,
    pub image: Option<String>,
    pub reason: Option<String>,
    pub exam_id: i32,
    pub correct: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Question {
    /// Whether this is a multiple-choice question
    pub fn multiple(&self) -> bool {
        self.question_type == question_types::MULTIPLE
    }

    /// Resolve the image reference to a servable URL
    ///
    /// Absolute URLs are kept verbatim; bare filenames resolve under the
    /// course's static image directory.
    pub fn image_url(&self, course_code: &str) -> Option<String> {
        let image = self.image.as_deref().filter(|i| !i.is_empty())?;
        if image.starts_with("http://") || image.starts_with("https://") {
            Some(image.to_string())
        } else {
            Some(format!("/static/img/{}/{}", course_code, image))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(question_type: &str, image: Option<&str>) -> Question {
        Question {
            id: 1,
            question_type: question_type.to_string(),
            text: "Is water wet?".to_string(),
            image: image.map(String::from),
            reason: None,
            exam_id: 1,
            correct: Some(true),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_multiple() {
        assert!(question(question_types::MULTIPLE, None).multiple());
        assert!(!question(question_types::BOOLEAN, None).multiple());
    }

    #[test]
    fn test_image_url() {
        assert_eq!(question(question_types::BOOLEAN, None).image_url("MA101"), None);
        assert_eq!(question(question_types::BOOLEAN, Some("")).image_url("MA101"), None);
        assert_eq!(
            question(question_types::BOOLEAN, Some("fig1.png")).image_url("MA101"),
            Some("/static/img/MA101/fig1.png".to_string())
        );
        assert_eq!(
            question(question_types::BOOLEAN, Some("http://example.com/fig.png")).image_url("MA101"),
            Some("http://example.com/fig.png".to_string())
        );
    }
}
