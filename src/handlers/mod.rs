//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod alternatives;
pub mod answer;
pub mod courses;
pub mod exams;
pub mod health;
pub mod questions;
pub mod random;
pub mod stats;

use axum::Router;
use serde::Serialize;
use serde_json::json;

use crate::{
    error::{AppError, AppResult},
    state::AppState,
};

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/courses", courses::routes())
        .nest("/exams", exams::routes())
        .nest("/questions", questions::routes())
        .nest("/alternatives", alternatives::routes())
        .nest("/stats", stats::routes())
        .nest("/answer", answer::routes())
        .nest("/random", random::routes())
}

/// Body of every content write endpoint
///
/// Recoverable failures (not logged in, validation, missing item) report
/// through this shape with a 200 status; only infrastructure failures
/// surface as HTTP errors.
#[derive(Debug, Serialize)]
pub struct WriteResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

impl WriteResponse {
    /// Successful write
    pub fn ok() -> Self {
        Self {
            success: true,
            errors: None,
        }
    }

    /// Failed write with a single message
    pub fn message(message: &str) -> Self {
        Self {
            success: false,
            errors: Some(json!([message])),
        }
    }

    /// Translate a recoverable error into a response body; anything
    /// infrastructural stays an error and becomes an HTTP status
    pub fn from_error(err: AppError) -> AppResult<Self> {
        match err {
            AppError::Validation(_) => Ok(Self {
                success: false,
                errors: err.validation_details(),
            }),
            AppError::Unauthorized | AppError::AdminRequired => Ok(Self::message(&err.to_string())),
            AppError::NotFound(_) => Ok(Self::message("Item not found")),
            AppError::AlreadyExists(_) => Ok(Self::message("Item already exists")),
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_response_messages() {
        let body = WriteResponse::from_error(AppError::Unauthorized).unwrap();
        assert!(!body.success);
        assert_eq!(body.errors, Some(json!(["Not logged in"])));

        let body = WriteResponse::from_error(AppError::AdminRequired).unwrap();
        assert_eq!(body.errors, Some(json!(["Admin access required"])));

        let body = WriteResponse::from_error(AppError::NotFound("Course not found".into())).unwrap();
        assert_eq!(body.errors, Some(json!(["Item not found"])));
    }

    #[test]
    fn test_validation_errors_become_field_map() {
        let mut errors = validator::ValidationErrors::new();
        let mut error = validator::ValidationError::new("length");
        error.message = Some("too long".into());
        errors.add("code".into(), error);

        let body = WriteResponse::from_error(errors.into()).unwrap();
        assert!(!body.success);
        assert_eq!(body.errors, Some(json!({"code": ["too long"]})));
    }

    #[test]
    fn test_infrastructure_errors_stay_errors() {
        assert!(WriteResponse::from_error(AppError::Database("down".into())).is_err());
    }
}
