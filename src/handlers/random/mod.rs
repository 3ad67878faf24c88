//! Random question selection handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Random selector routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{course}", get(handler::random_course_question))
        .route("/{course}/{exam}", get(handler::random_exam_question))
}
