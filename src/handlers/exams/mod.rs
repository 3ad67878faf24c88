//! Exam management handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Exam routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_exams))
        .route("/", post(handler::create_exam))
        .route("/{id}", get(handler::get_exam))
        .route("/{id}", put(handler::update_exam))
        .route("/{id}", delete(handler::delete_exam))
        // Positional lookup into the exam's questions
        .route(
            "/{id}/questions/{index}",
            get(handler::positional_question),
        )
}
