//! Course management handlers

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

/// Course routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_courses))
        .route("/", post(handler::create_course))
        .route("/{id}", get(handler::get_course))
        .route("/{id}", put(handler::update_course))
        .route("/{id}", delete(handler::delete_course))
        // Positional lookup into the course's visible questions
        .route(
            "/{code}/questions/{index}",
            get(handler::positional_question),
        )
}
