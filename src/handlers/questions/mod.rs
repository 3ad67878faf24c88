//! Question management handlers

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

/// Question routes
///
/// The literal `all` segment takes priority over the `{exam}` parameter,
/// so `/TDT4160/all` lists the whole course.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_questions))
        .route("/", post(handler::create_question))
        .route("/{id}", get(handler::get_question))
        .route("/{id}", put(handler::update_question))
        .route("/{id}", delete(handler::delete_question))
        .route("/{course}/all", get(handler::course_questions))
        .route("/{course}/{exam}", get(handler::exam_questions))
}
