//! Progress statistics handlers

mod handler;
pub mod response;

pub use handler::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Stats routes
///
/// The literal `reset` segment takes priority over the `{exam}`
/// parameter.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/{course}", get(handler::course_stats))
        .route("/{course}/reset", post(handler::reset_course))
        .route("/{course}/{exam}", get(handler::exam_stats))
        .route("/{course}/{exam}/reset", post(handler::reset_exam))
}
