//! Alternative management handlers

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

/// Alternative routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_alternatives))
        .route("/", post(handler::create_alternative))
        .route("/{id}", get(handler::get_alternative))
        .route("/{id}", put(handler::update_alternative))
        .route("/{id}", delete(handler::delete_alternative))
}
