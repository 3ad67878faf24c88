//! HTTP middleware

pub mod logging;
pub mod requester;

pub use logging::logging_middleware;
pub use requester::{Requester, requester_middleware};
