//! Random selector response DTOs

use serde::Serialize;

/// A drawn 1-based question index, to be resolved through the
/// positional lookup endpoints
#[derive(Debug, Serialize)]
pub struct RandomResponse {
    pub index: i64,
}
