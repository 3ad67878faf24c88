//! Course response DTOs

use serde::{Deserialize, Serialize};

/// Serialized course
///
/// `str` is the human-readable "code name" label the web clients show in
/// course pickers. Deserialize is needed to read entries back from the
/// response cache.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseResponse {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub str: String,
    pub question_count: i64,
}
