//! Random selector handler implementations
//!
//! Draws are not idempotent, so these handlers never touch the cache.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{error::AppResult, services::RandomService, state::AppState};

use super::{request::RandomQuery, response::RandomResponse};

/// Draw a random visible question index for a course
pub async fn random_course_question(
    State(state): State<AppState>,
    Path(course): Path<String>,
    Query(query): Query<RandomQuery>,
) -> AppResult<Json<RandomResponse>> {
    let index = RandomService::draw(state.db(), &course, None, query.exclude()).await?;
    Ok(Json(RandomResponse { index }))
}

/// Draw a random question index for an exam; a hidden exam is an empty
/// scope
pub async fn random_exam_question(
    State(state): State<AppState>,
    Path((course, exam)): Path<(String, String)>,
    Query(query): Query<RandomQuery>,
) -> AppResult<Json<RandomResponse>> {
    let index = RandomService::draw(state.db(), &course, Some(&exam), query.exclude()).await?;
    Ok(Json(RandomResponse { index }))
}
