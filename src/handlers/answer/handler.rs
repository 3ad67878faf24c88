//! Answer handler implementations

use axum::{Json, extract::State};

use crate::{
    error::AppResult,
    middleware::Requester,
    services::{AnswerService, CacheService},
    state::AppState,
};

use super::{request::AnswerRequest, response::AnswerResponse};

/// Grade a submission and record the outcome
pub async fn submit_answer(
    State(state): State<AppState>,
    requester: Requester,
    Json(payload): Json<AnswerRequest>,
) -> AppResult<Json<AnswerResponse>> {
    let outcome = AnswerService::submit(state.db(), &requester, &payload).await?;

    // Aggregates are memoized; a newly written record invalidates them
    if outcome.recorded {
        CacheService::flush(&mut state.redis()).await;
    }

    Ok(Json(AnswerResponse {
        recorded: outcome.recorded,
        correct: outcome.correct,
    }))
}
