//! Progress statistics handler implementations

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    error::AppResult,
    middleware::Requester,
    services::{CacheService, StatsService},
    state::AppState,
};

use super::response::{ResetResponse, StatsResponse};

/// Aggregate the requester's progress over a whole course
///
/// Stats are per user, so aggregates are cached under user-scoped keys.
pub async fn course_stats(
    State(state): State<AppState>,
    requester: Requester,
    Path(course): Path<String>,
) -> AppResult<Json<StatsResponse>> {
    let params = vec![("course".to_string(), course.clone())];
    let key = CacheService::user_key("stats.course", &params, requester.id);
    let mut redis = state.redis();
    if let Some(cached) = CacheService::fetch::<StatsResponse>(&mut redis, &key).await {
        return Ok(Json(cached));
    }

    let stats = StatsService::aggregate(state.db(), &requester, &course, None).await?;

    CacheService::store(&mut redis, &key, &stats, state.config().cache.ttl_seconds).await;
    Ok(Json(stats))
}

/// Aggregate the requester's progress over a single exam
pub async fn exam_stats(
    State(state): State<AppState>,
    requester: Requester,
    Path((course, exam)): Path<(String, String)>,
) -> AppResult<Json<StatsResponse>> {
    let params = vec![
        ("course".to_string(), course.clone()),
        ("exam".to_string(), exam.clone()),
    ];
    let key = CacheService::user_key("stats.exam", &params, requester.id);
    let mut redis = state.redis();
    if let Some(cached) = CacheService::fetch::<StatsResponse>(&mut redis, &key).await {
        return Ok(Json(cached));
    }

    let stats = StatsService::aggregate(state.db(), &requester, &course, Some(&exam)).await?;

    CacheService::store(&mut redis, &key, &stats, state.config().cache.ttl_seconds).await;
    Ok(Json(stats))
}

/// Reset the requester's progress over a whole course
pub async fn reset_course(
    State(state): State<AppState>,
    requester: Requester,
    Path(course): Path<String>,
) -> AppResult<Json<ResetResponse>> {
    let reset = StatsService::reset(state.db(), &requester, &course, None).await?;
    CacheService::flush(&mut state.redis()).await;

    Ok(Json(ResetResponse {
        success: true,
        reset,
    }))
}

/// Reset the requester's progress over a single exam
pub async fn reset_exam(
    State(state): State<AppState>,
    requester: Requester,
    Path((course, exam)): Path<(String, String)>,
) -> AppResult<Json<ResetResponse>> {
    let reset = StatsService::reset(state.db(), &requester, &course, Some(&exam)).await?;
    CacheService::flush(&mut state.redis()).await;

    Ok(Json(ResetResponse {
        success: true,
        reset,
    }))
}
