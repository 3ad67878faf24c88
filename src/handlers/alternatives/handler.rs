//! Alternative handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::{
    db::{filters::Filters, repositories::alternative_repo},
    error::AppResult,
    handlers::WriteResponse,
    middleware::Requester,
    services::{CacheService, ContentService},
    state::AppState,
};

use super::{
    request::{CreateAlternativeRequest, UpdateAlternativeRequest},
    response::AlternativeResponse,
};

/// List alternatives, filtered by whitelisted query parameters
pub async fn list_alternatives(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<AlternativeResponse>>> {
    let key = CacheService::cache_key("alternatives.list", &params);
    let mut redis = state.redis();
    if let Some(cached) = CacheService::fetch::<Vec<AlternativeResponse>>(&mut redis, &key).await {
        return Ok(Json(cached));
    }

    let filters = Filters::from_pairs(&params, alternative_repo::FILTERABLE);
    let alternatives = ContentService::list_alternatives(state.db(), &filters).await?;

    CacheService::store(
        &mut redis,
        &key,
        &alternatives,
        state.config().cache.ttl_seconds,
    )
    .await;
    Ok(Json(alternatives))
}

/// Create an alternative under a multiple-choice question
pub async fn create_alternative(
    State(state): State<AppState>,
    requester: Requester,
    Json(payload): Json<CreateAlternativeRequest>,
) -> AppResult<Json<WriteResponse>> {
    if !requester.registered {
        return Ok(Json(WriteResponse::message("Not logged in")));
    }
    if let Err(errors) = payload.validate() {
        return Ok(Json(WriteResponse::from_error(errors.into())?));
    }

    let response = match ContentService::create_alternative(state.db(), &requester, payload).await {
        Ok(_) => {
            CacheService::flush(&mut state.redis()).await;
            WriteResponse::ok()
        }
        Err(err) => WriteResponse::from_error(err)?,
    };
    Ok(Json(response))
}

/// Get a single alternative
pub async fn get_alternative(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<AlternativeResponse>> {
    let params = vec![("id".to_string(), id.to_string())];
    let key = CacheService::cache_key("alternatives.get", &params);
    let mut redis = state.redis();
    if let Some(cached) = CacheService::fetch::<AlternativeResponse>(&mut redis, &key).await {
        return Ok(Json(cached));
    }

    let alternative = ContentService::get_alternative(state.db(), id).await?;

    CacheService::store(
        &mut redis,
        &key,
        &alternative,
        state.config().cache.ttl_seconds,
    )
    .await;
    Ok(Json(alternative))
}

/// Update an alternative
pub async fn update_alternative(
    State(state): State<AppState>,
    requester: Requester,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateAlternativeRequest>,
) -> AppResult<Json<WriteResponse>> {
    if !requester.registered {
        return Ok(Json(WriteResponse::message("Not logged in")));
    }
    if let Err(errors) = payload.validate() {
        return Ok(Json(WriteResponse::from_error(errors.into())?));
    }

    let response =
        match ContentService::update_alternative(state.db(), &requester, id, payload).await {
            Ok(_) => {
                CacheService::flush(&mut state.redis()).await;
                WriteResponse::ok()
            }
            Err(err) => WriteResponse::from_error(err)?,
        };
    Ok(Json(response))
}

/// Delete an alternative
pub async fn delete_alternative(
    State(state): State<AppState>,
    requester: Requester,
    Path(id): Path<i32>,
) -> AppResult<Json<WriteResponse>> {
    if !requester.admin {
        return Ok(Json(WriteResponse::message("Admin access required")));
    }

    let response = match ContentService::delete_alternative(state.db(), &requester, id).await {
        Ok(true) => {
            CacheService::flush(&mut state.redis()).await;
            WriteResponse::ok()
        }
        Ok(false) => WriteResponse::message("Item not found"),
        Err(err) => WriteResponse::from_error(err)?,
    };
    Ok(Json(response))
}
