//! Course handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::{
    db::{filters::Filters, repositories::course_repo},
    error::AppResult,
    handlers::{WriteResponse, questions::response::QuestionResponse},
    middleware::Requester,
    services::{CacheService, ContentService},
    state::AppState,
};

use super::{
    request::{CreateCourseRequest, UpdateCourseRequest},
    response::CourseResponse,
};

/// List courses, filtered by whitelisted query parameters
pub async fn list_courses(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<CourseResponse>>> {
    let key = CacheService::cache_key("courses.list", &params);
    let mut redis = state.redis();
    if let Some(cached) = CacheService::fetch::<Vec<CourseResponse>>(&mut redis, &key).await {
        return Ok(Json(cached));
    }

    let filters = Filters::from_pairs(&params, course_repo::FILTERABLE);
    let courses = ContentService::list_courses(state.db(), &filters).await?;

    CacheService::store(&mut redis, &key, &courses, state.config().cache.ttl_seconds).await;
    Ok(Json(courses))
}

/// Create a course
pub async fn create_course(
    State(state): State<AppState>,
    requester: Requester,
    Json(payload): Json<CreateCourseRequest>,
) -> AppResult<Json<WriteResponse>> {
    if !requester.registered {
        return Ok(Json(WriteResponse::message("Not logged in")));
    }
    if let Err(errors) = payload.validate() {
        return Ok(Json(WriteResponse::from_error(errors.into())?));
    }

    let response = match ContentService::create_course(state.db(), &requester, payload).await {
        Ok(_) => {
            CacheService::flush(&mut state.redis()).await;
            WriteResponse::ok()
        }
        Err(err) => WriteResponse::from_error(err)?,
    };
    Ok(Json(response))
}

/// Get a single course
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<CourseResponse>> {
    let params = vec![("id".to_string(), id.to_string())];
    let key = CacheService::cache_key("courses.get", &params);
    let mut redis = state.redis();
    if let Some(cached) = CacheService::fetch::<CourseResponse>(&mut redis, &key).await {
        return Ok(Json(cached));
    }

    let course = ContentService::get_course(state.db(), id).await?;

    CacheService::store(&mut redis, &key, &course, state.config().cache.ttl_seconds).await;
    Ok(Json(course))
}

/// Update a course
pub async fn update_course(
    State(state): State<AppState>,
    requester: Requester,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCourseRequest>,
) -> AppResult<Json<WriteResponse>> {
    if !requester.registered {
        return Ok(Json(WriteResponse::message("Not logged in")));
    }
    if let Err(errors) = payload.validate() {
        return Ok(Json(WriteResponse::from_error(errors.into())?));
    }

    let response = match ContentService::update_course(state.db(), &requester, id, payload).await {
        Ok(_) => {
            CacheService::flush(&mut state.redis()).await;
            WriteResponse::ok()
        }
        Err(err) => WriteResponse::from_error(err)?,
    };
    Ok(Json(response))
}

/// Delete a course and everything under it
pub async fn delete_course(
    State(state): State<AppState>,
    requester: Requester,
    Path(id): Path<i32>,
) -> AppResult<Json<WriteResponse>> {
    if !requester.admin {
        return Ok(Json(WriteResponse::message("Admin access required")));
    }

    let response = match ContentService::delete_course(state.db(), &requester, id).await {
        Ok(true) => {
            CacheService::flush(&mut state.redis()).await;
            WriteResponse::ok()
        }
        Ok(false) => WriteResponse::message("Item not found"),
        Err(err) => WriteResponse::from_error(err)?,
    };
    Ok(Json(response))
}

/// The index-th (1-based) question among the course's non-hidden exams
pub async fn positional_question(
    State(state): State<AppState>,
    requester: Requester,
    Path((code, index)): Path<(String, i64)>,
) -> AppResult<Json<QuestionResponse>> {
    let params = vec![
        ("course".to_string(), code.clone()),
        ("index".to_string(), index.to_string()),
    ];
    let key = CacheService::cache_key("courses.question", &params);
    let mut redis = state.redis();
    if let Some(cached) = CacheService::fetch::<QuestionResponse>(&mut redis, &key).await {
        return Ok(Json(cached));
    }

    let question =
        ContentService::positional_course_question(state.db(), &code, index, &requester).await?;

    CacheService::store(&mut redis, &key, &question, state.config().cache.ttl_seconds).await;
    Ok(Json(question))
}
