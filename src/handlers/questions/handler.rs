//! Question handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::{
    db::{filters::Filters, repositories::question_repo},
    error::AppResult,
    handlers::WriteResponse,
    middleware::Requester,
    services::{CacheService, ContentService},
    state::AppState,
};

use super::{
    request::{CreateQuestionRequest, UpdateQuestionRequest},
    response::QuestionResponse,
};

/// List questions, filtered by whitelisted query parameters
///
/// Questions under hidden exams are omitted for non-admin requesters, so
/// question reads are cached under visibility-scoped keys.
pub async fn list_questions(
    State(state): State<AppState>,
    requester: Requester,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<QuestionResponse>>> {
    let key = CacheService::visibility_key("questions.list", &params, &requester);
    let mut redis = state.redis();
    if let Some(cached) = CacheService::fetch::<Vec<QuestionResponse>>(&mut redis, &key).await {
        return Ok(Json(cached));
    }

    let filters = Filters::from_pairs(&params, question_repo::FILTERABLE);
    let questions = ContentService::list_questions(state.db(), &filters, &requester).await?;

    CacheService::store(&mut redis, &key, &questions, state.config().cache.ttl_seconds).await;
    Ok(Json(questions))
}

/// Create a question
pub async fn create_question(
    State(state): State<AppState>,
    requester: Requester,
    Json(payload): Json<CreateQuestionRequest>,
) -> AppResult<Json<WriteResponse>> {
    if !requester.registered {
        return Ok(Json(WriteResponse::message("Not logged in")));
    }
    if let Err(errors) = payload.validate() {
        return Ok(Json(WriteResponse::from_error(errors.into())?));
    }

    let response = match ContentService::create_question(state.db(), &requester, payload).await {
        Ok(_) => {
            CacheService::flush(&mut state.redis()).await;
            WriteResponse::ok()
        }
        Err(err) => WriteResponse::from_error(err)?,
    };
    Ok(Json(response))
}

/// Get a single question; NotFound under a hidden exam for non-admins
pub async fn get_question(
    State(state): State<AppState>,
    requester: Requester,
    Path(id): Path<i32>,
) -> AppResult<Json<QuestionResponse>> {
    let params = vec![("id".to_string(), id.to_string())];
    let key = CacheService::visibility_key("questions.get", &params, &requester);
    let mut redis = state.redis();
    if let Some(cached) = CacheService::fetch::<QuestionResponse>(&mut redis, &key).await {
        return Ok(Json(cached));
    }

    let question = ContentService::get_question(state.db(), id, &requester).await?;

    CacheService::store(&mut redis, &key, &question, state.config().cache.ttl_seconds).await;
    Ok(Json(question))
}

/// Update a question
pub async fn update_question(
    State(state): State<AppState>,
    requester: Requester,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateQuestionRequest>,
) -> AppResult<Json<WriteResponse>> {
    if !requester.registered {
        return Ok(Json(WriteResponse::message("Not logged in")));
    }
    if let Err(errors) = payload.validate() {
        return Ok(Json(WriteResponse::from_error(errors.into())?));
    }

    let response = match ContentService::update_question(state.db(), &requester, id, payload).await
    {
        Ok(_) => {
            CacheService::flush(&mut state.redis()).await;
            WriteResponse::ok()
        }
        Err(err) => WriteResponse::from_error(err)?,
    };
    Ok(Json(response))
}

/// Delete a question and its alternatives
pub async fn delete_question(
    State(state): State<AppState>,
    requester: Requester,
    Path(id): Path<i32>,
) -> AppResult<Json<WriteResponse>> {
    if !requester.admin {
        return Ok(Json(WriteResponse::message("Admin access required")));
    }

    let response = match ContentService::delete_question(state.db(), &requester, id).await {
        Ok(true) => {
            CacheService::flush(&mut state.redis()).await;
            WriteResponse::ok()
        }
        Ok(false) => WriteResponse::message("Item not found"),
        Err(err) => WriteResponse::from_error(err)?,
    };
    Ok(Json(response))
}

/// All visible questions of a course, addressed by course code
pub async fn course_questions(
    State(state): State<AppState>,
    requester: Requester,
    Path(course): Path<String>,
) -> AppResult<Json<Vec<QuestionResponse>>> {
    let params = vec![("course".to_string(), course.clone())];
    let key = CacheService::visibility_key("questions.course", &params, &requester);
    let mut redis = state.redis();
    if let Some(cached) = CacheService::fetch::<Vec<QuestionResponse>>(&mut redis, &key).await {
        return Ok(Json(cached));
    }

    let questions = ContentService::course_questions(state.db(), &course, &requester).await?;

    CacheService::store(&mut redis, &key, &questions, state.config().cache.ttl_seconds).await;
    Ok(Json(questions))
}

/// All questions of an exam, addressed by course code and exam name
pub async fn exam_questions(
    State(state): State<AppState>,
    requester: Requester,
    Path((course, exam)): Path<(String, String)>,
) -> AppResult<Json<Vec<QuestionResponse>>> {
    let params = vec![
        ("course".to_string(), course.clone()),
        ("exam".to_string(), exam.clone()),
    ];
    let key = CacheService::visibility_key("questions.exam", &params, &requester);
    let mut redis = state.redis();
    if let Some(cached) = CacheService::fetch::<Vec<QuestionResponse>>(&mut redis, &key).await {
        return Ok(Json(cached));
    }

    let questions =
        ContentService::exam_questions(state.db(), &course, &exam, &requester).await?;

    CacheService::store(&mut redis, &key, &questions, state.config().cache.ttl_seconds).await;
    Ok(Json(questions))
}
