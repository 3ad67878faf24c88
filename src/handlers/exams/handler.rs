//! Exam handler implementations

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::{
    db::{filters::Filters, repositories::exam_repo},
    error::AppResult,
    handlers::{WriteResponse, questions::response::QuestionResponse},
    middleware::Requester,
    services::{CacheService, ContentService},
    state::AppState,
};

use super::{
    request::{CreateExamRequest, UpdateExamRequest},
    response::ExamResponse,
};

/// List exams, filtered by whitelisted query parameters
///
/// Hidden exams are omitted for non-admin requesters, so exam reads are
/// cached under visibility-scoped keys.
pub async fn list_exams(
    State(state): State<AppState>,
    requester: Requester,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<ExamResponse>>> {
    let key = CacheService::visibility_key("exams.list", &params, &requester);
    let mut redis = state.redis();
    if let Some(cached) = CacheService::fetch::<Vec<ExamResponse>>(&mut redis, &key).await {
        return Ok(Json(cached));
    }

    let filters = Filters::from_pairs(&params, exam_repo::FILTERABLE);
    let exams = ContentService::list_exams(state.db(), &filters, &requester).await?;

    CacheService::store(&mut redis, &key, &exams, state.config().cache.ttl_seconds).await;
    Ok(Json(exams))
}

/// Create an exam
pub async fn create_exam(
    State(state): State<AppState>,
    requester: Requester,
    Json(payload): Json<CreateExamRequest>,
) -> AppResult<Json<WriteResponse>> {
    if !requester.registered {
        return Ok(Json(WriteResponse::message("Not logged in")));
    }
    if let Err(errors) = payload.validate() {
        return Ok(Json(WriteResponse::from_error(errors.into())?));
    }

    let response = match ContentService::create_exam(state.db(), &requester, payload).await {
        Ok(_) => {
            CacheService::flush(&mut state.redis()).await;
            WriteResponse::ok()
        }
        Err(err) => WriteResponse::from_error(err)?,
    };
    Ok(Json(response))
}

/// Get a single exam; hidden exams are NotFound for non-admins
pub async fn get_exam(
    State(state): State<AppState>,
    requester: Requester,
    Path(id): Path<i32>,
) -> AppResult<Json<ExamResponse>> {
    let params = vec![("id".to_string(), id.to_string())];
    let key = CacheService::visibility_key("exams.get", &params, &requester);
    let mut redis = state.redis();
    if let Some(cached) = CacheService::fetch::<ExamResponse>(&mut redis, &key).await {
        return Ok(Json(cached));
    }

    let exam = ContentService::get_exam(state.db(), id, &requester).await?;

    CacheService::store(&mut redis, &key, &exam, state.config().cache.ttl_seconds).await;
    Ok(Json(exam))
}

/// Update an exam
pub async fn update_exam(
    State(state): State<AppState>,
    requester: Requester,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateExamRequest>,
) -> AppResult<Json<WriteResponse>> {
    if !requester.registered {
        return Ok(Json(WriteResponse::message("Not logged in")));
    }
    if let Err(errors) = payload.validate() {
        return Ok(Json(WriteResponse::from_error(errors.into())?));
    }

    let response = match ContentService::update_exam(state.db(), &requester, id, payload).await {
        Ok(_) => {
            CacheService::flush(&mut state.redis()).await;
            WriteResponse::ok()
        }
        Err(err) => WriteResponse::from_error(err)?,
    };
    Ok(Json(response))
}

/// Delete an exam and its questions
pub async fn delete_exam(
    State(state): State<AppState>,
    requester: Requester,
    Path(id): Path<i32>,
) -> AppResult<Json<WriteResponse>> {
    if !requester.admin {
        return Ok(Json(WriteResponse::message("Admin access required")));
    }

    let response = match ContentService::delete_exam(state.db(), &requester, id).await {
        Ok(true) => {
            CacheService::flush(&mut state.redis()).await;
            WriteResponse::ok()
        }
        Ok(false) => WriteResponse::message("Item not found"),
        Err(err) => WriteResponse::from_error(err)?,
    };
    Ok(Json(response))
}

/// The index-th (1-based) question of an exam; NotFound when hidden
pub async fn positional_question(
    State(state): State<AppState>,
    requester: Requester,
    Path((id, index)): Path<(i32, i64)>,
) -> AppResult<Json<QuestionResponse>> {
    let params = vec![
        ("exam".to_string(), id.to_string()),
        ("index".to_string(), index.to_string()),
    ];
    let key = CacheService::cache_key("exams.question", &params);
    let mut redis = state.redis();
    if let Some(cached) = CacheService::fetch::<QuestionResponse>(&mut redis, &key).await {
        return Ok(Json(cached));
    }

    let question =
        ContentService::positional_exam_question(state.db(), id, index, &requester).await?;

    CacheService::store(&mut redis, &key, &question, state.config().cache.ttl_seconds).await;
    Ok(Json(question))
}
