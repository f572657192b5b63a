use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use timetable_core::errors::TimetableError;
use timetable_core::models::response::{DataResponse, ListResponse, MessageResponse};
use timetable_core::models::subject::{CreateSubjectRequest, Subject, UpdateSubjectRequest};
use timetable_db::repositories;

use crate::middleware::{auth, error_handling::AppError};
use crate::ApiState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSubjectsQuery {
    pub department: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[axum::debug_handler]
pub async fn list_subjects(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(query): Query<ListSubjectsQuery>,
) -> Result<Json<ListResponse<Subject>>, AppError> {
    auth::authenticate(&state.db_pool, &headers).await?;

    let (rows, total) = repositories::subject::list_subjects(
        &state.db_pool,
        query.department.as_deref(),
        query.page.unwrap_or(1),
        query.limit.unwrap_or(10),
    )
    .await
    .map_err(TimetableError::Database)?;

    let subjects = rows.into_iter().map(Subject::from).collect();
    Ok(Json(ListResponse::new(total, subjects)))
}

#[axum::debug_handler]
pub async fn get_subject(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<DataResponse<Subject>>, AppError> {
    auth::authenticate(&state.db_pool, &headers).await?;

    let subject = repositories::subject::get_subject_by_id(&state.db_pool, id)
        .await
        .map_err(TimetableError::Database)?
        .ok_or_else(|| TimetableError::NotFound("Subject not found".to_string()))?;

    Ok(Json(DataResponse::new(Subject::from(subject))))
}

#[axum::debug_handler]
pub async fn create_subject(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<DataResponse<Subject>>), AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&user)?;

    let subject = repositories::subject::create_subject(
        &state.db_pool,
        &payload.subject_name,
        &payload.subject_code,
        payload.credits,
        &payload.department,
    )
    .await
    .map_err(TimetableError::Database)?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(Subject::from(subject))),
    ))
}

#[axum::debug_handler]
pub async fn update_subject(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSubjectRequest>,
) -> Result<Json<DataResponse<Subject>>, AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&user)?;

    let subject = repositories::subject::update_subject(
        &state.db_pool,
        id,
        payload.subject_name.as_deref(),
        payload.subject_code.as_deref(),
        payload.credits,
        payload.department.as_deref(),
    )
    .await
    .map_err(TimetableError::Database)?
    .ok_or_else(|| TimetableError::NotFound("Subject not found".to_string()))?;

    Ok(Json(DataResponse::new(Subject::from(subject))))
}

#[axum::debug_handler]
pub async fn delete_subject(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&user)?;

    let deleted = repositories::subject::delete_subject(&state.db_pool, id)
        .await
        .map_err(TimetableError::Database)?;
    if !deleted {
        return Err(AppError(TimetableError::NotFound(
            "Subject not found".to_string(),
        )));
    }

    Ok(Json(MessageResponse::new("Subject deleted successfully")))
}
