use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use timetable_core::errors::TimetableError;
use timetable_core::models::class::{Class, CreateClassRequest, UpdateClassRequest};
use timetable_core::models::response::{DataResponse, ListResponse, MessageResponse};
use timetable_db::repositories;

use crate::middleware::{auth, error_handling::AppError};
use crate::ApiState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListClassesQuery {
    pub department: Option<String>,
    pub semester: Option<i32>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[axum::debug_handler]
pub async fn list_classes(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(query): Query<ListClassesQuery>,
) -> Result<Json<ListResponse<Class>>, AppError> {
    auth::authenticate(&state.db_pool, &headers).await?;

    let (rows, total) = repositories::class::list_classes(
        &state.db_pool,
        query.department.as_deref(),
        query.semester,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(10),
    )
    .await
    .map_err(TimetableError::Database)?;

    let classes = rows.into_iter().map(Class::from).collect();
    Ok(Json(ListResponse::new(total, classes)))
}

#[axum::debug_handler]
pub async fn get_class(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<DataResponse<Class>>, AppError> {
    auth::authenticate(&state.db_pool, &headers).await?;

    let class = repositories::class::get_class_by_id(&state.db_pool, id)
        .await
        .map_err(TimetableError::Database)?
        .ok_or_else(|| TimetableError::NotFound("Class not found".to_string()))?;

    Ok(Json(DataResponse::new(Class::from(class))))
}

#[axum::debug_handler]
pub async fn create_class(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateClassRequest>,
) -> Result<(StatusCode, Json<DataResponse<Class>>), AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&user)?;

    let class = repositories::class::create_class(
        &state.db_pool,
        &payload.class_name,
        &payload.course_code,
        &payload.department,
        payload.semester,
    )
    .await
    .map_err(TimetableError::Database)?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(Class::from(class))),
    ))
}

#[axum::debug_handler]
pub async fn update_class(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateClassRequest>,
) -> Result<Json<DataResponse<Class>>, AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&user)?;

    let class = repositories::class::update_class(
        &state.db_pool,
        id,
        payload.class_name.as_deref(),
        payload.course_code.as_deref(),
        payload.department.as_deref(),
        payload.semester,
    )
    .await
    .map_err(TimetableError::Database)?
    .ok_or_else(|| TimetableError::NotFound("Class not found".to_string()))?;

    Ok(Json(DataResponse::new(Class::from(class))))
}

#[axum::debug_handler]
pub async fn delete_class(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&user)?;

    let deleted = repositories::class::delete_class(&state.db_pool, id)
        .await
        .map_err(TimetableError::Database)?;
    if !deleted {
        return Err(AppError(TimetableError::NotFound(
            "Class not found".to_string(),
        )));
    }

    Ok(Json(MessageResponse::new("Class deleted successfully")))
}
