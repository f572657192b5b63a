use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use timetable_core::errors::TimetableError;
use timetable_core::models::response::{DataResponse, ListResponse, MessageResponse};
use timetable_core::models::special_class::{
    CreateSpecialClassRequest, SpecialClass, UpdateSpecialClassRequest,
};
use timetable_db::repositories;

use crate::middleware::{auth, error_handling::AppError};
use crate::ApiState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSpecialClassesQuery {
    pub class_id: Option<Uuid>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[axum::debug_handler]
pub async fn list_special_classes(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(query): Query<ListSpecialClassesQuery>,
) -> Result<Json<ListResponse<SpecialClass>>, AppError> {
    auth::authenticate(&state.db_pool, &headers).await?;

    let (rows, total) = repositories::special_class::list_special_classes(
        &state.db_pool,
        query.class_id,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(10),
    )
    .await
    .map_err(TimetableError::Database)?;

    let special_classes = rows.into_iter().map(SpecialClass::from).collect();
    Ok(Json(ListResponse::new(total, special_classes)))
}

#[axum::debug_handler]
pub async fn get_special_class(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<DataResponse<SpecialClass>>, AppError> {
    auth::authenticate(&state.db_pool, &headers).await?;

    let special_class = repositories::special_class::get_special_class_by_id(&state.db_pool, id)
        .await
        .map_err(TimetableError::Database)?
        .ok_or_else(|| TimetableError::NotFound("Special class not found".to_string()))?;

    Ok(Json(DataResponse::new(SpecialClass::from(special_class))))
}

#[axum::debug_handler]
pub async fn create_special_class(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateSpecialClassRequest>,
) -> Result<(StatusCode, Json<DataResponse<SpecialClass>>), AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&user)?;
    payload.validate()?;

    let special_class = repositories::special_class::create_special_class(
        &state.db_pool,
        payload.class_id,
        payload.subject_id,
        payload.faculty_id,
        payload.date,
        &payload.start_time,
        &payload.end_time,
        &payload.room,
        payload.description.as_deref(),
    )
    .await
    .map_err(TimetableError::Database)?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(SpecialClass::from(special_class))),
    ))
}

#[axum::debug_handler]
pub async fn update_special_class(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSpecialClassRequest>,
) -> Result<Json<DataResponse<SpecialClass>>, AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&user)?;

    let special_class = repositories::special_class::update_special_class(
        &state.db_pool,
        id,
        payload.date,
        payload.start_time.as_deref(),
        payload.end_time.as_deref(),
        payload.room.as_deref(),
        payload.description.as_deref(),
    )
    .await
    .map_err(TimetableError::Database)?
    .ok_or_else(|| TimetableError::NotFound("Special class not found".to_string()))?;

    Ok(Json(DataResponse::new(SpecialClass::from(special_class))))
}

#[axum::debug_handler]
pub async fn delete_special_class(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&user)?;

    let deleted = repositories::special_class::delete_special_class(&state.db_pool, id)
        .await
        .map_err(TimetableError::Database)?;
    if !deleted {
        return Err(AppError(TimetableError::NotFound(
            "Special class not found".to_string(),
        )));
    }

    Ok(Json(MessageResponse::new(
        "Special class deleted successfully",
    )))
}
