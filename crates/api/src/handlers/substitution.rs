use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use timetable_core::errors::TimetableError;
use timetable_core::models::response::{DataResponse, ListResponse, MessageResponse};
use timetable_core::models::substitution::{
    CreateSubstitutionRequest, Substitution, SubstitutionStatus, UpdateSubstitutionStatusRequest,
};
use timetable_core::models::user::Role;
use timetable_db::models::DbSubstitution;
use timetable_db::repositories;

use crate::middleware::{auth, error_handling::AppError};
use crate::ApiState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSubstitutionsQuery {
    pub status: Option<SubstitutionStatus>,
    pub faculty_id: Option<Uuid>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[axum::debug_handler]
pub async fn list_substitutions(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(query): Query<ListSubstitutionsQuery>,
) -> Result<Json<ListResponse<Substitution>>, AppError> {
    auth::authenticate(&state.db_pool, &headers).await?;

    let (rows, total) = repositories::substitution::list_substitutions(
        &state.db_pool,
        query.status,
        query.faculty_id,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(10),
    )
    .await
    .map_err(TimetableError::Database)?;

    let substitutions = rows
        .into_iter()
        .map(DbSubstitution::into_substitution)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(ListResponse::new(total, substitutions)))
}

#[axum::debug_handler]
pub async fn get_substitution(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<DataResponse<Substitution>>, AppError> {
    auth::authenticate(&state.db_pool, &headers).await?;

    let substitution = repositories::substitution::get_substitution_by_id(&state.db_pool, id)
        .await
        .map_err(TimetableError::Database)?
        .ok_or_else(|| TimetableError::NotFound("Substitution not found".to_string()))?;

    Ok(Json(DataResponse::new(substitution.into_substitution()?)))
}

#[axum::debug_handler]
pub async fn create_substitution(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateSubstitutionRequest>,
) -> Result<(StatusCode, Json<DataResponse<Substitution>>), AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;
    // Students cannot request substitutions
    if user.role == Role::Student {
        return Err(AppError(TimetableError::Authorization(
            "Access denied.".to_string(),
        )));
    }

    let substitution = repositories::substitution::create_substitution(
        &state.db_pool,
        payload.timetable_id,
        payload.slot_id,
        payload.date,
        payload.original_faculty_id,
        payload.substitute_faculty_id,
        &payload.reason,
    )
    .await
    .map_err(TimetableError::Database)?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(substitution.into_substitution()?)),
    ))
}

#[axum::debug_handler]
pub async fn update_substitution_status(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSubstitutionStatusRequest>,
) -> Result<Json<DataResponse<Substitution>>, AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&user)?;

    let substitution =
        repositories::substitution::update_substitution_status(&state.db_pool, id, payload.status)
            .await
            .map_err(TimetableError::Database)?
            .ok_or_else(|| TimetableError::NotFound("Substitution not found".to_string()))?;

    Ok(Json(DataResponse::new(substitution.into_substitution()?)))
}

#[axum::debug_handler]
pub async fn delete_substitution(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&user)?;

    let deleted = repositories::substitution::delete_substitution(&state.db_pool, id)
        .await
        .map_err(TimetableError::Database)?;
    if !deleted {
        return Err(AppError(TimetableError::NotFound(
            "Substitution not found".to_string(),
        )));
    }

    Ok(Json(MessageResponse::new(
        "Substitution deleted successfully",
    )))
}
