use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use timetable_core::errors::TimetableError;
use timetable_core::models::response::{DataResponse, ListResponse, MessageResponse};
use timetable_core::models::user::{Role, UpdateUserRequest, User};
use timetable_db::models::DbUser;
use timetable_db::repositories;

use crate::middleware::{auth, error_handling::AppError};
use crate::ApiState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    pub role: Option<Role>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[axum::debug_handler]
pub async fn list_users(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(query): Query<ListUsersQuery>,
) -> Result<Json<ListResponse<User>>, AppError> {
    let caller = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&caller)?;

    let (rows, total) = repositories::user::list_users(
        &state.db_pool,
        query.role,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(10),
    )
    .await
    .map_err(TimetableError::Database)?;

    let users = rows
        .into_iter()
        .map(DbUser::into_user)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(ListResponse::new(total, users)))
}

#[axum::debug_handler]
pub async fn get_user(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<DataResponse<User>>, AppError> {
    let caller = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&caller)?;

    let user = repositories::user::get_user_by_id(&state.db_pool, id)
        .await
        .map_err(TimetableError::Database)?
        .ok_or_else(|| TimetableError::NotFound("User not found".to_string()))?;

    Ok(Json(DataResponse::new(user.into_user()?)))
}

#[axum::debug_handler]
pub async fn update_user(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<DataResponse<User>>, AppError> {
    let caller = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&caller)?;

    let user = repositories::user::update_user(
        &state.db_pool,
        id,
        payload.name.as_deref(),
        payload.email.as_deref(),
        payload.role,
        payload.department.as_deref(),
    )
    .await
    .map_err(TimetableError::Database)?
    .ok_or_else(|| TimetableError::NotFound("User not found".to_string()))?;

    Ok(Json(DataResponse::new(user.into_user()?)))
}

#[axum::debug_handler]
pub async fn delete_user(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let caller = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&caller)?;

    let deleted = repositories::user::delete_user(&state.db_pool, id)
        .await
        .map_err(TimetableError::Database)?;
    if !deleted {
        return Err(AppError(TimetableError::NotFound(
            "User not found".to_string(),
        )));
    }

    Ok(Json(MessageResponse::new("User deleted successfully")))
}
