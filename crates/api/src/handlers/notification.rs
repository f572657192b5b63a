use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use timetable_core::errors::TimetableError;
use timetable_core::models::notification::{CreateNotificationRequest, Notification};
use timetable_core::models::response::{DataResponse, ListResponse, MessageResponse};
use timetable_db::repositories;

use crate::middleware::{auth, error_handling::AppError};
use crate::ApiState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationsQuery {
    pub unread: Option<bool>,
}

/// Lists the calling user's own notifications, newest first.
#[axum::debug_handler]
pub async fn list_notifications(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Query(query): Query<ListNotificationsQuery>,
) -> Result<Json<ListResponse<Notification>>, AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;

    let rows = repositories::notification::list_notifications_for_user(
        &state.db_pool,
        user.id,
        query.unread.unwrap_or(false),
    )
    .await
    .map_err(TimetableError::Database)?;

    let notifications: Vec<Notification> = rows.into_iter().map(Notification::from).collect();
    let total = notifications.len();
    Ok(Json(ListResponse::new(total, notifications)))
}

#[axum::debug_handler]
pub async fn create_notification(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Json(payload): Json<CreateNotificationRequest>,
) -> Result<(StatusCode, Json<DataResponse<Notification>>), AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;
    auth::require_admin(&user)?;

    let notification = repositories::notification::create_notification(
        &state.db_pool,
        payload.user_id,
        &payload.title,
        &payload.message,
    )
    .await
    .map_err(TimetableError::Database)?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::new(Notification::from(notification))),
    ))
}

/// Marks one of the calling user's notifications as read.
#[axum::debug_handler]
pub async fn mark_notification_read(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<DataResponse<Notification>>, AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;

    let notification =
        repositories::notification::mark_notification_read(&state.db_pool, id, user.id)
            .await
            .map_err(TimetableError::Database)?
            .ok_or_else(|| TimetableError::NotFound("Notification not found".to_string()))?;

    Ok(Json(DataResponse::new(Notification::from(notification))))
}

#[axum::debug_handler]
pub async fn delete_notification(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;

    let deleted = repositories::notification::delete_notification(&state.db_pool, id, user.id)
        .await
        .map_err(TimetableError::Database)?;
    if !deleted {
        return Err(AppError(TimetableError::NotFound(
            "Notification not found".to_string(),
        )));
    }

    Ok(Json(MessageResponse::new(
        "Notification deleted successfully",
    )))
}
