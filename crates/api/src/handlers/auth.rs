use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use timetable_core::errors::TimetableError;
use timetable_core::models::auth::{AuthResponse, LoginRequest, RegisterRequest};
use timetable_core::models::response::{DataResponse, MessageResponse};
use timetable_core::models::user::User;
use timetable_db::is_unique_violation;
use timetable_db::repositories;

use crate::middleware::{auth, error_handling::AppError};
use crate::ApiState;

#[axum::debug_handler]
pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let password_hash = auth::hash_password(&payload.password)?;

    let db_user = repositories::user::create_user(
        &state.db_pool,
        &payload.name,
        &payload.email,
        &password_hash,
        payload.role,
        payload.department.as_deref(),
    )
    .await
    .map_err(|err| {
        if is_unique_violation(&err) {
            TimetableError::Validation("Email already registered".to_string())
        } else {
            TimetableError::Database(err)
        }
    })?;

    let token = repositories::auth::create_token(&state.db_pool, db_user.id)
        .await
        .map_err(TimetableError::Database)?;
    let user = db_user.into_user()?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            success: true,
            token: token.token,
            user,
        }),
    ))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let db_user = repositories::user::find_user_by_email(&state.db_pool, &payload.email)
        .await
        .map_err(TimetableError::Database)?
        .ok_or_else(|| TimetableError::Authentication("Invalid credentials".to_string()))?;

    let is_valid = repositories::user::verify_password(&db_user.password_hash, &payload.password)?;
    if !is_valid {
        return Err(AppError(TimetableError::Authentication(
            "Invalid credentials".to_string(),
        )));
    }

    let token = repositories::auth::create_token(&state.db_pool, db_user.id)
        .await
        .map_err(TimetableError::Database)?;
    let user = db_user.into_user()?;

    Ok(Json(AuthResponse {
        success: true,
        token: token.token,
        user,
    }))
}

#[axum::debug_handler]
pub async fn me(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Result<Json<DataResponse<User>>, AppError> {
    let user = auth::authenticate(&state.db_pool, &headers).await?;
    Ok(Json(DataResponse::new(user)))
}

#[axum::debug_handler]
pub async fn logout(
    State(state): State<Arc<ApiState>>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, AppError> {
    let token = auth::bearer_token(&headers)?;

    repositories::auth::delete_token(&state.db_pool, token)
        .await
        .map_err(TimetableError::Database)?;

    Ok(Json(MessageResponse::new("Logged out successfully")))
}
