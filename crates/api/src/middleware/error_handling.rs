//! # Error Handling Middleware
//!
//! This module provides a standardized way to handle errors in the API.
//! It maps domain-specific errors to appropriate HTTP status codes and
//! JSON error responses, ensuring a consistent error handling experience
//! across the entire API.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use timetable_core::errors::TimetableError;

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps domain-specific `TimetableError` instances and
/// implements `IntoResponse` to convert them into HTTP responses with
/// appropriate status codes and JSON payloads:
///
/// - `NotFound` → 404
/// - `Validation` → 400
/// - `Authentication` → 401
/// - `Authorization` → 403
/// - `Database` / `Internal` → 500
#[derive(Debug)]
pub struct AppError(pub TimetableError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            TimetableError::NotFound(_) => StatusCode::NOT_FOUND,
            TimetableError::Validation(_) => StatusCode::BAD_REQUEST,
            TimetableError::Authentication(_) => StatusCode::UNAUTHORIZED,
            TimetableError::Authorization(_) => StatusCode::FORBIDDEN,
            TimetableError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TimetableError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // The frontend reads `success` and `message` from every error body
        let message = self.0.to_string();
        let body = Json(json!({ "success": false, "message": message }));

        (status, body).into_response()
    }
}

/// Automatic conversion from TimetableError to AppError.
///
/// Allows using the `?` operator with functions that return
/// `Result<T, TimetableError>` in handlers returning `Result<T, AppError>`.
impl From<TimetableError> for AppError {
    fn from(err: TimetableError) -> Self {
        AppError(err)
    }
}

/// Automatic conversion from eyre::Report to AppError.
///
/// Repository failures propagate as `eyre::Report`; wrapping them in the
/// `Database` variant maps them to a 500 response.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(TimetableError::Database(err))
    }
}

/// Maps a TimetableError directly to an HTTP response.
pub fn map_error(err: TimetableError) -> Response {
    AppError(err).into_response()
}
