use argon2::PasswordVerifier;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, HeaderValue};
use uuid::Uuid;

use timetable_api::middleware::auth;
use timetable_core::errors::TimetableError;
use timetable_core::models::user::Role;

use crate::test_utils::user_with_role;

#[tokio::test]
async fn test_error_handling_not_found() {
    let error = TimetableError::NotFound("Timetable not found".to_string());

    let response = timetable_api::middleware::error_handling::map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_validation() {
    let error = TimetableError::Validation("Invalid input".to_string());

    let response = timetable_api::middleware::error_handling::map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_authentication() {
    let error = TimetableError::Authentication("Invalid token".to_string());

    let response = timetable_api::middleware::error_handling::map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_error_handling_authorization() {
    let error = TimetableError::Authorization("Access denied. Admin only.".to_string());

    let response = timetable_api::middleware::error_handling::map_error(error);

    assert_eq!(response.status(), axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_error_handling_database() {
    let error = TimetableError::Database(eyre::eyre!("Database error"));

    let response = timetable_api::middleware::error_handling::map_error(error);

    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_error_handling_internal() {
    let error = TimetableError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    let response = timetable_api::middleware::error_handling::map_error(error);

    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_hash_password() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    // The hash is salted PHC format, never the raw password
    assert_ne!(hashed, password);
    assert!(hashed.starts_with("$argon2"));
}

#[tokio::test]
async fn test_hashed_password_verifies() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    let argon2 = argon2::Argon2::default();
    let parsed_hash = argon2::PasswordHash::new(&hashed).unwrap();

    assert!(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok());
    assert!(argon2
        .verify_password("wrong_password".as_bytes(), &parsed_hash)
        .is_err());
}

#[tokio::test]
async fn test_require_admin_allows_admin() {
    let admin = user_with_role(Role::Admin);

    assert!(auth::require_admin(&admin).is_ok());
}

#[tokio::test]
async fn test_require_admin_rejects_other_roles() {
    for role in [Role::Faculty, Role::Student] {
        let user = user_with_role(role);

        match auth::require_admin(&user).unwrap_err() {
            TimetableError::Authorization(message) => {
                assert_eq!(message, "Access denied. Admin only.");
            }
            other => panic!("Expected Authorization error, got: {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_bearer_token_extraction() {
    let token = Uuid::new_v4();
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    );

    assert_eq!(auth::bearer_token(&headers).unwrap(), token);
}

#[tokio::test]
async fn test_bearer_token_missing_header() {
    let headers = HeaderMap::new();

    let result = auth::bearer_token(&headers);

    assert!(matches!(result, Err(TimetableError::Authentication(_))));
}

#[tokio::test]
async fn test_bearer_token_malformed_scheme() {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Token {}", Uuid::new_v4())).unwrap(),
    );

    let result = auth::bearer_token(&headers);

    assert!(matches!(result, Err(TimetableError::Authentication(_))));
}

#[tokio::test]
async fn test_bearer_token_invalid_uuid() {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer not-a-uuid"));

    let result = auth::bearer_token(&headers);

    assert!(matches!(result, Err(TimetableError::Authentication(_))));
}
