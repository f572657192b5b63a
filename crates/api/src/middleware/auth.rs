//! # Authentication Module
//!
//! Password hashing plus bearer-token authentication for request handlers.
//!
//! Passwords are hashed with Argon2. Sessions are opaque uuid tokens
//! persisted in the `auth_tokens` table; handlers call [`authenticate`]
//! with the request headers to resolve the token into the calling user,
//! then apply role checks such as [`require_admin`].

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use eyre::Result;
use uuid::Uuid;

use timetable_core::errors::{TimetableError, TimetableResult};
use timetable_core::models::user::{Role, User};

/// Hashes a password using the Argon2 algorithm.
///
/// Generates a fresh random salt per password and returns the hash in PHC
/// string format (algorithm, version, parameters, salt, and hash).
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    // Create default Argon2 instance
    let argon2 = Argon2::default();

    // Hash the password with salt
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Extracts the bearer token from the `Authorization` header.
pub fn bearer_token(headers: &HeaderMap) -> TimetableResult<Uuid> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| {
            TimetableError::Authentication("Missing authorization header".to_string())
        })?;

    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        TimetableError::Authentication("Malformed authorization header".to_string())
    })?;

    Uuid::parse_str(token.trim())
        .map_err(|_| TimetableError::Authentication("Invalid token".to_string()))
}

/// Resolves the request's bearer token to the calling user.
///
/// Fails with an `Authentication` error when the header is missing or the
/// token is unknown or expired.
pub async fn authenticate(pool: &sqlx::PgPool, headers: &HeaderMap) -> TimetableResult<User> {
    let token = bearer_token(headers)?;

    let db_user = timetable_db::repositories::auth::find_user_by_token(pool, token)
        .await
        .map_err(TimetableError::Database)?
        .ok_or_else(|| {
            TimetableError::Authentication("Invalid or expired token".to_string())
        })?;

    db_user.into_user()
}

/// Gate for admin-only operations; non-admins receive a 403.
pub fn require_admin(user: &User) -> TimetableResult<()> {
    if user.role != Role::Admin {
        return Err(TimetableError::Authorization(
            "Access denied. Admin only.".to_string(),
        ));
    }
    Ok(())
}
