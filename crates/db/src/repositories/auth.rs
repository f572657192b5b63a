use chrono::{Duration, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::{DbAuthToken, DbUser};

/// Session lifetime for issued bearer tokens.
const TOKEN_TTL_DAYS: i64 = 30;

pub async fn create_token(pool: &Pool<Postgres>, user_id: Uuid) -> Result<DbAuthToken> {
    let token = Uuid::new_v4();
    let now = Utc::now();
    let expires_at = now + Duration::days(TOKEN_TTL_DAYS);

    let auth_token = sqlx::query_as::<_, DbAuthToken>(
        r#"
        INSERT INTO auth_tokens (token, user_id, expires_at, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING token, user_id, expires_at, created_at
        "#,
    )
    .bind(token)
    .bind(user_id)
    .bind(expires_at)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(auth_token)
}

/// Resolves a bearer token to its user; expired tokens resolve to `None`.
pub async fn find_user_by_token(pool: &Pool<Postgres>, token: Uuid) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT u.id, u.name, u.email, u.password_hash, u.role, u.department, u.created_at
        FROM auth_tokens t
        JOIN users u ON u.id = t.user_id
        WHERE t.token = $1 AND t.expires_at > NOW()
        "#,
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn delete_token(pool: &Pool<Postgres>, token: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM auth_tokens WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
