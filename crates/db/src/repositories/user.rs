use argon2::{Argon2, PasswordVerifier};
use chrono::Utc;
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use timetable_core::models::user::Role;

use crate::models::DbUser;

pub async fn create_user(
    pool: &Pool<Postgres>,
    name: &str,
    email: &str,
    password_hash: &str,
    role: Role,
    department: Option<&str>,
) -> Result<DbUser> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating user: id={}, email={}, role={}", id, email, role);

    let user = sqlx::query_as::<_, DbUser>(
        r#"
        INSERT INTO users (id, name, email, password_hash, role, department, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, name, email, password_hash, role, department, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(role.as_str())
    .bind(department)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

pub async fn get_user_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, password_hash, role, department, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_user_by_email(pool: &Pool<Postgres>, email: &str) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, password_hash, role, department, created_at
        FROM users
        WHERE email = $1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn list_users(
    pool: &Pool<Postgres>,
    role: Option<Role>,
    page: u32,
    limit: u32,
) -> Result<(Vec<DbUser>, usize)> {
    let role = role.map(Role::as_str);

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM users
        WHERE ($1::text IS NULL OR role = $1)
        "#,
    )
    .bind(role)
    .fetch_one(pool)
    .await?;

    let users = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, password_hash, role, department, created_at
        FROM users
        WHERE ($1::text IS NULL OR role = $1)
        ORDER BY name ASC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(role)
    .bind(limit as i64)
    .bind(page.saturating_sub(1) as i64 * limit as i64)
    .fetch_all(pool)
    .await?;

    Ok((users, total as usize))
}

pub async fn users_by_ids(pool: &Pool<Postgres>, ids: &[Uuid]) -> Result<Vec<DbUser>> {
    let users = sqlx::query_as::<_, DbUser>(
        r#"
        SELECT id, name, email, password_hash, role, department, created_at
        FROM users
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(users)
}

pub async fn update_user(
    pool: &Pool<Postgres>,
    id: Uuid,
    name: Option<&str>,
    email: Option<&str>,
    role: Option<Role>,
    department: Option<&str>,
) -> Result<Option<DbUser>> {
    let user = sqlx::query_as::<_, DbUser>(
        r#"
        UPDATE users
        SET name = COALESCE($2::text, name),
            email = COALESCE($3::text, email),
            role = COALESCE($4::text, role),
            department = COALESCE($5::text, department)
        WHERE id = $1
        RETURNING id, name, email, password_hash, role, department, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(role.map(Role::as_str))
    .bind(department)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn delete_user(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Constant-time verification of a password against a stored PHC hash.
pub fn verify_password(password_hash: &str, password: &str) -> Result<bool> {
    let parsed_hash = argon2::PasswordHash::new(password_hash)
        .map_err(|e| eyre!("Invalid password hash: {}", e))?;
    let is_valid = Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok();
    Ok(is_valid)
}
