use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbSubject;

pub async fn create_subject(
    pool: &Pool<Postgres>,
    subject_name: &str,
    subject_code: &str,
    credits: i32,
    department: &str,
) -> Result<DbSubject> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let subject = sqlx::query_as::<_, DbSubject>(
        r#"
        INSERT INTO subjects (id, subject_name, subject_code, credits, department, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, subject_name, subject_code, credits, department, created_at
        "#,
    )
    .bind(id)
    .bind(subject_name)
    .bind(subject_code)
    .bind(credits)
    .bind(department)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(subject)
}

pub async fn get_subject_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSubject>> {
    let subject = sqlx::query_as::<_, DbSubject>(
        r#"
        SELECT id, subject_name, subject_code, credits, department, created_at
        FROM subjects
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(subject)
}

pub async fn list_subjects(
    pool: &Pool<Postgres>,
    department: Option<&str>,
    page: u32,
    limit: u32,
) -> Result<(Vec<DbSubject>, usize)> {
    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM subjects
        WHERE ($1::text IS NULL OR department = $1)
        "#,
    )
    .bind(department)
    .fetch_one(pool)
    .await?;

    let subjects = sqlx::query_as::<_, DbSubject>(
        r#"
        SELECT id, subject_name, subject_code, credits, department, created_at
        FROM subjects
        WHERE ($1::text IS NULL OR department = $1)
        ORDER BY subject_name ASC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(department)
    .bind(limit as i64)
    .bind(page.saturating_sub(1) as i64 * limit as i64)
    .fetch_all(pool)
    .await?;

    Ok((subjects, total as usize))
}

pub async fn subjects_by_ids(pool: &Pool<Postgres>, ids: &[Uuid]) -> Result<Vec<DbSubject>> {
    let subjects = sqlx::query_as::<_, DbSubject>(
        r#"
        SELECT id, subject_name, subject_code, credits, department, created_at
        FROM subjects
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(subjects)
}

pub async fn update_subject(
    pool: &Pool<Postgres>,
    id: Uuid,
    subject_name: Option<&str>,
    subject_code: Option<&str>,
    credits: Option<i32>,
    department: Option<&str>,
) -> Result<Option<DbSubject>> {
    let subject = sqlx::query_as::<_, DbSubject>(
        r#"
        UPDATE subjects
        SET subject_name = COALESCE($2::text, subject_name),
            subject_code = COALESCE($3::text, subject_code),
            credits = COALESCE($4::int, credits),
            department = COALESCE($5::text, department)
        WHERE id = $1
        RETURNING id, subject_name, subject_code, credits, department, created_at
        "#,
    )
    .bind(id)
    .bind(subject_name)
    .bind(subject_code)
    .bind(credits)
    .bind(department)
    .fetch_optional(pool)
    .await?;

    Ok(subject)
}

pub async fn delete_subject(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
