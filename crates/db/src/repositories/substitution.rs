use chrono::{NaiveDate, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use timetable_core::models::substitution::SubstitutionStatus;

use crate::models::DbSubstitution;

#[allow(clippy::too_many_arguments)]
pub async fn create_substitution(
    pool: &Pool<Postgres>,
    timetable_id: Uuid,
    slot_id: Uuid,
    date: NaiveDate,
    original_faculty_id: Uuid,
    substitute_faculty_id: Uuid,
    reason: &str,
) -> Result<DbSubstitution> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let substitution = sqlx::query_as::<_, DbSubstitution>(
        r#"
        INSERT INTO substitutions
            (id, timetable_id, slot_id, date, original_faculty_id, substitute_faculty_id, reason, status, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, 'pending', $8)
        RETURNING id, timetable_id, slot_id, date, original_faculty_id, substitute_faculty_id, reason, status, created_at
        "#,
    )
    .bind(id)
    .bind(timetable_id)
    .bind(slot_id)
    .bind(date)
    .bind(original_faculty_id)
    .bind(substitute_faculty_id)
    .bind(reason)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(substitution)
}

pub async fn get_substitution_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbSubstitution>> {
    let substitution = sqlx::query_as::<_, DbSubstitution>(
        r#"
        SELECT id, timetable_id, slot_id, date, original_faculty_id, substitute_faculty_id, reason, status, created_at
        FROM substitutions
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(substitution)
}

pub async fn list_substitutions(
    pool: &Pool<Postgres>,
    status: Option<SubstitutionStatus>,
    faculty_id: Option<Uuid>,
    page: u32,
    limit: u32,
) -> Result<(Vec<DbSubstitution>, usize)> {
    let status = status.map(SubstitutionStatus::as_str);

    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM substitutions
        WHERE ($1::text IS NULL OR status = $1)
          AND ($2::uuid IS NULL OR original_faculty_id = $2 OR substitute_faculty_id = $2)
        "#,
    )
    .bind(status)
    .bind(faculty_id)
    .fetch_one(pool)
    .await?;

    let substitutions = sqlx::query_as::<_, DbSubstitution>(
        r#"
        SELECT id, timetable_id, slot_id, date, original_faculty_id, substitute_faculty_id, reason, status, created_at
        FROM substitutions
        WHERE ($1::text IS NULL OR status = $1)
          AND ($2::uuid IS NULL OR original_faculty_id = $2 OR substitute_faculty_id = $2)
        ORDER BY date ASC, created_at ASC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(status)
    .bind(faculty_id)
    .bind(limit as i64)
    .bind(page.saturating_sub(1) as i64 * limit as i64)
    .fetch_all(pool)
    .await?;

    Ok((substitutions, total as usize))
}

pub async fn update_substitution_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: SubstitutionStatus,
) -> Result<Option<DbSubstitution>> {
    let substitution = sqlx::query_as::<_, DbSubstitution>(
        r#"
        UPDATE substitutions
        SET status = $2
        WHERE id = $1
        RETURNING id, timetable_id, slot_id, date, original_faculty_id, substitute_faculty_id, reason, status, created_at
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await?;

    Ok(substitution)
}

pub async fn delete_substitution(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM substitutions WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
