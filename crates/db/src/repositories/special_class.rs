use chrono::{NaiveDate, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbSpecialClass;

#[allow(clippy::too_many_arguments)]
pub async fn create_special_class(
    pool: &Pool<Postgres>,
    class_id: Uuid,
    subject_id: Uuid,
    faculty_id: Uuid,
    date: NaiveDate,
    start_time: &str,
    end_time: &str,
    room: &str,
    description: Option<&str>,
) -> Result<DbSpecialClass> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let special_class = sqlx::query_as::<_, DbSpecialClass>(
        r#"
        INSERT INTO special_classes
            (id, class_id, subject_id, faculty_id, date, start_time, end_time, room, description, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id, class_id, subject_id, faculty_id, date, start_time, end_time, room, description, created_at
        "#,
    )
    .bind(id)
    .bind(class_id)
    .bind(subject_id)
    .bind(faculty_id)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .bind(room)
    .bind(description)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(special_class)
}

pub async fn get_special_class_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbSpecialClass>> {
    let special_class = sqlx::query_as::<_, DbSpecialClass>(
        r#"
        SELECT id, class_id, subject_id, faculty_id, date, start_time, end_time, room, description, created_at
        FROM special_classes
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(special_class)
}

pub async fn list_special_classes(
    pool: &Pool<Postgres>,
    class_id: Option<Uuid>,
    page: u32,
    limit: u32,
) -> Result<(Vec<DbSpecialClass>, usize)> {
    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM special_classes
        WHERE ($1::uuid IS NULL OR class_id = $1)
        "#,
    )
    .bind(class_id)
    .fetch_one(pool)
    .await?;

    let special_classes = sqlx::query_as::<_, DbSpecialClass>(
        r#"
        SELECT id, class_id, subject_id, faculty_id, date, start_time, end_time, room, description, created_at
        FROM special_classes
        WHERE ($1::uuid IS NULL OR class_id = $1)
        ORDER BY date ASC, start_time ASC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(class_id)
    .bind(limit as i64)
    .bind(page.saturating_sub(1) as i64 * limit as i64)
    .fetch_all(pool)
    .await?;

    Ok((special_classes, total as usize))
}

pub async fn update_special_class(
    pool: &Pool<Postgres>,
    id: Uuid,
    date: Option<NaiveDate>,
    start_time: Option<&str>,
    end_time: Option<&str>,
    room: Option<&str>,
    description: Option<&str>,
) -> Result<Option<DbSpecialClass>> {
    let special_class = sqlx::query_as::<_, DbSpecialClass>(
        r#"
        UPDATE special_classes
        SET date = COALESCE($2::date, date),
            start_time = COALESCE($3::text, start_time),
            end_time = COALESCE($4::text, end_time),
            room = COALESCE($5::text, room),
            description = COALESCE($6::text, description)
        WHERE id = $1
        RETURNING id, class_id, subject_id, faculty_id, date, start_time, end_time, room, description, created_at
        "#,
    )
    .bind(id)
    .bind(date)
    .bind(start_time)
    .bind(end_time)
    .bind(room)
    .bind(description)
    .fetch_optional(pool)
    .await?;

    Ok(special_class)
}

pub async fn delete_special_class(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM special_classes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
