use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbClass;

pub async fn create_class(
    pool: &Pool<Postgres>,
    class_name: &str,
    course_code: &str,
    department: &str,
    semester: i32,
) -> Result<DbClass> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let class = sqlx::query_as::<_, DbClass>(
        r#"
        INSERT INTO classes (id, class_name, course_code, department, semester, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, class_name, course_code, department, semester, created_at
        "#,
    )
    .bind(id)
    .bind(class_name)
    .bind(course_code)
    .bind(department)
    .bind(semester)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(class)
}

pub async fn get_class_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbClass>> {
    let class = sqlx::query_as::<_, DbClass>(
        r#"
        SELECT id, class_name, course_code, department, semester, created_at
        FROM classes
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(class)
}

pub async fn list_classes(
    pool: &Pool<Postgres>,
    department: Option<&str>,
    semester: Option<i32>,
    page: u32,
    limit: u32,
) -> Result<(Vec<DbClass>, usize)> {
    let total: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*) FROM classes
        WHERE ($1::text IS NULL OR department = $1)
          AND ($2::int IS NULL OR semester = $2)
        "#,
    )
    .bind(department)
    .bind(semester)
    .fetch_one(pool)
    .await?;

    let classes = sqlx::query_as::<_, DbClass>(
        r#"
        SELECT id, class_name, course_code, department, semester, created_at
        FROM classes
        WHERE ($1::text IS NULL OR department = $1)
          AND ($2::int IS NULL OR semester = $2)
        ORDER BY class_name ASC
        LIMIT $3 OFFSET $4
        "#,
    )
    .bind(department)
    .bind(semester)
    .bind(limit as i64)
    .bind(page.saturating_sub(1) as i64 * limit as i64)
    .fetch_all(pool)
    .await?;

    Ok((classes, total as usize))
}

pub async fn classes_by_ids(pool: &Pool<Postgres>, ids: &[Uuid]) -> Result<Vec<DbClass>> {
    let classes = sqlx::query_as::<_, DbClass>(
        r#"
        SELECT id, class_name, course_code, department, semester, created_at
        FROM classes
        WHERE id = ANY($1)
        "#,
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(classes)
}

pub async fn update_class(
    pool: &Pool<Postgres>,
    id: Uuid,
    class_name: Option<&str>,
    course_code: Option<&str>,
    department: Option<&str>,
    semester: Option<i32>,
) -> Result<Option<DbClass>> {
    let class = sqlx::query_as::<_, DbClass>(
        r#"
        UPDATE classes
        SET class_name = COALESCE($2::text, class_name),
            course_code = COALESCE($3::text, course_code),
            department = COALESCE($4::text, department),
            semester = COALESCE($5::int, semester)
        WHERE id = $1
        RETURNING id, class_name, course_code, department, semester, created_at
        "#,
    )
    .bind(id)
    .bind(class_name)
    .bind(course_code)
    .bind(department)
    .bind(semester)
    .fetch_optional(pool)
    .await?;

    Ok(class)
}

pub async fn delete_class(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM classes WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
