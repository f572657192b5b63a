use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::models::DbNotification;

pub async fn create_notification(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    title: &str,
    message: &str,
) -> Result<DbNotification> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let notification = sqlx::query_as::<_, DbNotification>(
        r#"
        INSERT INTO notifications (id, user_id, title, message, is_read, created_at)
        VALUES ($1, $2, $3, $4, FALSE, $5)
        RETURNING id, user_id, title, message, is_read, created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(title)
    .bind(message)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(notification)
}

pub async fn list_notifications_for_user(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    unread_only: bool,
) -> Result<Vec<DbNotification>> {
    let notifications = sqlx::query_as::<_, DbNotification>(
        r#"
        SELECT id, user_id, title, message, is_read, created_at
        FROM notifications
        WHERE user_id = $1 AND ($2 = FALSE OR is_read = FALSE)
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .bind(unread_only)
    .fetch_all(pool)
    .await?;

    Ok(notifications)
}

pub async fn mark_notification_read(
    pool: &Pool<Postgres>,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<DbNotification>> {
    let notification = sqlx::query_as::<_, DbNotification>(
        r#"
        UPDATE notifications
        SET is_read = TRUE
        WHERE id = $1 AND user_id = $2
        RETURNING id, user_id, title, message, is_read, created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(notification)
}

pub async fn delete_notification(pool: &Pool<Postgres>, id: Uuid, user_id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
