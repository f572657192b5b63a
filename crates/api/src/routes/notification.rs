use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/notifications",
            get(handlers::notification::list_notifications),
        )
        .route(
            "/api/notifications",
            post(handlers::notification::create_notification),
        )
        .route(
            "/api/notifications/:id/read",
            put(handlers::notification::mark_notification_read),
        )
        .route(
            "/api/notifications/:id",
            delete(handlers::notification::delete_notification),
        )
}
