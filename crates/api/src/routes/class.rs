use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/classes", get(handlers::class::list_classes))
        .route("/api/classes", post(handlers::class::create_class))
        .route("/api/classes/:id", get(handlers::class::get_class))
        .route("/api/classes/:id", put(handlers::class::update_class))
        .route("/api/classes/:id", delete(handlers::class::delete_class))
}
