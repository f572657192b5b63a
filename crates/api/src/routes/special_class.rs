use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/special-classes",
            get(handlers::special_class::list_special_classes),
        )
        .route(
            "/api/special-classes",
            post(handlers::special_class::create_special_class),
        )
        .route(
            "/api/special-classes/:id",
            get(handlers::special_class::get_special_class),
        )
        .route(
            "/api/special-classes/:id",
            put(handlers::special_class::update_special_class),
        )
        .route(
            "/api/special-classes/:id",
            delete(handlers::special_class::delete_special_class),
        )
}
