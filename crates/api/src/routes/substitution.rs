use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/substitutions",
            get(handlers::substitution::list_substitutions),
        )
        .route(
            "/api/substitutions",
            post(handlers::substitution::create_substitution),
        )
        .route(
            "/api/substitutions/:id",
            get(handlers::substitution::get_substitution),
        )
        .route(
            "/api/substitutions/:id",
            put(handlers::substitution::update_substitution_status),
        )
        .route(
            "/api/substitutions/:id",
            delete(handlers::substitution::delete_substitution),
        )
}
