use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/subjects", get(handlers::subject::list_subjects))
        .route("/api/subjects", post(handlers::subject::create_subject))
        .route("/api/subjects/:id", get(handlers::subject::get_subject))
        .route("/api/subjects/:id", put(handlers::subject::update_subject))
        .route("/api/subjects/:id", delete(handlers::subject::delete_subject))
}
