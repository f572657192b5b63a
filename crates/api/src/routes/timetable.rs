use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/timetables", get(handlers::timetable::list_timetables))
        .route("/api/timetables", post(handlers::timetable::create_timetable))
        .route("/api/timetables/:id", get(handlers::timetable::get_timetable))
        .route("/api/timetables/:id", put(handlers::timetable::update_timetable))
        .route(
            "/api/timetables/:id",
            delete(handlers::timetable::delete_timetable),
        )
        .route(
            "/api/timetables/:id/timeslots",
            post(handlers::timetable::add_time_slot),
        )
        .route(
            "/api/timetables/:id/timeslots/:slot_id",
            delete(handlers::timetable::remove_time_slot),
        )
}
