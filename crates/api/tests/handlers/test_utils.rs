use chrono::Utc;
use sqlx::types::Json;
use uuid::Uuid;

use timetable_core::models::user::{Role, User};
use timetable_db::mock::repositories::{MockClassRepo, MockTimetableRepo, MockUserRepo};
use timetable_db::models::{DbTimetable, StoredTimeSlot};

pub struct TestContext {
    // Mocks for each repository the timetable handlers touch
    pub timetable_repo: MockTimetableRepo,
    pub class_repo: MockClassRepo,
    pub user_repo: MockUserRepo,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            timetable_repo: MockTimetableRepo::new(),
            class_repo: MockClassRepo::new(),
            user_repo: MockUserRepo::new(),
        }
    }
}

pub fn stored_slot(start: &str, end: &str) -> StoredTimeSlot {
    StoredTimeSlot {
        id: Uuid::new_v4(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        subject_id: Uuid::new_v4(),
        faculty_id: Uuid::new_v4(),
        classroom: "A101".to_string(),
    }
}

pub fn db_timetable(class_id: Uuid, day: &str, slots: Vec<StoredTimeSlot>) -> DbTimetable {
    DbTimetable {
        id: Uuid::new_v4(),
        class_id,
        day: day.to_string(),
        time_slots: Json(slots),
        created_at: Utc::now(),
    }
}

pub fn user_with_role(role: Role) -> User {
    User {
        id: Uuid::new_v4(),
        name: "Test User".to_string(),
        email: "user@example.edu".to_string(),
        role,
        department: Some("Computer Science".to_string()),
        created_at: Utc::now(),
    }
}
