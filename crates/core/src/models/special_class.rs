use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TimetableResult;
use crate::models::timetable::NewTimeSlot;

/// A one-off session outside the weekly grid, e.g. a make-up lecture or an
/// extra lab on a specific date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialClass {
    pub id: Uuid,
    pub class_id: Uuid,
    pub subject_id: Uuid,
    pub faculty_id: Uuid,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub room: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpecialClassRequest {
    pub class_id: Uuid,
    pub subject_id: Uuid,
    pub faculty_id: Uuid,
    pub date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub room: String,
    pub description: Option<String>,
}

impl CreateSpecialClassRequest {
    pub fn validate(&self) -> TimetableResult<()> {
        // Reuse the slot time validation; the remaining fields are typed.
        NewTimeSlot {
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            subject_id: self.subject_id,
            faculty_id: self.faculty_id,
            classroom: self.room.clone(),
        }
        .validate()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpecialClassRequest {
    pub date: Option<NaiveDate>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub room: Option<String>,
    pub description: Option<String>,
}
