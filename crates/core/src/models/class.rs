use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: Uuid,
    pub class_name: String,
    pub course_code: String,
    pub department: String,
    pub semester: i32,
    pub created_at: DateTime<Utc>,
}

/// The subset of class fields joined into timetable responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary {
    pub id: Uuid,
    pub class_name: String,
    pub course_code: String,
    pub department: String,
    pub semester: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassRequest {
    pub class_name: String,
    pub course_code: String,
    pub department: String,
    pub semester: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassRequest {
    pub class_name: Option<String>,
    pub course_code: Option<String>,
    pub department: Option<String>,
    pub semester: Option<i32>,
}
