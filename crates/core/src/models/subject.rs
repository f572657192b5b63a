use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: Uuid,
    pub subject_name: String,
    pub subject_code: String,
    pub credits: i32,
    pub department: String,
    pub created_at: DateTime<Utc>,
}

/// The subset of subject fields joined into timetable responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectSummary {
    pub id: Uuid,
    pub subject_name: String,
    pub subject_code: String,
    pub credits: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubjectRequest {
    pub subject_name: String,
    pub subject_code: String,
    pub credits: i32,
    pub department: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubjectRequest {
    pub subject_name: Option<String>,
    pub subject_code: Option<String>,
    pub credits: Option<i32>,
    pub department: Option<String>,
}
