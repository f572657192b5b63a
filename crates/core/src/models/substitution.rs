use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubstitutionStatus {
    Pending,
    Approved,
    Rejected,
}

impl SubstitutionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SubstitutionStatus::Pending => "pending",
            SubstitutionStatus::Approved => "approved",
            SubstitutionStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for SubstitutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request to have another faculty member cover one scheduled slot on a
/// specific date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Substitution {
    pub id: Uuid,
    pub timetable_id: Uuid,
    pub slot_id: Uuid,
    pub date: NaiveDate,
    pub original_faculty_id: Uuid,
    pub substitute_faculty_id: Uuid,
    pub reason: String,
    pub status: SubstitutionStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubstitutionRequest {
    pub timetable_id: Uuid,
    pub slot_id: Uuid,
    pub date: NaiveDate,
    pub original_faculty_id: Uuid,
    pub substitute_faculty_id: Uuid,
    pub reason: String,
}

/// Admin decision on a pending substitution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubstitutionStatusRequest {
    pub status: SubstitutionStatus,
}
