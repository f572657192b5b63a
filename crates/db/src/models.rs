use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;

use timetable_core::errors::TimetableError;
use timetable_core::models::class::{Class, ClassSummary};
use timetable_core::models::notification::Notification;
use timetable_core::models::special_class::SpecialClass;
use timetable_core::models::subject::{Subject, SubjectSummary};
use timetable_core::models::substitution::{Substitution, SubstitutionStatus};
use timetable_core::models::timetable::NewTimeSlot;
use timetable_core::models::user::{Role, User, UserSummary};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub department: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DbUser {
    pub fn role(&self) -> Result<Role, TimetableError> {
        match self.role.as_str() {
            "admin" => Ok(Role::Admin),
            "faculty" => Ok(Role::Faculty),
            "student" => Ok(Role::Student),
            other => Err(TimetableError::Validation(format!(
                "`{other}` is not a valid role"
            ))),
        }
    }

    pub fn into_user(self) -> Result<User, TimetableError> {
        let role = self.role()?;
        Ok(User {
            id: self.id,
            name: self.name,
            email: self.email,
            role,
            department: self.department,
            created_at: self.created_at,
        })
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            department: self.department.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAuthToken {
    pub token: Uuid,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbClass {
    pub id: Uuid,
    pub class_name: String,
    pub course_code: String,
    pub department: String,
    pub semester: i32,
    pub created_at: DateTime<Utc>,
}

impl DbClass {
    pub fn summary(&self) -> ClassSummary {
        ClassSummary {
            id: self.id,
            class_name: self.class_name.clone(),
            course_code: self.course_code.clone(),
            department: self.department.clone(),
            semester: self.semester,
        }
    }
}

impl From<DbClass> for Class {
    fn from(row: DbClass) -> Self {
        Class {
            id: row.id,
            class_name: row.class_name,
            course_code: row.course_code,
            department: row.department,
            semester: row.semester,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSubject {
    pub id: Uuid,
    pub subject_name: String,
    pub subject_code: String,
    pub credits: i32,
    pub department: String,
    pub created_at: DateTime<Utc>,
}

impl DbSubject {
    pub fn summary(&self) -> SubjectSummary {
        SubjectSummary {
            id: self.id,
            subject_name: self.subject_name.clone(),
            subject_code: self.subject_code.clone(),
            credits: self.credits,
        }
    }
}

impl From<DbSubject> for Subject {
    fn from(row: DbSubject) -> Self {
        Subject {
            id: row.id,
            subject_name: row.subject_name,
            subject_code: row.subject_code,
            credits: row.credits,
            department: row.department,
            created_at: row.created_at,
        }
    }
}

/// A time slot as embedded in the `time_slots` JSONB column. The slot id
/// is assigned here, when the slot is first embedded into a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTimeSlot {
    pub id: Uuid,
    pub start_time: String,
    pub end_time: String,
    pub subject_id: Uuid,
    pub faculty_id: Uuid,
    pub classroom: String,
}

impl StoredTimeSlot {
    pub fn from_new(slot: NewTimeSlot) -> Self {
        StoredTimeSlot {
            id: Uuid::new_v4(),
            start_time: slot.start_time,
            end_time: slot.end_time,
            subject_id: slot.subject_id,
            faculty_id: slot.faculty_id,
            classroom: slot.classroom,
        }
    }
}

/// One timetable document: a row owning its embedded slots, so every slot
/// mutation is a single-row write.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbTimetable {
    pub id: Uuid,
    pub class_id: Uuid,
    pub day: String,
    pub time_slots: Json<Vec<StoredTimeSlot>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSubstitution {
    pub id: Uuid,
    pub timetable_id: Uuid,
    pub slot_id: Uuid,
    pub date: NaiveDate,
    pub original_faculty_id: Uuid,
    pub substitute_faculty_id: Uuid,
    pub reason: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl DbSubstitution {
    pub fn into_substitution(self) -> Result<Substitution, TimetableError> {
        let status = match self.status.as_str() {
            "pending" => SubstitutionStatus::Pending,
            "approved" => SubstitutionStatus::Approved,
            "rejected" => SubstitutionStatus::Rejected,
            other => {
                return Err(TimetableError::Validation(format!(
                    "`{other}` is not a valid substitution status"
                )))
            }
        };
        Ok(Substitution {
            id: self.id,
            timetable_id: self.timetable_id,
            slot_id: self.slot_id,
            date: self.date,
            original_faculty_id: self.original_faculty_id,
            substitute_faculty_id: self.substitute_faculty_id,
            reason: self.reason,
            status,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSpecialClass {
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

impl From<DbSpecialClass> for SpecialClass {
    fn from(row: DbSpecialClass) -> Self {
        SpecialClass {
            id: row.id,
            class_id: row.class_id,
            subject_id: row.subject_id,
            faculty_id: row.faculty_id,
            date: row.date,
            start_time: row.start_time,
            end_time: row.end_time,
            room: row.room,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbNotification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<DbNotification> for Notification {
    fn from(row: DbNotification) -> Self {
        Notification {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            message: row.message,
            read: row.is_read,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_slot_keeps_field_names_stable() {
        // The faculty filter relies on `@>` containment against these keys.
        let slot = StoredTimeSlot {
            id: Uuid::new_v4(),
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            subject_id: Uuid::new_v4(),
            faculty_id: Uuid::new_v4(),
            classroom: "A101".to_string(),
        };

        let value = serde_json::to_value(&slot).unwrap();
        let object = value.as_object().unwrap();
        for key in ["id", "start_time", "end_time", "subject_id", "faculty_id", "classroom"] {
            assert!(object.contains_key(key), "missing key {key}");
        }
    }

    #[test]
    fn from_new_assigns_an_id() {
        let slot = NewTimeSlot {
            start_time: "09:00".to_string(),
            end_time: "10:00".to_string(),
            subject_id: Uuid::new_v4(),
            faculty_id: Uuid::new_v4(),
            classroom: "A101".to_string(),
        };

        let first = StoredTimeSlot::from_new(slot.clone());
        let second = StoredTimeSlot::from_new(slot);
        assert_ne!(first.id, second.id);
        assert_eq!(first.start_time, second.start_time);
    }
}
