use chrono::{DateTime, Datelike, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{TimetableError, TimetableResult};
use crate::models::class::ClassSummary;
use crate::models::day::Day;
use crate::models::subject::SubjectSummary;
use crate::models::target::TimetableTarget;
use crate::models::user::UserSummary;

/// A reference field that the read path resolves into a summary of the
/// referenced entity when it exists, falling back to the bare id for
/// dangling references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassRef {
    Populated(ClassSummary),
    Id(Uuid),
}

impl ClassRef {
    pub fn id(&self) -> Uuid {
        match self {
            ClassRef::Populated(class) => class.id,
            ClassRef::Id(id) => *id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SubjectRef {
    Populated(SubjectSummary),
    Id(Uuid),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacultyRef {
    Populated(UserSummary),
    Id(Uuid),
}

/// One scheduled class occurrence embedded within a timetable document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: Uuid,
    pub start_time: String,
    pub end_time: String,
    pub subject_id: SubjectRef,
    pub faculty_id: FacultyRef,
    pub classroom: String,
}

/// All scheduled classes for one class-section on one day. Slot order is
/// insertion order, not time order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timetable {
    pub id: Uuid,
    pub class_id: ClassRef,
    pub day: Day,
    pub time_slots: Vec<TimeSlot>,
    pub created_at: DateTime<Utc>,
}

/// The flattened per-slot record the frontend consumes: one record per
/// embedded slot, addressed by the composite `{timetableId}_{slotId}` id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatTimeSlot {
    pub id: String,
    pub timetable_id: Uuid,
    pub slot_id: Uuid,
    pub class_id: ClassRef,
    pub day: Day,
    pub start_time: String,
    pub end_time: String,
    pub subject_id: SubjectRef,
    pub faculty_id: FacultyRef,
    pub room: String,
    pub is_active: bool,
    pub semester: i32,
    pub academic_year: i32,
}

impl Timetable {
    /// Flattens this document into one wire record per embedded slot.
    ///
    /// `semester` comes from the populated class summary (1 when the
    /// reference did not resolve) and `academicYear` is the calendar year
    /// at response time; neither is stored.
    pub fn flatten(&self) -> Vec<FlatTimeSlot> {
        let semester = match &self.class_id {
            ClassRef::Populated(class) => class.semester,
            ClassRef::Id(_) => 1,
        };
        let academic_year = Utc::now().year();

        self.time_slots
            .iter()
            .map(|slot| FlatTimeSlot {
                id: TimetableTarget::slot(self.id, slot.id).to_string(),
                timetable_id: self.id,
                slot_id: slot.id,
                class_id: self.class_id.clone(),
                day: self.day,
                start_time: slot.start_time.clone(),
                end_time: slot.end_time.clone(),
                subject_id: slot.subject_id.clone(),
                faculty_id: slot.faculty_id.clone(),
                room: slot.classroom.clone(),
                is_active: true,
                semester,
                academic_year,
            })
            .collect()
    }
}

/// A slot as accepted on the write path, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTimeSlot {
    pub start_time: String,
    pub end_time: String,
    pub subject_id: Uuid,
    pub faculty_id: Uuid,
    pub classroom: String,
}

impl NewTimeSlot {
    pub fn validate(&self) -> TimetableResult<()> {
        let mut errors = Vec::new();
        collect_time_error(&mut errors, "startTime", &self.start_time);
        collect_time_error(&mut errors, "endTime", &self.end_time);
        join_field_errors(errors)
    }
}

/// Flat creation body: one slot plus the parent coordinates. Subject to
/// the upsert-by-day policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlotEntry {
    pub class_id: Uuid,
    pub day: Day,
    pub subject_id: Uuid,
    pub faculty_id: Uuid,
    pub start_time: String,
    pub end_time: String,
    pub room: String,
}

impl CreateSlotEntry {
    pub fn validate(&self) -> TimetableResult<()> {
        self.slot().validate()
    }

    /// The embedded slot this entry carries; `room` maps to `classroom`.
    pub fn slot(&self) -> NewTimeSlot {
        NewTimeSlot {
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            subject_id: self.subject_id,
            faculty_id: self.faculty_id,
            classroom: self.room.clone(),
        }
    }
}

/// Nested creation body: a whole document created verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimetableDocument {
    pub class_id: Uuid,
    pub day: Day,
    pub time_slots: Vec<NewTimeSlot>,
}

impl CreateTimetableDocument {
    pub fn validate(&self) -> TimetableResult<()> {
        let mut errors = Vec::new();
        for slot in &self.time_slots {
            collect_time_error(&mut errors, "startTime", &slot.start_time);
            collect_time_error(&mut errors, "endTime", &slot.end_time);
        }
        join_field_errors(errors)
    }
}

/// `POST /api/timetables` accepts either shape. The slot-entry variant is
/// tried first, so a body carrying all of `subjectId`, `facultyId`,
/// `startTime`, `endTime` and `room` is treated as a flat entry even if it
/// also carries a `timeSlots` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreateTimetableRequest {
    SlotEntry(CreateSlotEntry),
    Document(CreateTimetableDocument),
}

/// Flat patch applied to a composite-addressed slot. Alongside the slot
/// fields it overwrites the parent document's `day` and `classId`, which
/// affects every other slot sharing that parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSlotRequest {
    pub class_id: Uuid,
    pub day: Day,
    pub subject_id: Uuid,
    pub faculty_id: Uuid,
    pub start_time: String,
    pub end_time: String,
    pub room: String,
}

impl UpdateSlotRequest {
    pub fn validate(&self) -> TimetableResult<()> {
        let mut errors = Vec::new();
        collect_time_error(&mut errors, "startTime", &self.start_time);
        collect_time_error(&mut errors, "endTime", &self.end_time);
        join_field_errors(errors)
    }
}

/// Merge-style patch for a whole document. Replacing `timeSlots` assigns
/// fresh slot ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTimetableDocument {
    pub class_id: Option<Uuid>,
    pub day: Option<Day>,
    pub time_slots: Option<Vec<NewTimeSlot>>,
}

impl UpdateTimetableDocument {
    pub fn validate(&self) -> TimetableResult<()> {
        let mut errors = Vec::new();
        if let Some(slots) = &self.time_slots {
            for slot in slots {
                collect_time_error(&mut errors, "startTime", &slot.start_time);
                collect_time_error(&mut errors, "endTime", &slot.end_time);
            }
        }
        join_field_errors(errors)
    }
}

/// Wall-clock slot times are zero-padded `"HH:MM"` strings; zero padding
/// keeps lexicographic order equal to chronological order, which the list
/// sort relies on.
pub fn validate_time(value: &str) -> Result<(), String> {
    if value.len() == 5 && NaiveTime::parse_from_str(value, "%H:%M").is_ok() {
        Ok(())
    } else {
        Err(format!("`{value}` is not a valid HH:MM time"))
    }
}

fn collect_time_error(errors: &mut Vec<String>, field: &str, value: &str) {
    if let Err(message) = validate_time(value) {
        errors.push(format!("{field}: {message}"));
    }
}

fn join_field_errors(errors: Vec<String>) -> TimetableResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(TimetableError::Validation(errors.join(", ")))
    }
}
