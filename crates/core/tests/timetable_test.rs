use chrono::{Datelike, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use uuid::Uuid;

use timetable_core::models::class::ClassSummary;
use timetable_core::models::day::Day;
use timetable_core::models::subject::SubjectSummary;
use timetable_core::models::timetable::{
    validate_time, ClassRef, CreateTimetableRequest, FacultyRef, NewTimeSlot, SubjectRef,
    TimeSlot, Timetable, UpdateSlotRequest,
};
use timetable_core::models::user::UserSummary;

fn class_summary(semester: i32) -> ClassSummary {
    ClassSummary {
        id: Uuid::new_v4(),
        class_name: "CS-3A".to_string(),
        course_code: "CS301".to_string(),
        department: "Computer Science".to_string(),
        semester,
    }
}

fn slot(start: &str, end: &str) -> TimeSlot {
    TimeSlot {
        id: Uuid::new_v4(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        subject_id: SubjectRef::Populated(SubjectSummary {
            id: Uuid::new_v4(),
            subject_name: "Operating Systems".to_string(),
            subject_code: "OS301".to_string(),
            credits: 4,
        }),
        faculty_id: FacultyRef::Populated(UserSummary {
            id: Uuid::new_v4(),
            name: "Dr. Rao".to_string(),
            email: "rao@example.edu".to_string(),
            department: Some("Computer Science".to_string()),
        }),
        classroom: "A101".to_string(),
    }
}

fn timetable(class_id: ClassRef, slots: Vec<TimeSlot>) -> Timetable {
    Timetable {
        id: Uuid::new_v4(),
        class_id,
        day: Day::Monday,
        time_slots: slots,
        created_at: Utc::now(),
    }
}

#[test]
fn flatten_emits_one_record_per_slot() {
    let doc = timetable(
        ClassRef::Populated(class_summary(3)),
        vec![slot("09:00", "10:00"), slot("10:00", "11:00"), slot("14:00", "15:00")],
    );

    let flat = doc.flatten();

    assert_eq!(flat.len(), doc.time_slots.len());
    for (record, source) in flat.iter().zip(&doc.time_slots) {
        assert_eq!(record.id, format!("{}_{}", doc.id, source.id));
        assert_eq!(record.timetable_id, doc.id);
        assert_eq!(record.slot_id, source.id);
        assert_eq!(record.start_time, source.start_time);
        assert_eq!(record.room, source.classroom);
        assert!(record.is_active);
    }
}

#[test]
fn flatten_of_empty_document_is_empty() {
    let doc = timetable(ClassRef::Populated(class_summary(3)), vec![]);

    assert!(doc.flatten().is_empty());
}

#[test]
fn flatten_takes_semester_from_populated_class() {
    let doc = timetable(ClassRef::Populated(class_summary(5)), vec![slot("09:00", "10:00")]);

    assert_eq!(doc.flatten()[0].semester, 5);
}

#[test]
fn flatten_defaults_semester_for_unresolved_class() {
    let doc = timetable(ClassRef::Id(Uuid::new_v4()), vec![slot("09:00", "10:00")]);

    assert_eq!(doc.flatten()[0].semester, 1);
}

#[test]
fn flatten_stamps_current_calendar_year() {
    let doc = timetable(ClassRef::Populated(class_summary(3)), vec![slot("09:00", "10:00")]);

    assert_eq!(doc.flatten()[0].academic_year, Utc::now().year());
}

#[test]
fn flat_record_serializes_with_frontend_field_names() {
    let doc = timetable(ClassRef::Populated(class_summary(3)), vec![slot("09:00", "10:00")]);

    let value = serde_json::to_value(&doc.flatten()[0]).unwrap();
    let object = value.as_object().unwrap();
    for key in [
        "id",
        "timetableId",
        "slotId",
        "classId",
        "day",
        "startTime",
        "endTime",
        "subjectId",
        "facultyId",
        "room",
        "isActive",
        "semester",
        "academicYear",
    ] {
        assert!(object.contains_key(key), "missing key {key}");
    }
}

#[test]
fn flat_body_deserializes_as_slot_entry() {
    let body = json!({
        "classId": Uuid::new_v4(),
        "day": "Monday",
        "subjectId": Uuid::new_v4(),
        "facultyId": Uuid::new_v4(),
        "startTime": "09:00",
        "endTime": "10:00",
        "room": "A101"
    });

    let request: CreateTimetableRequest = serde_json::from_value(body).unwrap();

    assert!(matches!(request, CreateTimetableRequest::SlotEntry(_)));
}

#[test]
fn nested_body_deserializes_as_document() {
    let body = json!({
        "classId": Uuid::new_v4(),
        "day": "Tuesday",
        "timeSlots": [{
            "startTime": "09:00",
            "endTime": "10:00",
            "subjectId": Uuid::new_v4(),
            "facultyId": Uuid::new_v4(),
            "classroom": "B202"
        }]
    });

    let request: CreateTimetableRequest = serde_json::from_value(body).unwrap();

    match request {
        CreateTimetableRequest::Document(document) => {
            assert_eq!(document.day, Day::Tuesday);
            assert_eq!(document.time_slots.len(), 1);
        }
        other => panic!("expected document variant, got {other:?}"),
    }
}

#[test]
fn slot_entry_wins_when_body_carries_both_shapes() {
    let body = json!({
        "classId": Uuid::new_v4(),
        "day": "Monday",
        "subjectId": Uuid::new_v4(),
        "facultyId": Uuid::new_v4(),
        "startTime": "09:00",
        "endTime": "10:00",
        "room": "A101",
        "timeSlots": []
    });

    let request: CreateTimetableRequest = serde_json::from_value(body).unwrap();

    assert!(matches!(request, CreateTimetableRequest::SlotEntry(_)));
}

#[test]
fn body_matching_neither_shape_is_rejected() {
    // No room and no timeSlots: not a slot entry, not a document.
    let body = json!({
        "classId": Uuid::new_v4(),
        "day": "Monday",
        "subjectId": Uuid::new_v4(),
        "facultyId": Uuid::new_v4(),
        "startTime": "09:00",
        "endTime": "10:00"
    });

    let result: Result<CreateTimetableRequest, _> = serde_json::from_value(body);

    assert!(result.is_err());
}

#[test]
fn slot_entry_maps_room_to_classroom() {
    let body = json!({
        "classId": Uuid::new_v4(),
        "day": "Monday",
        "subjectId": Uuid::new_v4(),
        "facultyId": Uuid::new_v4(),
        "startTime": "09:00",
        "endTime": "10:00",
        "room": "Lab-2"
    });

    let request: CreateTimetableRequest = serde_json::from_value(body).unwrap();
    let CreateTimetableRequest::SlotEntry(entry) = request else {
        panic!("expected slot entry");
    };

    assert_eq!(entry.slot().classroom, "Lab-2");
}

#[rstest]
#[case("00:00", true)]
#[case("09:00", true)]
#[case("23:59", true)]
#[case("9:00", false)]
#[case("24:00", false)]
#[case("12:60", false)]
#[case("12-30", false)]
#[case("", false)]
fn validates_wall_clock_times(#[case] value: &str, #[case] expected_ok: bool) {
    assert_eq!(validate_time(value).is_ok(), expected_ok, "value: {value}");
}

#[test]
fn slot_validation_joins_field_messages() {
    let slot = NewTimeSlot {
        start_time: "9:00".to_string(),
        end_time: "25:00".to_string(),
        subject_id: Uuid::new_v4(),
        faculty_id: Uuid::new_v4(),
        classroom: "A101".to_string(),
    };

    let message = slot.validate().unwrap_err().to_string();

    assert!(message.contains("startTime"));
    assert!(message.contains("endTime"));
    assert!(message.contains(", "));
}

#[test]
fn update_slot_request_uses_frontend_field_names() {
    let body = json!({
        "classId": Uuid::new_v4(),
        "day": "Tuesday",
        "subjectId": Uuid::new_v4(),
        "facultyId": Uuid::new_v4(),
        "startTime": "11:00",
        "endTime": "12:00",
        "room": "B2"
    });

    let patch: UpdateSlotRequest = serde_json::from_value(body).unwrap();

    assert_eq!(patch.day, Day::Tuesday);
    assert_eq!(patch.room, "B2");
    assert!(patch.validate().is_ok());
}
