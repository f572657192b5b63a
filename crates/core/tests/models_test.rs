use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, to_string};
use uuid::Uuid;

use timetable_core::models::class::ClassSummary;
use timetable_core::models::day::Day;
use timetable_core::models::response::{DataResponse, ListResponse, MessageResponse};
use timetable_core::models::substitution::SubstitutionStatus;
use timetable_core::models::user::Role;

#[test]
fn test_day_serialization() {
    let json = to_string(&Day::Wednesday).unwrap();
    assert_eq!(json, "\"Wednesday\"");

    let day: Day = from_str("\"Saturday\"").unwrap();
    assert_eq!(day, Day::Saturday);
}

#[test]
fn test_day_rejects_unknown_values() {
    let result: Result<Day, _> = from_str("\"Sunday\"");
    assert!(result.is_err());

    let parsed = "Funday".parse::<Day>();
    assert!(parsed.is_err());
}

#[rstest]
#[case(Day::Monday, 0)]
#[case(Day::Tuesday, 1)]
#[case(Day::Wednesday, 2)]
#[case(Day::Thursday, 3)]
#[case(Day::Friday, 4)]
#[case(Day::Saturday, 5)]
fn test_day_ordinals_follow_the_teaching_week(#[case] day: Day, #[case] ordinal: u8) {
    assert_eq!(day.ordinal(), ordinal);
}

#[test]
fn test_day_round_trips_through_strings() {
    for day in Day::ALL {
        assert_eq!(day.as_str().parse::<Day>().unwrap(), day);
    }
}

#[test]
fn test_role_serialization_is_lowercase() {
    assert_eq!(to_string(&Role::Admin).unwrap(), "\"admin\"");
    assert_eq!(to_string(&Role::Faculty).unwrap(), "\"faculty\"");
    assert_eq!(to_string(&Role::Student).unwrap(), "\"student\"");

    let role: Role = from_str("\"admin\"").unwrap();
    assert_eq!(role, Role::Admin);
}

#[test]
fn test_substitution_status_serialization() {
    assert_eq!(to_string(&SubstitutionStatus::Pending).unwrap(), "\"pending\"");

    let status: SubstitutionStatus = from_str("\"approved\"").unwrap();
    assert_eq!(status, SubstitutionStatus::Approved);
}

#[test]
fn test_class_summary_serialization() {
    let summary = ClassSummary {
        id: Uuid::new_v4(),
        class_name: "CS-3A".to_string(),
        course_code: "CS301".to_string(),
        department: "Computer Science".to_string(),
        semester: 3,
    };

    let json = to_string(&summary).unwrap();
    let deserialized: ClassSummary = from_str(&json).unwrap();

    assert_eq!(deserialized, summary);
    assert!(json.contains("\"className\""));
    assert!(json.contains("\"courseCode\""));
}

#[test]
fn test_data_response_envelope() {
    let response = DataResponse::new(7);

    assert!(response.success);
    assert_eq!(response.data, 7);
}

#[test]
fn test_list_response_counts_payload_records() {
    let response = ListResponse::new(12, vec!["a", "b", "c"]);

    assert!(response.success);
    assert_eq!(response.count, 3);
    assert_eq!(response.total, 12);
}

#[test]
fn test_message_response() {
    let response = MessageResponse::new("Timetable deleted successfully");

    assert!(response.success);
    assert_eq!(response.message, "Timetable deleted successfully");
}
