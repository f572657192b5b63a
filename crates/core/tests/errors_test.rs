use std::error::Error;
use timetable_core::errors::{TimetableError, TimetableResult};

#[test]
fn test_timetable_error_display() {
    let not_found = TimetableError::NotFound("Timetable not found".to_string());
    let validation = TimetableError::Validation("Invalid input".to_string());
    let authentication = TimetableError::Authentication("Invalid token".to_string());
    let authorization = TimetableError::Authorization("Not authorized".to_string());
    let database = TimetableError::Database(eyre::eyre!("Database connection failed"));
    let internal = TimetableError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));

    assert_eq!(
        not_found.to_string(),
        "Resource not found: Timetable not found"
    );
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert_eq!(
        authentication.to_string(),
        "Authentication error: Invalid token"
    );
    assert_eq!(
        authorization.to_string(),
        "Authorization error: Not authorized"
    );
    assert!(database.to_string().contains("Database error:"));
    assert!(internal.to_string().contains("Internal server error:"));
}

#[test]
fn test_error_source() {
    let io_error = std::io::Error::new(std::io::ErrorKind::Other, "IO error");
    let timetable_error = TimetableError::Internal(Box::new(io_error));

    assert!(timetable_error.source().is_some());
}

#[test]
fn test_timetable_result() {
    let result: TimetableResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: TimetableResult<i32> = Err(TimetableError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}

#[test]
fn test_from_eyre_report() {
    let report = eyre::eyre!("Database error");
    let timetable_error = TimetableError::Database(report);

    assert!(timetable_error.to_string().contains("Database error"));
}
