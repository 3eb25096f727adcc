//! Tests for error types

use laundry_board::core::{BoardError, ReservationStatus};

#[test]
fn test_empty_name_error() {
    assert_eq!(format!("{}", BoardError::EmptyName), "name is required");
}

#[test]
fn test_invalid_loads_error() {
    let err = BoardError::InvalidLoads {
        value: "12".to_string(),
        min: 1,
        max: 10,
    };
    assert_eq!(format!("{}", err), "invalid number of loads `12` (must be 1-10)");
}

#[test]
fn test_not_found_error() {
    let err = BoardError::NotFound("abc".to_string());
    assert_eq!(format!("{}", err), "reservation not found: abc");
}

#[test]
fn test_not_waiting_error() {
    let err = BoardError::NotWaiting {
        id: "abc".to_string(),
        status: ReservationStatus::Completed,
    };
    assert_eq!(format!("{}", err), "reservation abc is completed, not waiting");
}

#[test]
fn test_config_error() {
    let err = BoardError::Config("min_loads must be greater than 0".to_string());
    assert_eq!(
        format!("{}", err),
        "config invalid: min_loads must be greater than 0"
    );
}
