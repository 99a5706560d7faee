// Unit tests for error module
// Tests error serialization (critical for Tauri IPC)

use crate::error::AppError;

use common::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Tests that errors can be serialized (required for Tauri IPC).
///
/// **WHY THIS MATTERS**: Tauri commands must return serializable errors to send them
/// to the frontend. If serialization breaks, the frontend receives opaque errors.
///
/// **BUG THIS CATCHES**: Would catch if someone removes the `#[derive(Serialize)]`
/// or if the error structure becomes non-serializable (e.g., adding a non-serializable field).
#[test]
fn given_app_error_when_serialized_then_succeeds() {
    // GIVEN: An AppError
    let err = AppError::NoCredential {
        message: String::from("Test"),
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN: Serializing to JSON
    let result = serde_json::to_string(&err);

    // THEN: Should succeed
    assert!(result.is_ok(), "Error should be serializable for Tauri IPC");

    // AND: Should contain the error data
    let json = result.unwrap();
    assert!(
        json.contains("NoCredential"),
        "JSON should contain variant name"
    );
    assert!(json.contains("Test"), "JSON should contain message");
}

/// **VALUE**: Tests that the Display rendering carries message and location.
///
/// **WHY THIS MATTERS**: These errors land in the log file via their Display
/// text; a rendering without the location loses the debugging trail.
#[test]
fn given_app_error_when_displayed_then_includes_message_and_location() {
    let err = AppError::State {
        message: String::from("actor unreachable"),
        location: ErrorLocation::from(Location::caller()),
    };

    let rendered = err.to_string();

    assert!(rendered.contains("actor unreachable"));
    assert!(rendered.contains("error.rs"), "Should carry the source file");
}
