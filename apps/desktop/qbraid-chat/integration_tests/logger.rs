use qbraid_chat::logger::{initialize, log_shutdown};

use serial_test::serial;

// The logger is process-global, so the happy path lives here, in its own
// test binary, away from the failure-path unit test.

/// **VALUE**: Verifies successful initialization creates the timestamped
/// per-run log file and that repeated calls hand back the same path.
///
/// **WHY THIS MATTERS**: One append-only file per process run is the only
/// persisted artifact this app produces; its name and existence are the
/// contract. Idempotent initialization keeps a second code path (tests,
/// setup hooks) from crashing the app at startup.
///
/// **BUG THIS CATCHES**: Would catch a broken file-name template, fern
/// failing to create the file, or the second call panicking in the Once.
#[test]
#[serial]
fn given_valid_dir_when_initialized_then_creates_run_log_file_and_is_idempotent() {
    // GIVEN: A writable temporary directory
    let temp_dir = tempfile::tempdir().unwrap();

    // WHEN: Initializing the logger
    let path = initialize(temp_dir.path()).unwrap();

    // THEN: The per-run file exists, named with prefix and extension
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(path.exists(), "Log file should be created eagerly");
    assert!(name.starts_with("qbraid-chat-"), "Name carries the prefix");
    assert!(name.ends_with(".log"), "Name carries the extension");

    // WHEN: Initializing again
    let second = initialize(temp_dir.path()).unwrap();

    // THEN: Same file, no second logger
    assert_eq!(second, path, "Repeated init should return this run's file");

    // WHEN: Recording shutdown, as the exit hook does on window close
    log_shutdown();

    // THEN: The lifecycle record reaches the file
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(
        contents.contains("Application shutting down"),
        "Shutdown must be recorded in this run's log file"
    );
}
