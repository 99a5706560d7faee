//! Production-grade logging for the qBraid Chat desktop application.
//!
//! Provides dual output (stdout with colors + file) with thread-safe
//! initialization. One log file per process run, named with a startup
//! timestamp, appended to for the lifetime of the process and never
//! rotated or deleted.

use crate::error::AppError;

use common::ErrorLocation;

use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Once, OnceLock};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::{format_rfc3339, format_rfc3339_seconds};
use log::{LevelFilter, info, warn};

/// Thread-safe initialization guard.
static INIT_LOGGER_ONCE: Once = Once::new();

/// Tracks if logger initialization was already attempted.
static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

/// Path of this run's log file, set once initialization succeeds.
static LOG_FILE_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Log file name prefix; the startup timestamp completes the name.
const LOG_FILE_PREFIX: &str = "qbraid-chat-";

/// Message logged when logger is successfully initialized.
const LOGGER_INITIALIZED_MESSAGE_PREFIX: &str = "Logger initialized with level: ";

/// Warning message when logger is called multiple times.
const LOGGER_ALREADY_INITIALIZED_MESSAGE: &str = "Logger already initialized";

/// Message logged when the application exits.
const SHUTDOWN_MESSAGE: &str = "Application shutting down";

/// Default log level for debug builds.
#[cfg(debug_assertions)]
const LOG_LEVEL: LevelFilter = LevelFilter::Debug;

/// Default log level for release builds.
#[cfg(not(debug_assertions))]
const LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Initialize the logger with dual output (stdout + file).
///
/// This function is safe to call multiple times - subsequent calls will
/// log a warning and return the already-created log file path. The actual
/// initialization runs exactly once.
///
/// # Arguments
///
/// * `log_dir` - Directory where the log file will be created
///
/// # Errors
///
/// Returns an error if:
/// - Log file cannot be created
/// - Logger dispatch configuration fails
pub fn initialize(log_dir: &Path) -> Result<PathBuf, AppError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("{LOGGER_ALREADY_INITIALIZED_MESSAGE}");
        return LOG_FILE_PATH.get().cloned().ok_or_else(|| AppError::App {
            message: String::from("Logger was called before but never initialized"),
            location: ErrorLocation::from(std::panic::Location::caller()),
        });
    }

    let mut result = Err(AppError::App {
        message: String::from("Logger initialization did not run"),
        location: ErrorLocation::from(std::panic::Location::caller()),
    });

    INIT_LOGGER_ONCE.call_once(|| {
        result = initialize_internal(log_dir);
        if let Ok(path) = &result {
            let _ = LOG_FILE_PATH.set(path.clone());
            info!("{LOGGER_INITIALIZED_MESSAGE_PREFIX}{LOG_LEVEL:?}");
        }
    });

    result
}

/// Record the application exit as the last line of this run's log file.
pub fn log_shutdown() {
    info!("{SHUTDOWN_MESSAGE}");
}

/// Log file name for this run, e.g. `qbraid-chat-2026-08-29T12-00-00Z.log`.
///
/// Colons in the rfc3339 timestamp are replaced so the name is valid on
/// every platform.
fn log_file_name() -> String {
    let stamp = format_rfc3339_seconds(SystemTime::now())
        .to_string()
        .replace(':', "-");
    format!("{LOG_FILE_PREFIX}{stamp}.log")
}

/// Internal logger initialization with dual dispatch.
#[track_caller]
fn initialize_internal(log_dir: &Path) -> Result<PathBuf, AppError> {
    let log_file_path = log_dir.join(log_file_name());

    // Color configuration for stdout
    let color_configuration = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    // Base dispatch with level filter
    let base_dispatch = Dispatch::new().level(LOG_LEVEL);

    // Stdout dispatch (colored)
    let stdout_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = color_configuration.color(record.level()),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0),
            ))
        })
        .chain(stdout());

    // File dispatch (plain text, no colors)
    let file_dispatch = Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{file}:{line}]",
                date = format_rfc3339(SystemTime::now()),
                level = record.level(),
                message = message,
                file = record.file().unwrap_or("unknown"),
                line = record.line().unwrap_or(0)
            ))
        })
        .chain(fern::log_file(&log_file_path).map_err(|e| AppError::App {
            message: format!("Failed to create log file: {e}"),
            location: ErrorLocation::from(std::panic::Location::caller()),
        })?);

    // Apply the configuration
    base_dispatch
        .chain(stdout_dispatch)
        .chain(file_dispatch)
        .apply()
        .map_err(|e| AppError::App {
            message: format!("Failed to initialize logger: {e}"),
            location: ErrorLocation::from(std::panic::Location::caller()),
        })?;

    Ok(log_file_path)
}
