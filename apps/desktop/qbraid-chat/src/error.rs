use common::ErrorLocation;

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur in Tauri commands.
///
/// These errors are converted to strings for IPC, but we maintain
/// structured error information and location tracking internally.
/// Everything user-visible still goes through the status line; these
/// variants cover programming and wiring failures, not chat outcomes.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum AppError {
    /// Error from this app's own wiring (logger, setup, paths)
    #[error("App Error: {message} {location}")]
    App {
        message: String,
        location: ErrorLocation,
    },

    /// The session state actor could not be reached
    #[error("State Error: {message} {location}")]
    State {
        message: String,
        location: ErrorLocation,
    },

    /// A chat command arrived with no stored credential
    #[error("No Credential Error: {message} {location}")]
    NoCredential {
        message: String,
        location: ErrorLocation,
    },
}
