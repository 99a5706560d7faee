use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised when something tries to serialize a [`crate::RedactedApiKey`].
///
/// Session snapshots are serialized across the IPC boundary; refusing key
/// serialization turns an accidental leak into an immediate error.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Serialization Error: {message} {location}")]
    Serialization {
        message: String,
        location: ErrorLocation,
    },
}
