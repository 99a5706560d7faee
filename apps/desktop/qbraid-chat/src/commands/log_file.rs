use crate::log_config::LogConfig;

use log::info;
use serde::Serialize;
use tauri::{State, command as TauriCommand};

#[derive(Debug, Clone, Serialize)]
pub struct LogFileResponse {
    pub path: String,
}

/// This run's log file path, for the log-path label under the transcript.
#[TauriCommand]
pub fn get_log_file(config: State<'_, LogConfig>) -> LogFileResponse {
    info!("Frontend requested log file path");

    LogFileResponse {
        path: config.file_path().display().to_string(),
    }
}
