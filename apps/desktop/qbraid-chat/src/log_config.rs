use std::path::{Path, PathBuf};

/// This run's log file location, managed by Tauri so the frontend can
/// show it in the log-path label.
#[derive(Clone)]
pub struct LogConfig {
    file_path: PathBuf,
}

impl LogConfig {
    pub fn new(file_path: PathBuf) -> Self {
        Self { file_path }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}
