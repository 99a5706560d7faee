// Prevents additional console window on Windows in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use qbraid_chat::commands;
use qbraid_chat::error::AppError;
use qbraid_chat::log_config::LogConfig;
use qbraid_chat::logger::{initialize as LoggerInitialize, log_shutdown};
use qbraid_chat::state::AppState;

use chat_core::QBRAID_API_BASE_URL;
use chat_core::qbraid_client::QbraidClient;

use common::ErrorLocation;

use std::fs::create_dir_all;
use std::panic::Location;

use log::info;
use tauri::Manager;

fn main() {
    tauri::Builder::default()
        .invoke_handler(tauri::generate_handler![
            commands::chat::validate_api_key,
            commands::chat::send_prompt,
            commands::chat::select_model,
            commands::chat::get_session,
            commands::log_file::get_log_file,
        ])
        .setup(|app| {
            // Get app data directory for logs
            let log_dir = app.path().app_log_dir().map_err(|e| AppError::App {
                message: format!("Failed to get log directory: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;

            // Ensure log directory exists
            create_dir_all(&log_dir).map_err(|e| AppError::App {
                message: format!("Failed to create log directory: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            // Initialize logger FIRST
            let log_path = LoggerInitialize(&log_dir)?;

            info!("qBraid Chat application starting");
            info!("Log file: {}", log_path.display());

            let client = QbraidClient::new(QBRAID_API_BASE_URL).map_err(|e| AppError::App {
                message: format!("Failed to build API client: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;

            // Session state lives behind the actor; commands reach it via manage()
            app.manage(AppState::new(client));

            // Log path for the frontend label
            app.manage(LogConfig::new(log_path));

            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|_app_handle, event| {
            if let tauri::RunEvent::Exit = event {
                log_shutdown();
            }
        });
}
