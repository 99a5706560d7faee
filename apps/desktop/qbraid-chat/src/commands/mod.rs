pub mod chat;
pub mod log_file;
