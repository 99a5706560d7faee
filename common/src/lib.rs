//! Domain models for the qBraid Chat desktop client.
//!
//! This crate contains pure data structures representing the core
//! concepts in our application. Models have no business logic - they're
//! just data that can be passed between layers.
//!
//! ## Architecture
//!
//! - **common** (this crate): Pure data structures
//! - **chat-core**: Business logic operating on models
//! - **qbraid-chat**: Application wiring everything together
//!
//! This layered architecture keeps concerns separated and makes testing easier.

pub mod chat_turn;
pub mod error;
pub mod http_status;
pub mod redacted_key;

pub use chat_turn::ChatTurn;
pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_key::RedactedApiKey;

#[cfg(test)]
mod tests;
