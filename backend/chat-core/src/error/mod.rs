pub mod credential;
pub mod qbraid_client;

pub use credential::KeyValidationFailure;
pub use qbraid_client::ChatClientError;
