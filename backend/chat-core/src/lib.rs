pub mod credential;
pub mod error;
pub mod qbraid_client;
pub mod transcript;

#[cfg(test)]
mod tests;

pub const QBRAID_API_HOSTNAME: &str = "api.qbraid.com";
pub const QBRAID_API_BASE_URL: &str =
    const_format::concatcp!("https://", QBRAID_API_HOSTNAME, "/api/");
