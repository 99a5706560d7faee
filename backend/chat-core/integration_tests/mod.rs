mod chat;
mod models;

use chat_core::qbraid_client::QbraidClient;
use common::RedactedApiKey;
use wiremock::MockServer;

pub(crate) const TEST_KEY: &str = "abcdefghij0123456789abcdefghij";

pub(crate) fn test_key() -> RedactedApiKey {
    RedactedApiKey::new(String::from(TEST_KEY))
}

/// Build a client pointed at a wiremock server, mirroring the production
/// base URL layout (`https://api.qbraid.com/api/`).
pub(crate) fn client_for(server: &MockServer) -> QbraidClient {
    QbraidClient::new(&format!("{}/api/", server.uri()))
        .expect("mock server uri is a valid base url")
}
