mod logger;
mod session;

use chat_core::qbraid_client::QbraidClient;
use qbraid_chat::state::AppState;
use wiremock::MockServer;

pub(crate) const TEST_KEY: &str = "abcdefghij0123456789abcdefghij";

/// Build a session pointed at a wiremock server, mirroring the production
/// base URL layout.
pub(crate) fn state_for(server: &MockServer) -> AppState {
    let client = QbraidClient::new(&format!("{}/api/", server.uri()))
        .expect("mock server uri is a valid base url");
    AppState::new(client)
}
