use crate::{client_for, test_key, TEST_KEY};

use chat_core::qbraid_client::MISSING_CONTENT_PLACEHOLDER;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Public API tests for QbraidClient::send_chat against a mock server
// ============================================================================

/// **VALUE**: Verifies the exact chat request wire format and response pairing.
///
/// **WHY THIS MATTERS**: The body contract is precisely `{"prompt": ...}` with
/// the credential in the `api-key` header - the model selection is not sent.
/// The body_json matcher fails the test if any extra field sneaks in.
///
/// **BUG THIS CATCHES**: Would catch someone "fixing" the known gap by adding
/// the model to the body, silently changing the wire contract.
#[tokio::test]
async fn given_200_content_when_sending_chat_then_turn_pairs_prompt_and_content() {
    // GIVEN: A server expecting the exact body
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(header("api-key", TEST_KEY))
        .and(body_json(json!({"prompt": "hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": "hi there"})))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Sending the prompt
    let response = client_for(&server)
        .send_chat(&test_key(), "hello")
        .await
        .unwrap();

    // THEN: The turn pairs the prompt with the returned content
    let turn = response.into_turn(String::from("hello"));
    assert_eq!(turn.prompt, "hello");
    assert_eq!(turn.content, "hi there");
}

/// **VALUE**: Verifies a response object without `content` yields the placeholder.
///
/// **WHY THIS MATTERS**: Known server edge case - the transcript shows a fixed
/// placeholder instead of raising when `content` is absent.
#[tokio::test]
async fn given_200_missing_content_when_sending_chat_then_placeholder_in_turn() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"model": "model-a"})))
        .mount(&server)
        .await;

    let response = client_for(&server)
        .send_chat(&test_key(), "hello")
        .await
        .unwrap();

    assert_eq!(response.content_or_placeholder(), MISSING_CONTENT_PLACEHOLDER);
}

/// **VALUE**: Verifies a non-success chat response surfaces the body text.
///
/// **BUG THIS CATCHES**: Would catch the error text being swallowed; the
/// status line must show the server's words on a failed send.
#[tokio::test]
async fn given_500_when_sending_chat_then_server_error_carries_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model backend unavailable"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .send_chat(&test_key(), "hello")
        .await
        .unwrap_err();

    assert_eq!(error.surface_text(), "model backend unavailable");
    assert!(error.status_code().unwrap().is_server_error());
}
