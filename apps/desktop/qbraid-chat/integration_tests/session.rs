use crate::{TEST_KEY, state_for};

use qbraid_chat::commands::chat::{
    apply_model_selection, submit_prompt_input, validate_key_input,
};
use qbraid_chat::error::AppError;
use qbraid_chat::state::{
    SessionPhase, STATUS_EMPTY_PROMPT, STATUS_INVALID_KEY, STATUS_KEY_VALIDATED,
    STATUS_REQUEST_IN_FLIGHT, STATUS_RESPONSE_RECEIVED,
};

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// End-to-end session tests: keystroke → gate → fetch → chat → transcript,
// with the network mocked at the HTTP boundary
// ============================================================================

async fn mount_models(server: &MockServer, models: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/chat/models"))
        .and(header("api-key", TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(models))
        .mount(server)
        .await;
}

/// **VALUE**: Verifies malformed keys never reach the network and leave the
/// chat hidden with the fixed invalid-format status.
///
/// **WHY THIS MATTERS**: The gate runs on every keystroke; all but the last
/// keystroke of a typed key is malformed. Each one must be a silent local
/// transition, not a doomed network call.
///
/// **BUG THIS CATCHES**: Would catch the gate firing a fetch for a
/// wrong-length or wrong-alphabet key - the `expect(0)` fails the test on
/// any request.
#[tokio::test]
async fn given_malformed_keys_when_validated_then_no_fetch_and_chat_hidden() {
    // GIVEN: A server that must see no traffic
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    let state = state_for(&server);

    // WHEN: Several malformed keys arrive
    for raw in ["", "short", "ABCDEFGHIJ0123456789ABCDEFGHIJ", &TEST_KEY[..29]] {
        let snapshot = validate_key_input(&state, raw).await.unwrap();

        // THEN: Chat hidden, fixed status, no phase progress
        assert_eq!(snapshot.phase, SessionPhase::AwaitingKey);
        assert!(!snapshot.chat_visible);
        assert_eq!(snapshot.status, STATUS_INVALID_KEY);
    }
}

/// **VALUE**: Verifies the full happy path for a valid key: exactly one
/// fetch, both models in the selector, first preselected, chat revealed.
///
/// **BUG THIS CATCHES**: Would catch a double-fired fetch per keystroke
/// (`expect(1)`), a dropped model, or a missing default selection.
#[tokio::test]
async fn given_valid_key_when_validated_then_models_populated_and_chat_visible() {
    // GIVEN: A server answering the models endpoint once
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/models"))
        .and(header("api-key", TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["model-a", "model-b"])))
        .expect(1)
        .mount(&server)
        .await;
    let state = state_for(&server);

    // WHEN: One valid-key keystroke event
    let snapshot = validate_key_input(&state, TEST_KEY).await.unwrap();

    // THEN: Ready, revealed, populated, defaulted
    assert_eq!(snapshot.phase, SessionPhase::Ready);
    assert!(snapshot.chat_visible);
    assert_eq!(snapshot.models, vec!["model-a", "model-b"]);
    assert_eq!(snapshot.selected_model.as_deref(), Some("model-a"));
    assert_eq!(snapshot.status, STATUS_KEY_VALIDATED);
}

/// **VALUE**: Verifies a 403 leaves the chat hidden with the response body as
/// the status text, exactly.
///
/// **WHY THIS MATTERS**: The user must see the server's own
/// words, with no prefix or rewording.
#[tokio::test]
async fn given_403_when_validating_key_then_chat_hidden_and_status_is_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/models"))
        .respond_with(ResponseTemplate::new(403).set_body_string("Invalid API key"))
        .mount(&server)
        .await;
    let state = state_for(&server);

    let snapshot = validate_key_input(&state, TEST_KEY).await.unwrap();

    assert_eq!(snapshot.phase, SessionPhase::AwaitingKey);
    assert!(!snapshot.chat_visible);
    assert_eq!(snapshot.status, "Invalid API key");
}

/// **VALUE**: Verifies a successful exchange appends both transcript lines
/// and consumes the prompt.
///
/// **WHY THIS MATTERS**: This is the one path that clears the prompt entry;
/// the transcript lines are the app's whole visible output.
///
/// **BUG THIS CATCHES**: Would catch the turn not reaching the transcript,
/// wrong line format, or the consumed flag being false on success.
#[tokio::test]
async fn given_successful_exchange_then_transcript_gains_lines_and_prompt_consumed() {
    // GIVEN: A ready session
    let server = MockServer::start().await;
    mount_models(&server, json!(["model-a"])).await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(header("api-key", TEST_KEY))
        .and(body_json(json!({"prompt": "hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": "hi there"})))
        .expect(1)
        .mount(&server)
        .await;
    let state = state_for(&server);
    validate_key_input(&state, TEST_KEY).await.unwrap();

    // WHEN: Submitting a prompt (with surrounding whitespace)
    let outcome = submit_prompt_input(&state, "  hello  ").await.unwrap();

    // THEN: Transcript holds both lines, prompt consumed, session Ready
    assert!(outcome.prompt_consumed);
    assert_eq!(outcome.snapshot.phase, SessionPhase::Ready);
    assert_eq!(outcome.snapshot.turn_count, 1);
    assert_eq!(
        outcome.snapshot.transcript_text,
        "You: hello\nAssistant: hi there\n"
    );
    assert_eq!(outcome.snapshot.status, STATUS_RESPONSE_RECEIVED);
}

/// **VALUE**: Verifies a response without `content` renders the fixed
/// placeholder instead of raising.
#[tokio::test]
async fn given_response_missing_content_then_placeholder_in_transcript() {
    let server = MockServer::start().await;
    mount_models(&server, json!(["model-a"])).await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"model": "model-a"})))
        .mount(&server)
        .await;
    let state = state_for(&server);
    validate_key_input(&state, TEST_KEY).await.unwrap();

    let outcome = submit_prompt_input(&state, "hello").await.unwrap();

    assert!(outcome.prompt_consumed);
    assert_eq!(
        outcome.snapshot.transcript_text,
        "You: hello\nAssistant: No response content available.\n"
    );
}

/// **VALUE**: Verifies empty and whitespace-only prompts never reach the
/// network and set the fixed enter-a-prompt status.
///
/// **BUG THIS CATCHES**: Would catch presence validation happening after the
/// request is built - `expect(0)` fails on any POST.
#[tokio::test]
async fn given_blank_prompts_then_no_network_call_and_fixed_status() {
    let server = MockServer::start().await;
    mount_models(&server, json!(["model-a"])).await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": "hi"})))
        .expect(0)
        .mount(&server)
        .await;
    let state = state_for(&server);
    validate_key_input(&state, TEST_KEY).await.unwrap();

    for raw in ["", "   ", "\t\n"] {
        let outcome = submit_prompt_input(&state, raw).await.unwrap();

        assert!(!outcome.prompt_consumed);
        assert_eq!(outcome.snapshot.status, STATUS_EMPTY_PROMPT);
        assert_eq!(outcome.snapshot.turn_count, 0);
    }
}

/// **VALUE**: Verifies a failed send keeps the session Ready, keeps the
/// prompt, and keeps the transcript untouched.
///
/// **WHY THIS MATTERS**: Send failure must not bounce the user back to the
/// key screen, and the typed prompt must survive so it
/// can be retried by hand.
#[tokio::test]
async fn given_failed_send_then_ready_with_error_status_and_prompt_kept() {
    let server = MockServer::start().await;
    mount_models(&server, json!(["model-a"])).await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model backend unavailable"))
        .mount(&server)
        .await;
    let state = state_for(&server);
    validate_key_input(&state, TEST_KEY).await.unwrap();

    let outcome = submit_prompt_input(&state, "hello").await.unwrap();

    assert!(!outcome.prompt_consumed, "Failed send must keep the prompt");
    assert_eq!(outcome.snapshot.phase, SessionPhase::Ready);
    assert!(outcome.snapshot.chat_visible);
    assert_eq!(outcome.snapshot.turn_count, 0);
    assert_eq!(outcome.snapshot.status, "model backend unavailable");
}

/// **VALUE**: Verifies a prompt without a stored credential is a structured
/// error, not a panic or a keyless request.
#[tokio::test]
async fn given_no_credential_when_submitting_prompt_then_no_credential_error() {
    let server = MockServer::start().await;
    let state = state_for(&server);

    let result = submit_prompt_input(&state, "hello").await;

    assert!(matches!(result, Err(AppError::NoCredential { .. })));
}

/// **VALUE**: Verifies a key rejection arriving mid-fetch wins over the
/// stale model list: the chat stays hidden and the session keyless.
///
/// **WHY THIS MATTERS**: The gate runs per keystroke, so a backspace right
/// after pasting a valid key rejects the key while the model fetch is still
/// on the wire. If the stale fetch result were applied anyway, the chat
/// would be revealed with a success status but no stored credential, and
/// the next prompt would fail with a credential error.
///
/// **BUG THIS CATCHES**: Would catch the fetched-models transition being
/// applied without checking that the credential it was fetched for is still
/// the session's credential.
#[tokio::test]
async fn given_key_rejected_mid_fetch_then_chat_stays_hidden() {
    // GIVEN: A models endpoint slow enough to straddle two keystrokes
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/chat/models"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!(["model-a"]))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(1)
        .mount(&server)
        .await;
    let state = state_for(&server);

    // WHEN: A valid key starts a fetch, then a backspace rejects the key
    let first_state = state.clone();
    let first = tokio::spawn(async move { validate_key_input(&first_state, TEST_KEY).await });
    tokio::time::sleep(Duration::from_millis(150)).await;

    let rejection = validate_key_input(&state, &TEST_KEY[..29]).await.unwrap();
    assert_eq!(rejection.phase, SessionPhase::AwaitingKey);

    // THEN: The stale fetch result changes nothing once it lands
    let stale = first.await.unwrap().unwrap();
    assert_eq!(stale.phase, SessionPhase::AwaitingKey);
    assert!(!stale.chat_visible);
    assert!(stale.models.is_empty());
    assert_eq!(stale.status, STATUS_INVALID_KEY);

    let snapshot = submit_prompt_input(&state, "hello").await;
    assert!(matches!(snapshot, Err(AppError::NoCredential { .. })));
}

/// **VALUE**: Verifies a second prompt submitted while one is in flight is
/// rejected without touching the network.
///
/// **WHY THIS MATTERS**: The original client let concurrent requests race for
/// the UI, last-write-wins. Reject-while-busy is the redesigned contract:
/// `expect(1)` proves the second submission never became a request.
///
/// **BUG THIS CATCHES**: Would catch the in-flight guard being released
/// before the exchange completes, or not consulted on the prompt path.
#[tokio::test]
async fn given_prompt_in_flight_when_second_submitted_then_rejected_while_busy() {
    // GIVEN: A slow chat endpoint that must see exactly one request
    let server = MockServer::start().await;
    mount_models(&server, json!(["model-a"])).await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"content": "hi there"}))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(1)
        .mount(&server)
        .await;
    let state = state_for(&server);
    validate_key_input(&state, TEST_KEY).await.unwrap();

    // WHEN: A first prompt is in flight and a second arrives
    let first_state = state.clone();
    let first = tokio::spawn(async move { submit_prompt_input(&first_state, "hello").await });
    tokio::time::sleep(Duration::from_millis(150)).await;

    let second = submit_prompt_input(&state, "again").await.unwrap();

    // THEN: The second is rejected, prompt kept, busy status shown
    assert!(!second.prompt_consumed);
    assert_eq!(second.snapshot.status, STATUS_REQUEST_IN_FLIGHT);

    // AND: The first completes normally
    let first = first.await.unwrap().unwrap();
    assert!(first.prompt_consumed);
    assert_eq!(first.snapshot.turn_count, 1);
}

/// **VALUE**: Verifies the dropdown selection is recorded but the wire body
/// still carries only the prompt.
///
/// **WHY THIS MATTERS**: The model selection is deliberately not transmitted;
/// the body matcher pins that contract while the snapshot proves the
/// selection was stored.
#[tokio::test]
async fn given_model_selection_then_stored_but_not_sent() {
    let server = MockServer::start().await;
    mount_models(&server, json!(["model-a", "model-b"])).await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_json(json!({"prompt": "hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"content": "hi"})))
        .expect(1)
        .mount(&server)
        .await;
    let state = state_for(&server);
    validate_key_input(&state, TEST_KEY).await.unwrap();

    // WHEN: Selecting the second model, then sending
    let snapshot = apply_model_selection(&state, "model-b").await.unwrap();
    assert_eq!(snapshot.selected_model.as_deref(), Some("model-b"));

    let outcome = submit_prompt_input(&state, "hello").await.unwrap();

    // THEN: The exchange succeeded with the body the matcher pinned
    assert!(outcome.prompt_consumed);
    assert_eq!(outcome.snapshot.selected_model.as_deref(), Some("model-b"));
}
