// Unit tests for the session state actor
// Tests the phase machine and the single in-flight request guard

use crate::state::{
    AppState, SessionPhase, STATUS_INVALID_KEY, STATUS_KEY_VALIDATED, StateCommand,
};

use chat_core::QBRAID_API_BASE_URL;
use chat_core::qbraid_client::QbraidClient;

use common::{ChatTurn, RedactedApiKey};

fn test_state() -> AppState {
    let client = QbraidClient::new(QBRAID_API_BASE_URL).expect("production base url is valid");
    AppState::new(client)
}

fn test_key() -> RedactedApiKey {
    RedactedApiKey::new(String::from("abcdefghij0123456789abcdefghij"))
}

/// **VALUE**: Verifies the initial session: awaiting a key, chat hidden.
///
/// **BUG THIS CATCHES**: Would catch a Default that starts the session in a
/// later phase, exposing the chat interface before any key is validated.
#[tokio::test]
async fn given_fresh_state_when_snapshotted_then_awaiting_key_and_chat_hidden() {
    let state = test_state();

    let snapshot = state.snapshot().await;

    assert_eq!(snapshot.phase, SessionPhase::AwaitingKey);
    assert!(!snapshot.chat_visible);
    assert!(snapshot.models.is_empty());
    assert_eq!(snapshot.turn_count, 0);
    assert_eq!(snapshot.status, "");
}

/// **VALUE**: Verifies the accept → fetch → ready path, including the default
/// model selection.
///
/// **WHY THIS MATTERS**: This is the happy path: a valid key stores the
/// credential, a fetched list replaces the models wholesale, and the first
/// entry becomes the selection.
///
/// **BUG THIS CATCHES**: Would catch a lost credential, a merged (rather than
/// replaced) model list, or a missing default selection.
#[tokio::test]
async fn given_key_accepted_and_models_fetched_then_ready_with_default_selection() {
    let state = test_state();

    // WHEN: A key is accepted
    state
        .update(StateCommand::KeyAccepted(test_key()))
        .await
        .unwrap();

    // THEN: Fetching, credential stored, error state hidden
    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.phase, SessionPhase::FetchingModels);
    assert!(!snapshot.chat_visible);
    assert_eq!(snapshot.status, "");
    assert!(state.credential().await.is_some());

    // WHEN: The model list arrives
    state
        .update(StateCommand::ModelsFetched(vec![
            String::from("model-a"),
            String::from("model-b"),
        ]))
        .await
        .unwrap();

    // THEN: Ready, chat visible, first model preselected
    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.phase, SessionPhase::Ready);
    assert!(snapshot.chat_visible);
    assert_eq!(snapshot.models, vec!["model-a", "model-b"]);
    assert_eq!(snapshot.selected_model.as_deref(), Some("model-a"));
    assert_eq!(snapshot.status, STATUS_KEY_VALIDATED);
}

/// **VALUE**: Verifies a rejected key hides the chat and shows the fixed
/// invalid-format message.
#[tokio::test]
async fn given_key_rejected_then_chat_hidden_and_invalid_status() {
    let state = test_state();
    state
        .update(StateCommand::KeyAccepted(test_key()))
        .await
        .unwrap();

    state.update(StateCommand::KeyRejected).await.unwrap();

    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.phase, SessionPhase::AwaitingKey);
    assert!(!snapshot.chat_visible);
    assert_eq!(snapshot.status, STATUS_INVALID_KEY);
    assert!(state.credential().await.is_none());
}

/// **VALUE**: Verifies a failed fetch drops back to AwaitingKey with the
/// server's text, clearing the stored credential.
///
/// **BUG THIS CATCHES**: Would catch the session keeping a credential the
/// server just rejected, which would let prompts be sent with a dead key.
#[tokio::test]
async fn given_models_fetch_failed_then_back_to_awaiting_key_with_server_text() {
    let state = test_state();
    state
        .update(StateCommand::KeyAccepted(test_key()))
        .await
        .unwrap();

    state
        .update(StateCommand::ModelsFetchFailed {
            status: String::from("Invalid API key"),
        })
        .await
        .unwrap();

    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.phase, SessionPhase::AwaitingKey);
    assert!(!snapshot.chat_visible);
    assert_eq!(snapshot.status, "Invalid API key");
    assert!(state.credential().await.is_none());
}

/// **VALUE**: Verifies the Ready ⇄ Sending cycle and that only completed
/// turns grow the transcript.
///
/// **BUG THIS CATCHES**: Would catch failed sends reaching the transcript, or
/// a send failure knocking the session out of Ready.
#[tokio::test]
async fn given_send_cycle_then_transcript_grows_only_on_completion() {
    let state = test_state();
    state
        .update(StateCommand::KeyAccepted(test_key()))
        .await
        .unwrap();
    state
        .update(StateCommand::ModelsFetched(vec![String::from("model-a")]))
        .await
        .unwrap();

    // Failed send: still Ready, transcript untouched
    state.update(StateCommand::SendStarted).await.unwrap();
    state
        .update(StateCommand::SendFailed {
            status: String::from("model backend unavailable"),
        })
        .await
        .unwrap();

    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.phase, SessionPhase::Ready);
    assert!(snapshot.chat_visible, "Chat stays visible on send failure");
    assert_eq!(snapshot.turn_count, 0);
    assert_eq!(snapshot.status, "model backend unavailable");

    // Completed send: turn appended, status updated
    state.update(StateCommand::SendStarted).await.unwrap();
    state
        .update(StateCommand::TurnCompleted(ChatTurn::new(
            String::from("hello"),
            String::from("hi there"),
        )))
        .await
        .unwrap();

    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.phase, SessionPhase::Ready);
    assert_eq!(snapshot.turn_count, 1);
    assert_eq!(
        snapshot.transcript_text,
        "You: hello\nAssistant: hi there\n"
    );
}

/// **VALUE**: Verifies selections of unknown models are ignored.
///
/// **BUG THIS CATCHES**: Would catch the dropdown accepting stale identifiers
/// after the list was replaced wholesale by a new fetch.
#[tokio::test]
async fn given_unknown_model_selection_then_ignored() {
    let state = test_state();
    state
        .update(StateCommand::KeyAccepted(test_key()))
        .await
        .unwrap();
    state
        .update(StateCommand::ModelsFetched(vec![String::from("model-a")]))
        .await
        .unwrap();

    state
        .update(StateCommand::ModelSelected(String::from("model-z")))
        .await
        .unwrap();

    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.selected_model.as_deref(), Some("model-a"));
}

/// **VALUE**: Verifies a model list arriving after the key was rejected is
/// discarded instead of reviving the session.
///
/// **WHY THIS MATTERS**: The key field is live on every keystroke, so a
/// rejection can land while the fetch for an earlier valid key is still in
/// flight. The stale result must not win: a session whose credential was
/// just cleared has no business being Ready.
///
/// **BUG THIS CATCHES**: Would catch the fetched-models transition applying
/// unconditionally, which would reveal the chat interface with no stored
/// credential and a success status.
#[tokio::test]
async fn given_key_rejected_mid_fetch_then_stale_model_list_discarded() {
    let state = test_state();
    state
        .update(StateCommand::KeyAccepted(test_key()))
        .await
        .unwrap();

    // WHEN: The key is rejected before the fetch resolves
    state.update(StateCommand::KeyRejected).await.unwrap();
    state
        .update(StateCommand::ModelsFetched(vec![String::from("model-a")]))
        .await
        .unwrap();

    // THEN: The rejection stands; the stale list changed nothing
    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.phase, SessionPhase::AwaitingKey);
    assert!(!snapshot.chat_visible);
    assert!(snapshot.models.is_empty());
    assert_eq!(snapshot.status, STATUS_INVALID_KEY);
    assert!(state.credential().await.is_none());

    // AND: A stale fetch failure is discarded the same way
    state
        .update(StateCommand::ModelsFetchFailed {
            status: String::from("Invalid API key"),
        })
        .await
        .unwrap();
    assert_eq!(state.snapshot().await.status, STATUS_INVALID_KEY);
}

/// **VALUE**: Verifies send results arriving after the key was rejected are
/// discarded, in both the completed and failed variants.
///
/// **BUG THIS CATCHES**: Would catch a stale turn reaching the transcript or
/// a stale send failure flipping the keyless session back to Ready.
#[tokio::test]
async fn given_key_rejected_mid_send_then_stale_send_results_discarded() {
    let state = test_state();
    state
        .update(StateCommand::KeyAccepted(test_key()))
        .await
        .unwrap();
    state
        .update(StateCommand::ModelsFetched(vec![String::from("model-a")]))
        .await
        .unwrap();
    state.update(StateCommand::SendStarted).await.unwrap();

    // WHEN: The key is rejected while the send is in flight
    state.update(StateCommand::KeyRejected).await.unwrap();
    state
        .update(StateCommand::TurnCompleted(ChatTurn::new(
            String::from("hello"),
            String::from("hi there"),
        )))
        .await
        .unwrap();
    state
        .update(StateCommand::SendFailed {
            status: String::from("model backend unavailable"),
        })
        .await
        .unwrap();

    // THEN: Neither stale result moved the session
    let snapshot = state.snapshot().await;
    assert_eq!(snapshot.phase, SessionPhase::AwaitingKey);
    assert!(!snapshot.chat_visible);
    assert_eq!(snapshot.turn_count, 0);
    assert_eq!(snapshot.status, STATUS_INVALID_KEY);
}

/// **VALUE**: Verifies the in-flight guard admits exactly one request and
/// frees the slot on drop.
///
/// **WHY THIS MATTERS**: This guard is the whole fix for the original
/// client's racing fire-and-forget threads - two prompts in flight at once
/// must be impossible.
///
/// **BUG THIS CATCHES**: Would catch a guard that never releases (wedging the
/// session busy forever) or one that admits concurrent requests.
#[tokio::test]
async fn given_guard_held_then_second_request_rejected_until_drop() {
    let state = test_state();

    let guard = state.try_begin_request();
    assert!(guard.is_some(), "First request should claim the slot");
    assert!(
        state.try_begin_request().is_none(),
        "Second request must be rejected while the first is in flight"
    );

    drop(guard);

    assert!(
        state.try_begin_request().is_some(),
        "Slot should be free again after the guard drops"
    );
}
