use crate::error::AppError;
use crate::state::{
    AppState, SessionSnapshot, STATUS_EMPTY_PROMPT, STATUS_REQUEST_IN_FLIGHT, StateCommand,
};

use chat_core::credential::{self, ValidationResult};

use common::ErrorLocation;

use std::panic::Location;

use log::{debug, error, info, warn};
use serde::Serialize;
use tauri::{State, command as TauriCommand};

/// What a prompt submission produced.
///
/// `prompt_consumed` tells the frontend whether to clear the prompt entry:
/// only a successful exchange clears it.
#[derive(Debug, Clone, Serialize)]
pub struct PromptOutcome {
    pub snapshot: SessionSnapshot,
    pub prompt_consumed: bool,
}

#[track_caller]
fn state_error(message: String) -> AppError {
    AppError::State {
        message,
        location: ErrorLocation::from(Location::caller()),
    }
}

/// Run the credential gate on one keystroke's worth of key text, and on
/// acceptance fetch the model list.
///
/// Rejection is silent by design: the gate hides the chat interface and
/// overwrites the status line, but never returns an error - a half-typed
/// key is not a failure.
pub async fn validate_key_input(
    state: &AppState,
    raw_key: &str,
) -> Result<SessionSnapshot, AppError> {
    debug!("Validating API key");

    let key = match credential::validate(raw_key) {
        ValidationResult::Valid(key) => key,
        ValidationResult::Invalid(reason) => {
            warn!("Invalid API key format: {reason}");
            state
                .update(StateCommand::KeyRejected)
                .await
                .map_err(state_error)?;
            return Ok(state.snapshot().await);
        }
    };

    info!("API key validation successful");

    // Reject-while-busy: if a request is already in flight, this
    // keystroke does not start a second one. The running fetch's result
    // will land through the state actor.
    let Some(guard) = state.try_begin_request() else {
        debug!("Model fetch already in flight, keystroke ignored");
        return Ok(state.snapshot().await);
    };

    state
        .update(StateCommand::KeyAccepted(key.clone()))
        .await
        .map_err(state_error)?;

    info!("Fetching available models");
    let fetch_result = state.client().list_models(&key).await;

    match fetch_result {
        Ok(models) => {
            info!("Successfully fetched {} models", models.len());
            state
                .update(StateCommand::ModelsFetched(models))
                .await
                .map_err(state_error)?;
        }
        Err(e) => {
            if e.status_code().is_some_and(|code| code.is_client_error()) {
                warn!("Error fetching models: {e}");
            } else {
                error!("Error fetching models: {e}");
            }
            state
                .update(StateCommand::ModelsFetchFailed {
                    status: e.surface_text().to_owned(),
                })
                .await
                .map_err(state_error)?;
        }
    }

    // Free the in-flight slot only after the result has landed in state
    drop(guard);

    Ok(state.snapshot().await)
}

/// Submit one chat prompt and, on success, append the exchange to the
/// transcript.
///
/// An empty or whitespace-only prompt never reaches the network; a prompt
/// submitted while another request is in flight is rejected and the entry
/// field is left untouched.
pub async fn submit_prompt_input(
    state: &AppState,
    raw_prompt: &str,
) -> Result<PromptOutcome, AppError> {
    let prompt = raw_prompt.trim();

    if prompt.is_empty() {
        warn!("Empty prompt submitted");
        state
            .update(StateCommand::StatusOnly(String::from(STATUS_EMPTY_PROMPT)))
            .await
            .map_err(state_error)?;
        return Ok(PromptOutcome {
            snapshot: state.snapshot().await,
            prompt_consumed: false,
        });
    }

    let key = state.credential().await.ok_or_else(|| {
        warn!("Prompt submitted but no credential stored");
        AppError::NoCredential {
            message: String::from("Enter a valid API key before sending prompts"),
            location: ErrorLocation::from(Location::caller()),
        }
    })?;

    let Some(guard) = state.try_begin_request() else {
        warn!("Prompt rejected: a request is already in flight");
        state
            .update(StateCommand::StatusOnly(String::from(
                STATUS_REQUEST_IN_FLIGHT,
            )))
            .await
            .map_err(state_error)?;
        return Ok(PromptOutcome {
            snapshot: state.snapshot().await,
            prompt_consumed: false,
        });
    };

    info!("Sending chat request");
    state
        .update(StateCommand::SendStarted)
        .await
        .map_err(state_error)?;

    let send_result = state.client().send_chat(&key, prompt).await;

    let prompt_consumed = match send_result {
        Ok(response) => {
            info!("Successfully received chat response");
            state
                .update(StateCommand::TurnCompleted(
                    response.into_turn(prompt.to_owned()),
                ))
                .await
                .map_err(state_error)?;
            true
        }
        Err(e) => {
            if e.status_code().is_some_and(|code| code.is_client_error()) {
                warn!("Error in chat request: {e}");
            } else {
                error!("Error in chat request: {e}");
            }
            state
                .update(StateCommand::SendFailed {
                    status: e.surface_text().to_owned(),
                })
                .await
                .map_err(state_error)?;
            false
        }
    };

    drop(guard);

    Ok(PromptOutcome {
        snapshot: state.snapshot().await,
        prompt_consumed,
    })
}

/// Record the dropdown selection.
///
/// The selection is session state only: the chat request body does not
/// carry it.
pub async fn apply_model_selection(
    state: &AppState,
    model: &str,
) -> Result<SessionSnapshot, AppError> {
    debug!("Model selected: {model}");
    state
        .update(StateCommand::ModelSelected(model.to_owned()))
        .await
        .map_err(state_error)?;
    Ok(state.snapshot().await)
}

/// Validate the key-entry field contents (invoked on every keystroke).
#[TauriCommand]
pub async fn validate_api_key(
    state: State<'_, AppState>,
    key: String,
) -> Result<SessionSnapshot, AppError> {
    validate_key_input(state.inner(), &key).await
}

/// Submit the prompt-entry field contents.
#[TauriCommand]
pub async fn send_prompt(
    state: State<'_, AppState>,
    prompt: String,
) -> Result<PromptOutcome, AppError> {
    submit_prompt_input(state.inner(), &prompt).await
}

/// Record a dropdown model selection.
#[TauriCommand]
pub async fn select_model(
    state: State<'_, AppState>,
    model: String,
) -> Result<SessionSnapshot, AppError> {
    apply_model_selection(state.inner(), &model).await
}

/// Read-only session snapshot for initial render.
#[TauriCommand]
pub async fn get_session(state: State<'_, AppState>) -> Result<SessionSnapshot, AppError> {
    Ok(state.snapshot().await)
}
