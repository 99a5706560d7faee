use chat_core::qbraid_client::QbraidClient;
use chat_core::transcript::Transcript;

use common::{ChatTurn, RedactedApiKey};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{info, warn};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock, mpsc, oneshot};

/// Status line text for each fixed state transition.
///
/// Error transitions carry the server's own words instead of a constant.
pub const STATUS_KEY_VALIDATED: &str = "API Key validated successfully!";
pub const STATUS_INVALID_KEY: &str = "Invalid API key format. Must be 30 characters.";
pub const STATUS_SENDING: &str = "Sending request...";
pub const STATUS_RESPONSE_RECEIVED: &str = "Response received!";
pub const STATUS_EMPTY_PROMPT: &str = "Please enter a prompt.";
pub const STATUS_REQUEST_IN_FLIGHT: &str = "A request is already in progress.";

/// Where the session currently is in its lifecycle.
///
/// `AwaitingKey → FetchingModels → Ready ⇄ Sending`. A failed model fetch
/// drops back to `AwaitingKey`; a failed send stays in `Ready`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    AwaitingKey,
    FetchingModels,
    Ready,
    Sending,
}

impl SessionPhase {
    /// The chat interface is shown only once models have been fetched.
    pub fn chat_visible(&self) -> bool {
        matches!(self, SessionPhase::Ready | SessionPhase::Sending)
    }
}

impl Default for SessionPhase {
    fn default() -> Self {
        SessionPhase::AwaitingKey
    }
}

/// Commands that mutate session state.
///
/// All state mutations go through the state actor via these commands.
/// This ensures serialized access and prevents race conditions.
#[derive(Debug, Clone)]
pub enum StateCommand {
    /// A well-formed key was entered; hold it and move to FetchingModels
    KeyAccepted(RedactedApiKey),

    /// A malformed key was entered; hide the chat interface
    KeyRejected,

    /// Model list arrived; reveal the chat interface
    ModelsFetched(Vec<String>),

    /// Model fetch failed; hide the chat interface and show the reason
    ModelsFetchFailed { status: String },

    /// The user picked a model in the dropdown
    ModelSelected(String),

    /// A chat request is leaving
    SendStarted,

    /// A chat exchange completed; append it to the transcript
    TurnCompleted(ChatTurn),

    /// A chat request failed; stay Ready and show the reason
    SendFailed { status: String },

    /// Overwrite the status line without a phase change
    StatusOnly(String),
}

/// Everything the session knows. Owned exclusively by the state actor.
#[derive(Debug, Default)]
struct SessionState {
    phase: SessionPhase,
    credential: Option<RedactedApiKey>,
    models: Vec<String>,
    selected_model: Option<String>,
    transcript: Transcript,
    status: String,
}

/// Read-only view of the session, serialized across IPC for rendering.
///
/// The credential is deliberately absent: snapshots cross into the
/// frontend, and the key never does.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub chat_visible: bool,
    pub models: Vec<String>,
    pub selected_model: Option<String>,
    pub transcript_text: String,
    pub turn_count: usize,
    pub status: String,
}

/// A command plus the ack the actor fires once it has been applied.
///
/// The ack gives callers read-your-writes: a snapshot taken after
/// `update()` returns always reflects the command.
type SequencedCommand = (StateCommand, oneshot::Sender<()>);

/// Session state manager.
///
/// Uses an actor pattern to ensure all state mutations are serialized.
/// Commands send StateCommand messages which are processed sequentially
/// by a dedicated task.
#[derive(Clone)]
pub struct AppState {
    /// Channel to send state mutation commands to the actor
    command_tx: Arc<Mutex<Option<mpsc::Sender<SequencedCommand>>>>,

    /// Shared read access to the session
    session: Arc<RwLock<SessionState>>,

    /// Track if actor has been initialized
    actor_init: Arc<Mutex<bool>>,

    /// Single in-flight network request guard (reject-while-busy)
    in_flight: Arc<AtomicBool>,

    /// HTTP client for the qBraid API
    client: QbraidClient,
}

/// RAII token for the single in-flight network request.
///
/// Released on drop, including on error and panic unwinds, so a failed
/// request can never wedge the session in a busy state.
pub struct InFlightGuard {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl AppState {
    /// Create a new state manager around the given API client.
    ///
    /// The actor will be lazily spawned on first use within an async context.
    pub fn new(client: QbraidClient) -> Self {
        Self {
            command_tx: Arc::new(Mutex::new(None)),
            session: Arc::new(RwLock::new(SessionState::default())),
            actor_init: Arc::new(Mutex::new(false)),
            in_flight: Arc::new(AtomicBool::new(false)),
            client,
        }
    }

    pub fn client(&self) -> &QbraidClient {
        &self.client
    }

    /// Claim the single in-flight request slot.
    ///
    /// Returns `None` when another network request is already running;
    /// the caller must reject the action instead of racing it.
    pub fn try_begin_request(&self) -> Option<InFlightGuard> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            Some(InFlightGuard {
                flag: Arc::clone(&self.in_flight),
            })
        } else {
            None
        }
    }

    /// Send a state update command and wait until the actor has applied it.
    ///
    /// Returns an error if the state actor has died (should never happen).
    pub async fn update(&self, cmd: StateCommand) -> Result<(), String> {
        self.ensure_actor().await;

        let (ack_tx, ack_rx) = oneshot::channel();

        {
            let tx_guard = self.command_tx.lock().await;
            let tx = tx_guard.as_ref().ok_or("Actor not initialized")?;
            tx.send((cmd, ack_tx))
                .await
                .map_err(|e| format!("State actor died: {}", e))?;
        }

        ack_rx
            .await
            .map_err(|e| format!("State actor dropped the command: {}", e))
    }

    /// Get the stored credential, if a valid key has been accepted.
    pub async fn credential(&self) -> Option<RedactedApiKey> {
        self.session.read().await.credential.clone()
    }

    /// Read-only snapshot of the whole session for rendering.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let session = self.session.read().await;
        SessionSnapshot {
            phase: session.phase,
            chat_visible: session.phase.chat_visible(),
            models: session.models.clone(),
            selected_model: session.selected_model.clone(),
            transcript_text: session.transcript.render_text(),
            turn_count: session.transcript.len(),
            status: session.status.clone(),
        }
    }

    /// Ensure actor is spawned (called lazily from async context)
    async fn ensure_actor(&self) {
        let mut init_guard = self.actor_init.lock().await;
        if !*init_guard {
            let (tx, rx) = mpsc::channel(100);
            let session_clone = Arc::clone(&self.session);

            // Store tx BEFORE spawning to avoid race
            let mut tx_guard = self.command_tx.lock().await;
            *tx_guard = Some(tx);
            drop(tx_guard);

            tokio::spawn(state_actor(rx, session_clone));
            *init_guard = true;
            info!("State actor spawned");
        }
    }
}

/// The state actor task.
///
/// Owns the mutable session and processes commands sequentially. This
/// ensures that all state mutations are serialized and prevents race
/// conditions between concurrent operations - the replacement for the
/// original client's unguarded cross-thread widget writes.
async fn state_actor(
    mut command_rx: mpsc::Receiver<SequencedCommand>,
    session: Arc<RwLock<SessionState>>,
) {
    info!("State actor started");

    while let Some((cmd, ack)) = command_rx.recv().await {
        let mut session = session.write().await;

        match cmd {
            StateCommand::KeyAccepted(key) => {
                info!("API key accepted ({} chars), fetching models", key.len());
                session.credential = Some(key);
                session.phase = SessionPhase::FetchingModels;
                // Accepting a key hides any previous error state
                session.status = String::new();
            }
            StateCommand::KeyRejected => {
                session.credential = None;
                session.phase = SessionPhase::AwaitingKey;
                session.status = String::from(STATUS_INVALID_KEY);
            }
            StateCommand::ModelsFetched(models) => {
                // The key may have been rejected while the fetch was in
                // flight; a result for a discarded credential must not win
                if session.credential.is_none() {
                    warn!("Discarding fetched model list: key rejected mid-fetch");
                } else {
                    info!("Model list replaced: {} models", models.len());
                    session.selected_model = models.first().cloned();
                    session.models = models;
                    session.phase = SessionPhase::Ready;
                    session.status = String::from(STATUS_KEY_VALIDATED);
                }
            }
            StateCommand::ModelsFetchFailed { status } => {
                if session.credential.is_none() {
                    warn!("Discarding model fetch failure: key rejected mid-fetch");
                } else {
                    session.credential = None;
                    session.phase = SessionPhase::AwaitingKey;
                    session.status = status;
                }
            }
            StateCommand::ModelSelected(model) => {
                if session.models.contains(&model) {
                    session.selected_model = Some(model);
                } else {
                    warn!("Ignoring selection of unknown model '{model}'");
                }
            }
            StateCommand::SendStarted => {
                session.phase = SessionPhase::Sending;
                session.status = String::from(STATUS_SENDING);
            }
            StateCommand::TurnCompleted(turn) => {
                if session.credential.is_none() {
                    warn!("Discarding completed turn: key rejected mid-send");
                } else {
                    session.transcript.append(turn);
                    session.phase = SessionPhase::Ready;
                    session.status = String::from(STATUS_RESPONSE_RECEIVED);
                }
            }
            StateCommand::SendFailed { status } => {
                if session.credential.is_none() {
                    warn!("Discarding send failure: key rejected mid-send");
                } else {
                    session.phase = SessionPhase::Ready;
                    session.status = status;
                }
            }
            StateCommand::StatusOnly(status) => {
                session.status = status;
            }
        }

        drop(session);
        // Caller may have given up waiting; a dead ack receiver is fine
        let _ = ack.send(());
    }

    warn!("State actor stopped - this should not happen during normal operation");
}
