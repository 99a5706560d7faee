//! A single prompt/response exchange in the transcript.

use std::fmt;

use serde::Serialize;

/// One completed chat exchange.
///
/// Turns are append-only: once a turn enters the transcript it is never
/// edited or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatTurn {
    /// What the user typed.
    pub prompt: String,
    /// The assistant's response content.
    pub content: String,
}

impl ChatTurn {
    pub fn new(prompt: String, content: String) -> Self {
        Self { prompt, content }
    }
}

/// Plain-text rendering used by the scrollback view.
impl fmt::Display for ChatTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "You: {}", self.prompt)?;
        writeln!(f, "Assistant: {}", self.content)
    }
}
