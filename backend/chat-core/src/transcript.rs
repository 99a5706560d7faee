//! The append-only record of completed chat exchanges.

use common::ChatTurn;

/// Ordered, append-only sequence of chat turns.
///
/// A turn is appended only after a successful exchange; failed sends never
/// reach the transcript.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<ChatTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// Render the whole transcript as plain scrollback text.
    pub fn render_text(&self) -> String {
        let mut text = String::new();
        for turn in &self.turns {
            text.push_str(&turn.to_string());
        }
        text
    }
}
