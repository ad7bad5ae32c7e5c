//! Append-only conversation transcript
//!
//! Every widget session owns one [`Transcript`]. It starts with the bot's
//! welcome turn and only ever grows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Id of the seeded welcome turn
pub const WELCOME_TURN_ID: &str = "welcome";

/// Who authored a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
    /// Reserved; nothing in the widget produces system turns today.
    System,
}

/// One message in the conversation. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of turns
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    /// Create a transcript seeded with the bot's welcome turn
    pub fn seeded(welcome: &str) -> Self {
        Self {
            turns: vec![ConversationTurn {
                id: WELCOME_TURN_ID.to_string(),
                sender: Sender::Bot,
                text: welcome.to_string(),
                timestamp: Utc::now(),
            }],
        }
    }

    /// Build a turn stamped no earlier than the last one.
    ///
    /// Wall clocks can step backwards; the transcript's timestamps must not.
    pub fn next_turn(&self, sender: Sender, text: impl Into<String>) -> ConversationTurn {
        let now = Utc::now();
        let timestamp = self.last().map_or(now, |last| now.max(last.timestamp));
        ConversationTurn {
            id: uuid::Uuid::new_v4().to_string(),
            sender,
            text: text.into(),
            timestamp,
        }
    }

    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn last(&self) -> Option<&ConversationTurn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[allow(dead_code)] // Pairs with len() for clippy::len_without_is_empty
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
