//! Effects produced by state transitions

use crate::transcript::Sender;

/// Effects to be executed after a state transition, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append a turn to the transcript
    AppendTurn { sender: Sender, text: String },

    /// Tell the presentation layer the pending flag changed
    NotifyPending { pending: bool },

    /// Clear the widget's input buffer
    ClearInput,

    /// Ask the gateway for a reply to `utterance`
    RequestReply { utterance: String },
}

impl Effect {
    pub fn append_user(text: impl Into<String>) -> Self {
        Effect::AppendTurn {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn append_bot(text: impl Into<String>) -> Self {
        Effect::AppendTurn {
            sender: Sender::Bot,
            text: text.into(),
        }
    }
}
