//! API request and response types

use crate::state_machine::Trigger;
use crate::transcript::ConversationTurn;
use serde::{Deserialize, Serialize};

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
    /// Defaults to the send button
    #[serde(default)]
    pub trigger: Trigger,
}

/// Response for an accepted chat message
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub accepted: bool,
    /// The user turn as stored
    pub turn: ConversationTurn,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
