//! Pure state transition function

use super::{ConvState, Effect, Event};
use crate::persona;
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: ConvState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: ConvState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Reasons an event is refused. A refused event changes nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Message is empty")]
    EmptyInput,
    #[error("Assistant is still answering the previous message")]
    Busy,
    #[error("Key press does not submit the message")]
    NotASubmit,
    #[error("No reply is pending")]
    NothingPending,
}

/// Pure transition function.
///
/// Given the same inputs it always produces the same outputs, with no I/O.
pub fn transition(state: ConvState, event: Event) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        (_, Event::UserSubmit { trigger, .. }) if !trigger.submits() => {
            Err(TransitionError::NotASubmit)
        }

        (_, Event::UserSubmit { text, .. }) if text.trim().is_empty() => {
            Err(TransitionError::EmptyInput)
        }

        // Idle + UserSubmit -> Sending
        (ConvState::Idle, Event::UserSubmit { text, .. }) => {
            let text = text.trim();
            Ok(TransitionResult::new(ConvState::Sending)
                .with_effect(Effect::append_user(text))
                .with_effect(Effect::NotifyPending { pending: true })
                .with_effect(Effect::ClearInput)
                .with_effect(Effect::RequestReply {
                    utterance: text.to_string(),
                }))
        }

        // Sending + UserSubmit -> reject, one send at a time
        (ConvState::Sending, Event::UserSubmit { .. }) => Err(TransitionError::Busy),

        // Sending + ReplySettled -> Idle
        (ConvState::Sending, Event::ReplySettled { text }) => {
            // Bot turns must carry text even if a responder misbehaves
            let text = if text.trim().is_empty() {
                persona::NOT_UNDERSTOOD_TEXT.to_string()
            } else {
                text
            };
            Ok(TransitionResult::new(ConvState::Idle)
                .with_effect(Effect::append_bot(text))
                .with_effect(Effect::NotifyPending { pending: false }))
        }

        (ConvState::Idle, Event::ReplySettled { .. }) => Err(TransitionError::NothingPending),
    }
}
