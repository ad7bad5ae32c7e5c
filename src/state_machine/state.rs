//! Conversation state types

use serde::Serialize;

/// Per-conversation send state.
///
/// At most one send is in flight: `Sending` is the only state in which a
/// reply may settle, and the only one that refuses new input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConvState {
    #[default]
    Idle,
    Sending,
}

impl ConvState {
    /// The `pending` flag the presentation layer sees
    pub fn is_pending(self) -> bool {
        matches!(self, ConvState::Sending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_flag() {
        assert!(!ConvState::Idle.is_pending());
        assert!(ConvState::Sending.is_pending());
        assert_eq!(ConvState::default(), ConvState::Idle);
    }
}
