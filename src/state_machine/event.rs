//! Events that can occur in a conversation

use serde::Deserialize;

/// What caused a submission
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Trigger {
    /// The send button
    #[default]
    SendAction,
    /// A key press in the input field
    Key {
        key: String,
        #[serde(default)]
        shift: bool,
    },
}

impl Trigger {
    /// Enter without Shift sends; Shift+Enter and other keys do not.
    pub fn submits(&self) -> bool {
        match self {
            Trigger::SendAction => true,
            Trigger::Key { key, shift } => key == "Enter" && !shift,
        }
    }
}

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// User submitted the input buffer
    UserSubmit { text: String, trigger: Trigger },

    /// The gateway call finished, with a real reply or a fallback
    ReplySettled { text: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submitting_triggers() {
        assert!(Trigger::SendAction.submits());
        assert!(Trigger::Key {
            key: "Enter".to_string(),
            shift: false
        }
        .submits());
        assert!(!Trigger::Key {
            key: "Enter".to_string(),
            shift: true
        }
        .submits());
        assert!(!Trigger::Key {
            key: "a".to_string(),
            shift: false
        }
        .submits());
    }

    #[test]
    fn test_trigger_wire_format() {
        let send: Trigger = serde_json::from_str(r#"{"type":"send_action"}"#).unwrap();
        assert_eq!(send, Trigger::SendAction);

        let key: Trigger = serde_json::from_str(r#"{"type":"key","key":"Enter"}"#).unwrap();
        assert_eq!(
            key,
            Trigger::Key {
                key: "Enter".to_string(),
                shift: false
            }
        );
    }
}
