//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::*;
use crate::transcript::Sender;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_state() -> impl Strategy<Value = ConvState> {
    prop_oneof![Just(ConvState::Idle), Just(ConvState::Sending)]
}

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Zа-яА-Я0-9 .,!?]{0,40}",
        "[ \t\n]{0,5}",
    ]
}

fn arb_trigger() -> impl Strategy<Value = Trigger> {
    prop_oneof![
        Just(Trigger::SendAction),
        (prop_oneof![Just("Enter".to_string()), "[a-z]{1,3}"], any::<bool>())
            .prop_map(|(key, shift)| Trigger::Key { key, shift }),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        (arb_text(), arb_trigger()).prop_map(|(text, trigger)| Event::UserSubmit { text, trigger }),
        arb_text().prop_map(|text| Event::ReplySettled { text }),
    ]
}

fn appended(effects: &[Effect]) -> Vec<(Sender, String)> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::AppendTurn { sender, text } => Some((*sender, text.clone())),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Accepted transitions always flip the state and append exactly one turn
    #[test]
    fn accepted_transition_appends_exactly_one_turn(state in arb_state(), event in arb_event()) {
        if let Ok(result) = transition(state, event) {
            prop_assert_ne!(result.new_state, state);
            let turns = appended(&result.effects);
            prop_assert_eq!(turns.len(), 1);
            let expected_sender = if state == ConvState::Idle { Sender::User } else { Sender::Bot };
            prop_assert_eq!(turns[0].0, expected_sender);
            prop_assert!(!turns[0].1.trim().is_empty());
        }
    }

    /// The pending notification always matches the new state
    #[test]
    fn pending_notification_matches_new_state(state in arb_state(), event in arb_event()) {
        if let Ok(result) = transition(state, event) {
            let notified: Vec<bool> = result.effects.iter().filter_map(|e| match e {
                Effect::NotifyPending { pending } => Some(*pending),
                _ => None,
            }).collect();
            prop_assert_eq!(notified, vec![result.new_state.is_pending()]);
        }
    }

    /// A reply is requested exactly when a send starts, for the stored user text
    #[test]
    fn reply_requested_only_when_sending_starts(state in arb_state(), event in arb_event()) {
        if let Ok(result) = transition(state, event) {
            let requests: Vec<&String> = result.effects.iter().filter_map(|e| match e {
                Effect::RequestReply { utterance } => Some(utterance),
                _ => None,
            }).collect();
            if result.new_state == ConvState::Sending {
                prop_assert_eq!(requests.len(), 1);
                prop_assert_eq!(requests[0], &appended(&result.effects)[0].1);
            } else {
                prop_assert!(requests.is_empty());
            }
        }
    }

    /// Blank input is refused whatever the state or trigger
    #[test]
    fn blank_input_never_accepted(state in arb_state(), blank in "[ \t\n]{0,8}", trigger in arb_trigger()) {
        let result = transition(state, Event::UserSubmit { text: blank, trigger });
        prop_assert!(result.is_err());
    }

    /// Running any event sequence keeps the appended senders alternating
    #[test]
    fn event_sequences_alternate_senders(events in proptest::collection::vec(arb_event(), 0..40)) {
        let mut state = ConvState::Idle;
        let mut senders = vec![Sender::Bot]; // welcome turn

        for event in events {
            if let Ok(result) = transition(state, event) {
                state = result.new_state;
                senders.extend(appended(&result.effects).into_iter().map(|(s, _)| s));
            }
        }

        for pair in senders.windows(2) {
            prop_assert_ne!(pair[0], pair[1]);
        }
        prop_assert_eq!(state.is_pending(), senders.last() == Some(&Sender::User));
    }
}
