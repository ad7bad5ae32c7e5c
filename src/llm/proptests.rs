//! Property-based tests for the Gemini translation layer
//!
//! These tests verify that translation between our internal types and the
//! Gemini wire format preserves key invariants:
//! - Persona and temperature are always carried
//! - Roles alternate exactly as given, with assistant mapped to `model`
//! - Text survives the round trip through the response normalizer

use super::gemini::{self, GeminiResponse};
use super::types::{LlmMessage, LlmRequest, MessageRole, SystemContent};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_text() -> impl Strategy<Value = String> {
    "[a-zA-Zа-яА-Я0-9 _.!?,]{1,80}"
}

fn arb_message() -> impl Strategy<Value = LlmMessage> {
    (any::<bool>(), arb_text()).prop_map(|(is_user, text)| {
        if is_user {
            LlmMessage::user(text)
        } else {
            LlmMessage::assistant(text)
        }
    })
}

fn arb_request() -> impl Strategy<Value = LlmRequest> {
    (
        arb_text(),
        proptest::collection::vec(arb_message(), 1..12),
        0.0f32..=1.0,
    )
        .prop_map(|(persona, messages, temperature)| LlmRequest {
            system: vec![SystemContent::new(persona)],
            messages,
            temperature: Some(temperature),
            max_tokens: None,
        })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn translation_keeps_every_message_and_role(request in arb_request()) {
        let wire = serde_json::to_value(gemini::translate_request(&request)).unwrap();
        let contents = wire["contents"].as_array().unwrap();

        prop_assert_eq!(contents.len(), request.messages.len());
        for (content, message) in contents.iter().zip(&request.messages) {
            let expected = match message.role {
                MessageRole::User => "user",
                MessageRole::Assistant => "model",
            };
            prop_assert_eq!(content["role"].as_str(), Some(expected));
        }
    }

    #[test]
    fn translation_always_carries_persona_and_temperature(request in arb_request()) {
        let wire = serde_json::to_value(gemini::translate_request(&request)).unwrap();

        prop_assert_eq!(
            wire["systemInstruction"]["parts"][0]["text"].as_str(),
            Some(request.system[0].text.as_str())
        );
        let sent = wire["generationConfig"]["temperature"].as_f64().unwrap();
        let expected = f64::from(request.temperature.unwrap());
        prop_assert!((sent - expected).abs() < 1e-6);
    }

    #[test]
    fn normalization_preserves_reply_text(parts in proptest::collection::vec(arb_text(), 1..5)) {
        let body = serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": parts.iter().map(|t| serde_json::json!({"text": t})).collect::<Vec<_>>()
                },
                "finishReason": "STOP"
            }]
        });
        let resp: GeminiResponse = serde_json::from_value(body).unwrap();
        let normalized = gemini::normalize_response(resp);

        prop_assert_eq!(normalized.text(), parts.concat());
        prop_assert!(normalized.end_turn);
    }
}
