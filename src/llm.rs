//! LLM provider abstraction
//!
//! The chat widget talks to a single generative-language provider (Gemini),
//! but the gateway only sees the [`LlmService`] trait so tests can swap it out.

mod error;
mod gemini;
mod types;

#[cfg(test)]
mod proptests;

pub use error::{LlmError, LlmErrorKind};
pub use gemini::{GeminiConfig, GeminiService, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT};
pub use types::*;

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for LLM providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a completion request
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// How a completed call looked from the chat's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReplyOutcome {
    /// Usable text, generation finished normally
    Reply,
    /// Usable text, but generation stopped early (token limit, safety)
    Truncated,
    /// Nothing the widget can show
    Empty,
}

impl ReplyOutcome {
    fn of(response: &LlmResponse) -> Self {
        if response.text().trim().is_empty() {
            Self::Empty
        } else if response.end_turn {
            Self::Reply
        } else {
            Self::Truncated
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Reply => "reply",
            Self::Truncated => "truncated",
            Self::Empty => "empty",
        }
    }
}

/// Wraps a provider and logs one line per chat exchange: which exchange of
/// the conversation it was, how long it took, and what came back.
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        // History holds user/bot pairs; the last message is the new utterance
        let exchange = request.messages.len().div_ceil(2);
        let utterance_chars = request
            .messages
            .last()
            .map_or(0, |m| m.text().chars().count());

        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        match &result {
            Ok(response) => {
                let outcome = ReplyOutcome::of(response);
                let reply_chars = response.text().chars().count();
                if outcome == ReplyOutcome::Empty {
                    tracing::warn!(
                        model = %self.model_id,
                        exchange,
                        duration_ms,
                        utterance_chars,
                        outcome = outcome.as_str(),
                        "Chat completion returned no text"
                    );
                } else {
                    tracing::info!(
                        model = %self.model_id,
                        exchange,
                        duration_ms,
                        utterance_chars,
                        reply_chars,
                        outcome = outcome.as_str(),
                        input_tokens = response.usage.input_tokens,
                        output_tokens = response.usage.output_tokens,
                        "Chat completion finished"
                    );
                }
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    exchange,
                    duration_ms,
                    utterance_chars,
                    kind = ?e.kind,
                    retryable = e.kind.is_retryable(),
                    error = %e.message,
                    "Chat completion failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
