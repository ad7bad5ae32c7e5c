//! Remote responder gateway
//!
//! Turns one user utterance into one reply string. [`ResponderGateway::respond`]
//! is total: a missing credential, an empty answer, or a failed request all
//! come back as fixed fallback text, never as an error.

use crate::llm::{LlmError, LlmMessage, LlmRequest, LlmService, SystemContent};
use crate::persona;
use std::sync::{Arc, OnceLock};
use thiserror::Error;
use tokio::sync::Mutex;

/// Why the gateway could not produce a real reply
#[derive(Debug, Error)]
pub enum ReplyFailure {
    #[error("no API credential configured")]
    MissingCredential,
    #[error("service returned no usable text")]
    EmptyReply,
    #[error("{0}")]
    Transport(#[from] LlmError),
}

impl ReplyFailure {
    /// User-facing text shown in place of a reply
    pub fn fallback_text(&self) -> &'static str {
        match self {
            ReplyFailure::MissingCredential => persona::UNAVAILABLE_TEXT,
            ReplyFailure::EmptyReply => persona::NOT_UNDERSTOOD_TEXT,
            ReplyFailure::Transport(_) => persona::COMMUNICATION_ERROR_TEXT,
        }
    }
}

/// A stateful chat with the provider: persona, temperature and the history
/// of successful exchanges.
struct ChatSession {
    service: Arc<dyn LlmService>,
    system: String,
    temperature: f32,
    history: Mutex<Vec<LlmMessage>>,
}

impl ChatSession {
    fn new(service: Arc<dyn LlmService>, system: String) -> Self {
        Self {
            service,
            system,
            temperature: persona::TEMPERATURE,
            history: Mutex::new(Vec::new()),
        }
    }

    /// Send one utterance with the accumulated history.
    ///
    /// History only grows when the exchange produced text.
    async fn send(&self, utterance: &str) -> Result<String, ReplyFailure> {
        let mut history = self.history.lock().await;

        let mut messages = history.clone();
        messages.push(LlmMessage::user(utterance));

        let request = LlmRequest {
            system: vec![SystemContent::new(self.system.clone())],
            messages,
            temperature: Some(self.temperature),
            max_tokens: None,
        };

        let response = self.service.complete(&request).await?;
        let text = response.text();
        if text.trim().is_empty() {
            return Err(ReplyFailure::EmptyReply);
        }

        history.push(LlmMessage::user(utterance));
        history.push(LlmMessage::assistant(text.clone()));
        Ok(text)
    }
}

/// Gateway owned by one conversation.
///
/// The chat session is created on first use and kept for the gateway's
/// lifetime; a failed request does not reset it.
pub struct ResponderGateway {
    service: Option<Arc<dyn LlmService>>,
    system: String,
    session: OnceLock<ChatSession>,
}

impl ResponderGateway {
    /// `service` is `None` when no credential is configured.
    pub fn new(service: Option<Arc<dyn LlmService>>, system: impl Into<String>) -> Self {
        Self {
            service,
            system: system.into(),
            session: OnceLock::new(),
        }
    }

    /// Whether the chat session has been created yet
    #[allow(dead_code)] // Used by tests
    pub fn has_session(&self) -> bool {
        self.session.get().is_some()
    }

    pub async fn try_respond(&self, utterance: &str) -> Result<String, ReplyFailure> {
        let service = self
            .service
            .as_ref()
            .ok_or(ReplyFailure::MissingCredential)?;

        let session = self
            .session
            .get_or_init(|| ChatSession::new(Arc::clone(service), self.system.clone()));

        session.send(utterance).await
    }

    pub async fn respond(&self, utterance: &str) -> String {
        match self.try_respond(utterance).await {
            Ok(text) => text,
            Err(failure) => {
                match &failure {
                    ReplyFailure::MissingCredential => {
                        tracing::debug!("No API credential configured, replying with fallback");
                    }
                    ReplyFailure::EmptyReply => {
                        tracing::warn!("LLM returned an empty reply");
                    }
                    ReplyFailure::Transport(e) => {
                        tracing::error!(
                            error = %e,
                            kind = ?e.kind,
                            retryable = e.kind.is_retryable(),
                            "Gemini API error"
                        );
                    }
                }
                failure.fallback_text().to_string()
            }
        }
    }
}
