//! Mock implementations for testing
//!
//! These mocks enable testing the controller and gateway without real I/O.

use super::traits::Responder;
use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

// ============================================================================
// Mock LLM Service
// ============================================================================

/// Mock LLM service that returns queued responses
pub struct MockLlmService {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    /// Record of all requests made
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmService {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: LlmResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }
}

// ============================================================================
// Mock Responder
// ============================================================================

/// Responder that returns queued replies, echoing the utterance once the
/// queue is empty
pub struct MockResponder {
    replies: Mutex<VecDeque<String>>,
    utterances: Mutex<Vec<String>>,
}

impl MockResponder {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            utterances: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_reply(&self, reply: impl Into<String>) {
        self.replies.lock().unwrap().push_back(reply.into());
    }

    pub fn recorded_utterances(&self) -> Vec<String> {
        self.utterances.lock().unwrap().clone()
    }
}

#[async_trait]
impl Responder for MockResponder {
    async fn respond(&self, utterance: &str) -> String {
        self.utterances.lock().unwrap().push(utterance.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| format!("Ответ: {utterance}"))
    }
}

// ============================================================================
// Delayed Mock Responder (for busy-state testing)
// ============================================================================

/// Responder that holds every reply until the test releases it
pub struct DelayedMockResponder {
    reply: String,
    /// Notified when a request starts
    pub started: Arc<Notify>,
    /// Notify once per reply to let it through
    pub release: Arc<Notify>,
}

impl DelayedMockResponder {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            started: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }
}

#[async_trait]
impl Responder for DelayedMockResponder {
    async fn respond(&self, _utterance: &str) -> String {
        self.started.notify_one();
        self.release.notified().await;
        self.reply.clone()
    }
}

// ============================================================================
// Panicking Responder (for finalization testing)
// ============================================================================

/// Responder that breaks its contract by panicking
pub struct PanickingResponder;

#[async_trait]
impl Responder for PanickingResponder {
    async fn respond(&self, _utterance: &str) -> String {
        panic!("responder blew up");
    }
}
