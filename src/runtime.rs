//! Runtime for chat widget sessions
//!
//! One [`ConversationController`] per widget session, each with its own
//! responder. Sessions live in memory only and are evicted oldest-first when
//! the cap is reached.

mod controller;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use controller::{ConversationController, PendingReply, Snapshot};
pub use traits::*;

use crate::responder::ResponderGateway;
use crate::transcript::ConversationTurn;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

/// Session manager wired to the real Gemini gateway
pub type ProductionSessions = SessionManager<ResponderGateway>;

/// Events pushed to a session's subscribers
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetEvent {
    Turn { turn: ConversationTurn },
    Pending { pending: bool },
    InputCleared,
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Conversation not found: {0}")]
    NotFound(String),
    #[error("Too many active conversations, try again shortly")]
    AtCapacity,
}

type ResponderFactory<R> = Box<dyn Fn() -> R + Send + Sync>;

struct SessionEntry<R: Responder + 'static> {
    /// Creation order, for eviction
    seq: u64,
    controller: Arc<ConversationController<R>>,
}

struct Sessions<R: Responder + 'static> {
    by_id: HashMap<String, SessionEntry<R>>,
    next_seq: u64,
}

/// Manager for all widget sessions
pub struct SessionManager<R: Responder + 'static> {
    sessions: RwLock<Sessions<R>>,
    new_responder: ResponderFactory<R>,
    welcome: String,
    max_sessions: usize,
}

impl<R: Responder + 'static> SessionManager<R> {
    pub fn new(
        new_responder: impl Fn() -> R + Send + Sync + 'static,
        welcome: impl Into<String>,
        max_sessions: usize,
    ) -> Self {
        Self {
            sessions: RwLock::new(Sessions {
                by_id: HashMap::new(),
                next_seq: 0,
            }),
            new_responder: Box::new(new_responder),
            welcome: welcome.into(),
            max_sessions: max_sessions.max(1),
        }
    }

    /// Start a new conversation with a freshly seeded transcript
    pub async fn create(&self) -> Result<Arc<ConversationController<R>>, SessionError> {
        let mut sessions = self.sessions.write().await;

        if sessions.by_id.len() >= self.max_sessions {
            let oldest_idle = sessions
                .by_id
                .iter()
                .filter(|(_, entry)| !entry.controller.is_pending())
                .min_by_key(|(_, entry)| entry.seq)
                .map(|(id, _)| id.clone());

            match oldest_idle {
                Some(id) => {
                    sessions.by_id.remove(&id);
                    tracing::info!(session = %id, "Evicted oldest idle session");
                }
                None => {
                    tracing::warn!(
                        active = sessions.by_id.len(),
                        "Session cap reached, all sessions busy"
                    );
                    return Err(SessionError::AtCapacity);
                }
            }
        }

        let id = uuid::Uuid::new_v4().to_string();
        let controller =
            ConversationController::new(id.clone(), Arc::new((self.new_responder)()), &self.welcome);
        let seq = sessions.next_seq;
        sessions.next_seq += 1;
        sessions.by_id.insert(
            id.clone(),
            SessionEntry {
                seq,
                controller: Arc::clone(&controller),
            },
        );

        tracing::info!(session = %id, active = sessions.by_id.len(), "Chat session created");
        Ok(controller)
    }

    pub async fn get(&self, id: &str) -> Result<Arc<ConversationController<R>>, SessionError> {
        self.sessions
            .read()
            .await
            .by_id
            .get(id)
            .map(|entry| Arc::clone(&entry.controller))
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    #[allow(dead_code)] // Used by tests and diagnostics
    pub async fn len(&self) -> usize {
        self.sessions.read().await.by_id.len()
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{DelayedMockResponder, MockResponder};
    use super::*;
    use crate::state_machine::Trigger;

    fn manager(max: usize) -> SessionManager<MockResponder> {
        SessionManager::new(MockResponder::new, "Здравствуйте!", max)
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let sessions = manager(10);
        let created = sessions.create().await.unwrap();

        let fetched = sessions.get(created.id()).await.unwrap();
        assert_eq!(fetched.id(), created.id());
        assert_eq!(fetched.snapshot().transcript.len(), 1);
        assert!(matches!(
            sessions.get("missing").await,
            Err(SessionError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let sessions = manager(10);
        let a = sessions.create().await.unwrap();
        let b = sessions.create().await.unwrap();

        a.submit("Привет", Trigger::SendAction)
            .unwrap()
            .reply()
            .await
            .unwrap();

        assert_eq!(a.snapshot().transcript.len(), 3);
        assert_eq!(b.snapshot().transcript.len(), 1);
    }

    #[tokio::test]
    async fn test_cap_evicts_oldest_idle() {
        let sessions = manager(2);
        let first = sessions.create().await.unwrap();
        let second = sessions.create().await.unwrap();
        let third = sessions.create().await.unwrap();

        assert_eq!(sessions.len().await, 2);
        assert!(sessions.get(first.id()).await.is_err());
        assert!(sessions.get(second.id()).await.is_ok());
        assert!(sessions.get(third.id()).await.is_ok());
    }

    #[tokio::test]
    async fn test_cap_refuses_when_all_pending() {
        let sessions: SessionManager<DelayedMockResponder> =
            SessionManager::new(|| DelayedMockResponder::new("ok"), "hi", 1);
        let busy = sessions.create().await.unwrap();
        let _pending = busy.submit("Привет", Trigger::SendAction).unwrap();

        assert!(matches!(sessions.create().await, Err(SessionError::AtCapacity)));
        assert!(sessions.get(busy.id()).await.is_ok());
    }
}
