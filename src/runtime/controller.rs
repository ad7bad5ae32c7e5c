//! Conversation controller
//!
//! Owns one widget session's transcript and responder, runs the state
//! machine, and executes its effects.

use super::traits::Responder;
use super::WidgetEvent;
use crate::persona;
use crate::state_machine::{transition, ConvState, Effect, Event, TransitionError, Trigger};
use crate::transcript::{ConversationTurn, Transcript};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Point-in-time view of a conversation
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub id: String,
    pub transcript: Vec<ConversationTurn>,
    pub pending: bool,
}

/// An accepted submission whose reply is still on its way
#[derive(Debug)]
pub struct PendingReply {
    user_turn: ConversationTurn,
    handle: JoinHandle<Option<ConversationTurn>>,
}

impl PendingReply {
    pub fn user_turn(&self) -> &ConversationTurn {
        &self.user_turn
    }

    /// Wait for the bot turn.
    ///
    /// The reply task runs independently; dropping this handle does not stop it.
    #[allow(dead_code)] // HTTP handlers fire and forget; tests await
    pub async fn reply(self) -> Option<ConversationTurn> {
        self.handle.await.ok().flatten()
    }
}

struct Inner {
    state: ConvState,
    transcript: Transcript,
}

/// Turns appended and work requested by one executed transition
#[derive(Default)]
struct Applied {
    appended: Vec<ConversationTurn>,
    reply_request: Option<String>,
}

pub struct ConversationController<R: Responder + 'static> {
    id: String,
    inner: Mutex<Inner>,
    responder: Arc<R>,
    events_tx: broadcast::Sender<WidgetEvent>,
}

impl<R: Responder + 'static> ConversationController<R> {
    pub fn new(id: impl Into<String>, responder: Arc<R>, welcome: &str) -> Arc<Self> {
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            id: id.into(),
            inner: Mutex::new(Inner {
                state: ConvState::Idle,
                transcript: Transcript::seeded(welcome),
            }),
            responder,
            events_tx,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn is_pending(&self) -> bool {
        self.lock().state.is_pending()
    }

    pub fn snapshot(&self) -> Snapshot {
        let inner = self.lock();
        Snapshot {
            id: self.id.clone(),
            transcript: inner.transcript.turns().to_vec(),
            pending: inner.state.is_pending(),
        }
    }

    /// Snapshot plus a receiver for everything that happens after it.
    ///
    /// Both are taken under the same lock so no event falls between them.
    pub fn subscribe(&self) -> (Snapshot, broadcast::Receiver<WidgetEvent>) {
        let inner = self.lock();
        let rx = self.events_tx.subscribe();
        let snapshot = Snapshot {
            id: self.id.clone(),
            transcript: inner.transcript.turns().to_vec(),
            pending: inner.state.is_pending(),
        };
        (snapshot, rx)
    }

    /// Submit user input.
    ///
    /// On acceptance the USER turn is already in the transcript and the reply
    /// is being fetched in the background. A refused submission changes nothing.
    pub fn submit(
        self: &Arc<Self>,
        text: &str,
        trigger: Trigger,
    ) -> Result<PendingReply, TransitionError> {
        let applied = self
            .apply(Event::UserSubmit {
                text: text.to_string(),
                trigger,
            })
            .inspect_err(|e| {
                tracing::debug!(session = %self.id, reason = %e, "Submission rejected");
            })?;

        let (Some(user_turn), Some(utterance)) =
            (applied.appended.into_iter().next(), applied.reply_request)
        else {
            // transition() always pairs a user turn with a reply request
            unreachable!("accepted submission produced no user turn");
        };

        tracing::info!(
            session = %self.id,
            turn = %user_turn.id,
            chars = user_turn.text.chars().count(),
            "Chat message accepted"
        );

        let controller = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let text = controller.fetch_reply(utterance).await;
            controller.settle(text)
        });

        Ok(PendingReply { user_turn, handle })
    }

    /// Ask the responder in its own task so a panic cannot leave the
    /// conversation stuck in `Sending`.
    async fn fetch_reply(&self, utterance: String) -> String {
        let responder = Arc::clone(&self.responder);
        match tokio::spawn(async move { responder.respond(&utterance).await }).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!(session = %self.id, error = %e, "Responder task failed");
                persona::COMMUNICATION_ERROR_TEXT.to_string()
            }
        }
    }

    fn settle(&self, text: String) -> Option<ConversationTurn> {
        match self.apply(Event::ReplySettled { text }) {
            Ok(applied) => {
                let turn = applied.appended.into_iter().next();
                if let Some(turn) = &turn {
                    tracing::debug!(session = %self.id, turn = %turn.id, "Reply appended");
                }
                turn
            }
            Err(e) => {
                tracing::error!(session = %self.id, error = %e, "Failed to settle reply");
                None
            }
        }
    }

    /// Run one transition and execute its effects under the state lock.
    ///
    /// Notifications are sent while the lock is held so subscribers observe
    /// them in transcript order.
    fn apply(&self, event: Event) -> Result<Applied, TransitionError> {
        let mut inner = self.lock();
        let result = transition(inner.state, event)?;
        inner.state = result.new_state;

        let mut applied = Applied::default();
        for effect in result.effects {
            match effect {
                Effect::AppendTurn { sender, text } => {
                    let turn = inner.transcript.next_turn(sender, text);
                    inner.transcript.append(turn.clone());
                    let _ = self.events_tx.send(WidgetEvent::Turn { turn: turn.clone() });
                    applied.appended.push(turn);
                }
                Effect::NotifyPending { pending } => {
                    let _ = self.events_tx.send(WidgetEvent::Pending { pending });
                }
                Effect::ClearInput => {
                    let _ = self.events_tx.send(WidgetEvent::InputCleared);
                }
                Effect::RequestReply { utterance } => {
                    applied.reply_request = Some(utterance);
                }
            }
        }

        Ok(applied)
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // Nothing panics while holding the lock; recover rather than cascade
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
