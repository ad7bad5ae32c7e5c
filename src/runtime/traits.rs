//! Trait abstractions for runtime I/O
//!
//! The controller only needs "utterance in, reply text out"; these traits let
//! tests replace the real gateway with mocks.

use crate::responder::ResponderGateway;
use async_trait::async_trait;
use std::sync::Arc;

/// Produces the bot's reply for one user utterance.
///
/// Implementations are expected to be total: failures become fallback text.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, utterance: &str) -> String;
}

#[async_trait]
impl<T: Responder + ?Sized> Responder for Arc<T> {
    async fn respond(&self, utterance: &str) -> String {
        (**self).respond(utterance).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

#[async_trait]
impl Responder for ResponderGateway {
    async fn respond(&self, utterance: &str) -> String {
        ResponderGateway::respond(self, utterance).await
    }
}
