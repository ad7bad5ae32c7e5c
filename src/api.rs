//! HTTP API for the site and its chat widget

mod assets;
mod handlers;
mod sse;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::runtime::{Responder, SessionManager};
use std::sync::Arc;

/// Application state shared across handlers
pub struct AppState<R: Responder + 'static> {
    pub sessions: Arc<SessionManager<R>>,
}

impl<R: Responder + 'static> AppState<R> {
    pub fn new(sessions: SessionManager<R>) -> Self {
        Self {
            sessions: Arc::new(sessions),
        }
    }
}

// Manual impl: `R` itself need not be `Clone`
impl<R: Responder + 'static> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            sessions: Arc::clone(&self.sessions),
        }
    }
}
