//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::sse::sse_stream;
use super::types::{ErrorResponse, SendMessageRequest, SendMessageResponse};
use super::AppState;
use crate::catalog::{self, SiteContent};
use crate::runtime::{Responder, SessionError, Snapshot};
use crate::state_machine::TransitionError;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router<R: Responder + 'static>(state: AppState<R>) -> Router {
    Router::new()
        // The page
        .route("/", get(serve_page))
        // Static assets (embedded)
        .route("/assets/*path", get(serve_static))
        // Marketing content
        .route("/api/site", get(get_site))
        // Chat widget sessions
        .route("/api/chat/sessions", post(create_session::<R>))
        .route("/api/chat/sessions/:id", get(get_session::<R>))
        .route("/api/chat/sessions/:id/messages", post(send_message::<R>))
        .route("/api/chat/sessions/:id/stream", get(stream_session::<R>))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Page
// ============================================================

async fn serve_page() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - page not found</h1>".to_string()),
        )
            .into_response(),
    }
}

async fn get_site() -> Json<SiteContent> {
    Json(catalog::site_content())
}

// ============================================================
// Chat Sessions
// ============================================================

async fn create_session<R: Responder + 'static>(
    State(state): State<AppState<R>>,
) -> Result<(StatusCode, Json<Snapshot>), AppError> {
    let controller = state.sessions.create().await?;
    Ok((StatusCode::CREATED, Json(controller.snapshot())))
}

async fn get_session<R: Responder + 'static>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Snapshot>, AppError> {
    let controller = state.sessions.get(&id).await?;
    Ok(Json(controller.snapshot()))
}

async fn send_message<R: Responder + 'static>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    Json(req): Json<SendMessageRequest>,
) -> Result<(StatusCode, Json<SendMessageResponse>), AppError> {
    let controller = state.sessions.get(&id).await?;

    // The reply lands through the stream; it is not awaited here
    let pending = controller.submit(&req.text, req.trigger)?;

    Ok((
        StatusCode::ACCEPTED,
        Json(SendMessageResponse {
            accepted: true,
            turn: pending.user_turn().clone(),
        }),
    ))
}

async fn stream_session<R: Responder + 'static>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let controller = state.sessions.get(&id).await?;
    let (snapshot, rx) = controller.subscribe();
    Ok(sse_stream(snapshot, rx))
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("prime-park ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unprocessable(String),
    Unavailable(String),
    Internal(String),
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::NotFound(_) => AppError::NotFound(e.to_string()),
            SessionError::AtCapacity => AppError::Unavailable(e.to_string()),
        }
    }
}

impl From<TransitionError> for AppError {
    fn from(e: TransitionError) -> Self {
        match e {
            TransitionError::EmptyInput => AppError::BadRequest(e.to_string()),
            TransitionError::Busy => AppError::Conflict(e.to_string()),
            TransitionError::NotASubmit => AppError::Unprocessable(e.to_string()),
            TransitionError::NothingPending => AppError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            AppError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
