//! Prime Park - taxi fleet site with an AI chat assistant
//!
//! Serves the marketing page and a chat widget whose replies come from
//! Google Gemini, speaking as the company's dispatcher.

mod api;
mod catalog;
mod config;
mod llm;
mod persona;
mod responder;
mod runtime;
mod state_machine;
mod transcript;

use api::{create_router, AppState};
use config::AppConfig;
use llm::{GeminiService, LlmError, LlmService, LoggingService};
use responder::ResponderGateway;
use runtime::ProductionSessions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prime_park=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let config = AppConfig::from_env();

    // Initialize the LLM service; without a key every reply is the fallback text
    let service = build_llm_service(&config)?;

    // Computed once, shared by every session's gateway
    let system: Arc<str> = persona::system_instruction().into();
    let sessions = ProductionSessions::new(
        move || ResponderGateway::new(service.clone(), system.as_ref()),
        persona::WELCOME_TEXT,
        config.max_sessions,
    );

    // Create application state
    let state = AppState::new(sessions);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let compression = CompressionLayer::new()
        .gzip(true)
        .br(true)
        .deflate(true)
        .zstd(true);

    let app = create_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(compression),
    );

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(
        max_sessions = config.max_sessions,
        "Prime Park server listening on {}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `Ok(None)` only when no credential is configured. A configured key whose
/// client cannot be built is a startup failure, not "unavailable".
fn build_llm_service(config: &AppConfig) -> Result<Option<Arc<dyn LlmService>>, LlmError> {
    let Some(gemini) = config.gemini_config() else {
        tracing::warn!("No API key configured. Set API_KEY or GEMINI_API_KEY; chat replies will be unavailable.");
        return Ok(None);
    };

    let service: Arc<dyn LlmService> = Arc::new(GeminiService::new(&gemini).inspect_err(|e| {
        tracing::error!(error = %e, "Failed to initialize Gemini service");
    })?);
    tracing::info!(model = %gemini.model, "Gemini service initialized");
    Ok(Some(Arc::new(LoggingService::new(service))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_credential_means_no_service() {
        let config = AppConfig::from_lookup(|_| None);
        assert!(build_llm_service(&config).unwrap().is_none());
    }

    #[test]
    fn test_credential_builds_logged_gemini_service() {
        let config = AppConfig::from_lookup(|name| match name {
            "GEMINI_API_KEY" => Some("key".to_string()),
            "GEMINI_MODEL" => Some("gemini-2.0-flash".to_string()),
            _ => None,
        });

        let service = build_llm_service(&config).unwrap().unwrap();
        assert_eq!(service.model_id(), "gemini-2.0-flash");
    }
}
