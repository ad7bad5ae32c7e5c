//! Process configuration from environment variables

use crate::llm::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT};
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Gemini credential; `None` puts the chat in fallback mode
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
    pub port: u16,
    pub max_sessions: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            api_key: non_empty("API_KEY").or_else(|| non_empty("GEMINI_API_KEY")),
            model: non_empty("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: non_empty("GEMINI_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: parse_var::<u64>("GEMINI_TIMEOUT_SECS", non_empty("GEMINI_TIMEOUT_SECS"))
                .filter(|secs| *secs > 0)
                .map_or(DEFAULT_TIMEOUT, Duration::from_secs),
            port: parse_var("PRIME_PARK_PORT", non_empty("PRIME_PARK_PORT"))
                .unwrap_or(DEFAULT_PORT),
            max_sessions: parse_var("PRIME_PARK_MAX_SESSIONS", non_empty("PRIME_PARK_MAX_SESSIONS"))
                .filter(|max| *max > 0)
                .unwrap_or(DEFAULT_MAX_SESSIONS),
        }
    }

    /// Gemini settings, if a credential is configured
    pub fn gemini_config(&self) -> Option<GeminiConfig> {
        self.api_key.as_ref().map(|key| GeminiConfig {
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            timeout: self.timeout,
            ..GeminiConfig::new(key.clone())
        })
    }
}

/// Parse a numeric variable. Unset and unparseable both yield `None` so the
/// caller's default applies; the latter is logged.
fn parse_var<T: FromStr>(name: &str, raw: Option<String>) -> Option<T> {
    let raw = raw?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(variable = name, value = %raw, "Invalid number, using default");
            None
        }
    }
}
