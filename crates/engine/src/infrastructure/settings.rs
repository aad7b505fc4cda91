//! Engine configuration from the process environment.

use super::openai::{DEFAULT_OPENAI_BASE_URL, DEFAULT_OPENAI_MODEL};

pub const DEFAULT_DB_PATH: &str = "npchat.db";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 100;

/// Runtime settings, read once at startup.
///
/// `api_key` is the only setting without a default: when absent the
/// dialogue pipeline is disabled and every process call fails fast.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub db_path: String,
    pub api_key: Option<String>,
    pub api_base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl EngineSettings {
    pub fn from_env() -> Self {
        Self {
            db_path: std::env::var("NPCHAT_DB").unwrap_or_else(|_| DEFAULT_DB_PATH.into()),
            api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            api_base_url: std::env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.into()),
            model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.into()),
            temperature: parse_or("NPCHAT_TEMPERATURE", DEFAULT_TEMPERATURE),
            max_tokens: parse_or("NPCHAT_MAX_TOKENS", DEFAULT_MAX_TOKENS),
        }
    }
}

fn parse_or<T: std::str::FromStr>(var: &str, default: T) -> T {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
