//! Configuration schema for config.toml.

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434/v1";
pub const DEFAULT_MODEL: &str = "qwen2.5-coder:7b";
pub const DEFAULT_MAX_TOKENS: u32 = 2048;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Backend connection settings and generation defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// OpenAI-compatible API root (Ollama: `/v1`, Docker Model Runner: `/engines/v1`).
    pub base_url: String,

    /// Model identifier sent with every request.
    pub default_model: String,

    /// Upper bound on generated tokens when a tool does not pick its own.
    pub default_max_tokens: u32,

    /// Sampling temperature for `local_complete` when the caller omits one.
    pub default_temperature: f64,

    /// Per-request HTTP timeout. Unset means wait for the backend indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            default_model: DEFAULT_MODEL.into(),
            default_max_tokens: DEFAULT_MAX_TOKENS,
            default_temperature: DEFAULT_TEMPERATURE,
            request_timeout_secs: None,
        }
    }
}
