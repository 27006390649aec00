//! `local_status`: connectivity probe rendered as pretty JSON.
//!
//! Backend failures are reported inside the JSON body, never as a tool error.

use super::ToolContext;
use serde::Serialize;
use tracing::warn;

pub const BACKEND_HINT: &str = "Ensure Ollama is running: ollama serve. If using Docker Model Runner, set LOCAL_LLM_BASE_URL to http://localhost:12434/engines/v1";

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum StatusReport<'a> {
    Connected {
        base_url: &'a str,
        default_model: &'a str,
        available_models: Vec<String>,
        config: GenerationDefaults,
    },
    Error {
        base_url: &'a str,
        error: String,
        hint: &'static str,
    },
}

#[derive(Debug, Serialize)]
struct GenerationDefaults {
    max_tokens: u32,
    temperature: f64,
}

/// Probe the backend's model listing and describe the result.
pub async fn status_report(ctx: &ToolContext) -> String {
    let config = &ctx.config;
    let report = match ctx.backend.list_models().await {
        Ok(models) => StatusReport::Connected {
            base_url: &config.base_url,
            default_model: &config.default_model,
            available_models: models,
            config: GenerationDefaults {
                max_tokens: config.default_max_tokens,
                temperature: config.default_temperature,
            },
        },
        Err(e) => {
            warn!("Status probe failed: {}", e);
            StatusReport::Error {
                base_url: &config.base_url,
                error: e.to_string(),
                hint: BACKEND_HINT,
            }
        }
    };

    serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
        warn!("Failed to render status report: {}", e);
        serde_json::json!({ "status": "error", "error": e.to_string() }).to_string()
    })
}
