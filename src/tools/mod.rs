pub mod args;
pub mod prompts;
pub mod registry;
pub mod status;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use registry::{tool_definitions, ToolName};
pub use traits::{NamedVariant, ToolDefinition};

use crate::backend::{Backend, InferenceClient};
use crate::config::LlmConfig;
use crate::error::{DispatchError, ValidationError};
use crate::types::{CompletionRequest, ToolReply};
use anyhow::Result;
use args::*;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

// ---------------------------------------------------------------------------
// Tool execution engine
// ---------------------------------------------------------------------------

/// Read-only state shared by every tool call.
pub struct ToolContext {
    pub config: LlmConfig,
    pub backend: Arc<dyn Backend>,
}

impl ToolContext {
    pub fn new(config: LlmConfig, backend: Arc<dyn Backend>) -> Self {
        Self { config, backend }
    }

    /// Context backed by the HTTP inference client for `config.base_url`.
    pub fn connect(config: LlmConfig) -> Result<Self> {
        let client = InferenceClient::new(&config)?;
        Ok(Self::new(config, Arc::new(client)))
    }

    pub fn tool_definitions(&self) -> Vec<ToolDefinition> {
        registry::tool_definitions(&self.config)
    }
}

/// Execute a tool call by name. Never fails: errors become `Error: ...` replies.
pub async fn execute_tool(ctx: &ToolContext, name: &str, args: &Value) -> ToolReply {
    let Some(tool) = ToolName::parse(name) else {
        debug!("Rejected call to unknown tool {:?}", name);
        return ToolReply::error(DispatchError::UnknownTool(name.to_string()));
    };
    info!("Tool call: {}", tool.as_str());

    match dispatch(ctx, tool, args).await {
        Ok(text) => ToolReply::ok(text),
        Err(e) => {
            warn!("Tool {} failed: {}", tool.as_str(), e);
            ToolReply::error(e)
        }
    }
}

async fn dispatch(ctx: &ToolContext, tool: ToolName, args: &Value) -> Result<String, DispatchError> {
    let Some(request) = build_request(&ctx.config, tool, args)? else {
        return Ok(status::status_report(ctx).await);
    };

    debug!(
        "{} -> {} message(s), max_tokens={}",
        tool.as_str(),
        request.messages.len(),
        request.max_tokens
    );

    let content = ctx.backend.chat_completion(&request).await?;
    Ok(content
        .filter(|text| !text.is_empty())
        .or_else(|| tool.fallback_text().map(str::to_string))
        .unwrap_or_default())
}

/// Validate `args` for `tool` and build its backend request.
///
/// Returns `None` for `local_status`, which probes the backend instead of
/// prompting it.
pub fn build_request(
    config: &LlmConfig,
    tool: ToolName,
    args: &Value,
) -> Result<Option<CompletionRequest>, ValidationError> {
    let request = match tool {
        ToolName::Summarize => prompts::summarize(config, &SummarizeArgs::parse(args)?),
        ToolName::Draft => prompts::draft(config, &DraftArgs::parse(args)?),
        ToolName::Classify => prompts::classify(config, &ClassifyArgs::parse(args)?),
        ToolName::Extract => prompts::extract(config, &ExtractArgs::parse(args)?),
        ToolName::Transform => prompts::transform(config, &TransformArgs::parse(args)?),
        ToolName::Complete => prompts::complete(config, &CompleteArgs::parse(args)?),
        ToolName::Status => return Ok(None),
    };
    Ok(Some(request))
}
