//! MCP server over stdio.
//!
//! rmcp owns the JSON-RPC framing, the initialize handshake and request
//! concurrency; this module maps the tool registry and the tool engine onto
//! its `ServerHandler`.

use crate::tools::{self, ToolContext, ToolDefinition};
use crate::types::ToolReply;
use crate::{SERVER_NAME, SERVER_VERSION};
use anyhow::{Context, Result};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{transport::stdio, ErrorData as McpError, ServerHandler, ServiceExt};
use serde_json::Value;
use tracing::{debug, info, warn};

const INSTRUCTIONS: &str = "Delegates summarizing, drafting, classification, extraction, \
     rewriting and raw completion to a local LLM. Use local_status to check the backend.";

/// Serve MCP on stdin/stdout until the client closes stdin or Ctrl-C.
pub async fn serve_stdio(ctx: ToolContext) -> Result<()> {
    let service = ctx
        .serve(stdio())
        .await
        .context("Failed to start stdio MCP service")?;

    info!("{} {} listening on stdio", SERVER_NAME, SERVER_VERSION);

    let interrupted = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        quit = service.waiting() => {
            let reason = quit.context("MCP service task failed")?;
            debug!("MCP service ended: {:?}", reason);
        }
        _ = interrupted => {
            // Dropping the running service cancels it.
            info!("Interrupted, shutting down");
        }
    }

    Ok(())
}

impl ServerHandler for ToolContext {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let tools = self.tool_definitions().into_iter().map(mcp_tool).collect();
        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = request.arguments.map(Value::Object).unwrap_or(Value::Null);
        let reply = tools::execute_tool(self, &request.name, &arguments).await;
        Ok(call_result(reply))
    }
}

fn mcp_tool(def: ToolDefinition) -> Tool {
    let schema = match def.input_schema {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    };
    Tool::new(def.name, def.description, schema)
}

/// Tool failures travel as results with `isError`, never as JSON-RPC errors.
fn call_result(reply: ToolReply) -> CallToolResult {
    let content = vec![Content::text(reply.content)];
    if reply.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}
