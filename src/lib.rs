//! mcp-local-llm — delegate text chores to a local LLM over MCP.
//!
//! Exposes summarize / draft / classify / extract / transform / complete /
//! status tools and fulfils each one with a single chat-completion request
//! against an OpenAI-compatible backend such as Ollama or Docker Model Runner.

pub mod backend;
pub mod config;
pub mod error;
pub mod server;
pub mod tools;
pub mod types;

/// Server name reported during the MCP handshake.
pub const SERVER_NAME: &str = "mcp-local-llm";

/// Server version reported during the MCP handshake.
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
