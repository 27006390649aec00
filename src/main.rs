//! mcp-local-llm — MCP tool server backed by a local LLM.
//!
//! Usage:
//!   mcp-local-llm                 Serve MCP over stdio (same as `serve`)
//!   mcp-local-llm tools           List the exposed tools
//!   mcp-local-llm status          Probe the backend
//!   mcp-local-llm call <tool>     Invoke one tool and print the result
//!   mcp-local-llm config          Print the effective configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use mcp_local_llm::config::{self, LlmConfig};
use mcp_local_llm::server;
use mcp_local_llm::tools::{self, ToolContext};
use mcp_local_llm::{SERVER_NAME, SERVER_VERSION};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "mcp-local-llm")]
#[command(version)]
#[command(about = "MCP server that delegates text tasks to a local LLM")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to config.toml (defaults to the platform config directory).
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log level (debug, info, warn, error). Logs go to stderr.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve MCP over stdin/stdout.
    Serve,

    /// List the tools this server exposes.
    Tools,

    /// Check backend connectivity and available models.
    Status,

    /// Invoke a single tool and print its output.
    Call {
        /// Tool name, e.g. local_summarize.
        name: String,

        /// Tool arguments as a JSON object.
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// Print the effective configuration as TOML.
    Config,
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the protocol, so logs go to stderr
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli
        .config
        .as_deref()
        .map(config::resolve_path)
        .unwrap_or_else(config::default_config_path);
    let cfg = config::load_effective(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => cmd_serve(cfg).await,
        Commands::Tools => cmd_tools(&cfg),
        Commands::Status => cmd_status(cfg).await,
        Commands::Call { name, args } => cmd_call(cfg, &name, &args).await,
        Commands::Config => cmd_config(&cfg),
    }
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

async fn cmd_serve(cfg: LlmConfig) -> Result<()> {
    info!(
        "Backend {} (model: {}, max_tokens: {}, temperature: {})",
        cfg.base_url, cfg.default_model, cfg.default_max_tokens, cfg.default_temperature
    );
    let ctx = ToolContext::connect(cfg)?;
    server::serve_stdio(ctx).await?;

    info!("{} server stopped", SERVER_NAME);
    Ok(())
}

fn cmd_tools(cfg: &LlmConfig) -> Result<()> {
    println!();
    println!("{}", format!("=== {} {} tools ===", SERVER_NAME, SERVER_VERSION).bold());
    println!();
    for tool in tools::tool_definitions(cfg) {
        let required = tool.required_fields();
        let summary = tool.description.lines().next().unwrap_or_default();
        println!("  {}", tool.name.green().bold());
        println!("    {}", summary);
        if !required.is_empty() {
            println!("    {} {}", "required:".dimmed(), required.join(", "));
        }
        println!();
    }
    Ok(())
}

async fn cmd_status(cfg: LlmConfig) -> Result<()> {
    let ctx = ToolContext::connect(cfg)?;
    let reply = tools::execute_tool(&ctx, "local_status", &serde_json::Value::Null).await;
    println!("{}", reply.content);
    Ok(())
}

async fn cmd_call(cfg: LlmConfig, name: &str, args: &str) -> Result<()> {
    let args: serde_json::Value =
        serde_json::from_str(args).context("--args must be valid JSON")?;
    let ctx = ToolContext::connect(cfg)?;

    let reply = tools::execute_tool(&ctx, name, &args).await;
    if reply.is_error {
        eprintln!("{}", reply.content.red());
        std::process::exit(1);
    }
    println!("{}", reply.content);
    Ok(())
}

fn cmd_config(cfg: &LlmConfig) -> Result<()> {
    print!("{}", config::to_toml(cfg)?);
    Ok(())
}
