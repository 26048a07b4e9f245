//! Prompt MCP Server
//!
//! A Model Context Protocol (MCP) server that lets AI agents search and read
//! the markdown prompts kept under `.github/prompts`, over stdio transport.
//!
//! ## Usage
//!
//! ```bash
//! # Serve on stdio with the default prompts directory
//! prompts-mcp
//!
//! # Custom root, five results per search, verbose logging
//! prompts-mcp --root docs/prompts --limit 5 -v
//! ```
//!
//! ## MCP Configuration
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "prompts": {
//!       "command": "prompts-mcp",
//!       "args": ["--root", "/path/to/repo/.github/prompts"]
//!     }
//!   }
//! }
//! ```
//!
//! ## Available Tools
//!
//! - **findprompt**: top 3 prompts ranked by keyword occurrences
//! - **getprompt**: full content of a prompt by partial file name

use anyhow::{Context, Result};
use clap::builder::RangedU64ValueParser;
use clap::Parser;
use prompts::mcp::McpServer;
use prompts::{AppContext, FetchOptions, LocateOptions, StoreOptions};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Prompt MCP Server - search and fetch markdown prompts via Model Context Protocol
#[derive(Parser, Debug)]
#[command(name = "prompts-mcp")]
#[command(
    version,
    about = "Prompt MCP Server - Model Context Protocol interface for markdown prompts"
)]
struct Args {
    /// Directory holding the prompt files (default: .github/prompts)
    #[arg(long, short = 'r', env = "PROMPTS_ROOT")]
    root: Option<PathBuf>,

    /// Number of prompts findprompt returns (at least 1)
    #[arg(
        long,
        default_value_t = prompts::DEFAULT_LIMIT,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    limit: usize,

    /// Skip prompts larger than this many bytes
    #[arg(long)]
    max_file_bytes: Option<u64>,

    /// Glob of paths to leave out (repeatable)
    #[arg(long)]
    exclude: Vec<String>,

    /// Let getprompt try the next matching name when a file cannot be read
    #[arg(long)]
    fallback_on_read_error: bool,

    /// Enable verbose logging (outputs to stderr)
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Args {
    fn build_context(&self) -> Result<AppContext> {
        let root = self.root.clone().unwrap_or_else(prompts::default_prompts_dir);
        if !root.is_dir() {
            tracing::warn!("Prompts directory {} does not exist yet", root.display());
        }

        let store = StoreOptions {
            exclude: self.exclude.clone(),
            max_file_bytes: self.max_file_bytes,
            ..Default::default()
        };
        let locate = LocateOptions { limit: self.limit };
        let fetch = FetchOptions {
            fallback_on_read_error: self.fallback_on_read_error,
        };

        AppContext::with_options(&root, store, locate, fetch)
            .with_context(|| format!("invalid configuration for {}", root.display()))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the protocol on stdio
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let ctx = args.build_context()?;
    tracing::info!(
        "Starting prompt MCP server with root: {}",
        ctx.store().root().display()
    );

    // Create and run the MCP server
    let server = McpServer::new(ctx);
    server.run_stdio().await?;

    Ok(())
}
