//! MCP (Model Context Protocol) server for the prompt store
//!
//! This module implements an MCP server using stdio transport, exposing
//! prompt search and retrieval to AI agents.
//!
//! ## Tools Exposed
//!
//! - `findprompt` - top 3 prompts ranked by keyword occurrences
//! - `getprompt` - full content of the first prompt whose name matches
//!
//! ## Usage
//!
//! ```rust,ignore
//! use prompts::{mcp::McpServer, AppContext};
//!
//! #[tokio::main]
//! async fn main() {
//!     let ctx = AppContext::new(".github/prompts").unwrap();
//!     McpServer::new(ctx).run_stdio().await.unwrap();
//! }
//! ```

mod protocol;
mod server;
pub mod tools;

pub use protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolContent, ToolDefinition, ToolResult,
    MCP_PROTOCOL_VERSION,
};
pub use server::McpServer;
