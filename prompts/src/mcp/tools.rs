//! MCP tool handlers: `findprompt` and `getprompt`
//!
//! Both tools answer with human-readable text. Missing directories, empty
//! corpora and misses are reported inside the text result rather than as
//! JSON-RPC errors; only malformed calls become protocol errors.

use super::protocol::{JsonRpcError, ToolDefinition, ToolResult};
use crate::context::AppContext;
use crate::error::Error;
use crate::fetch::FetchedDocument;
use crate::locate::LocateReport;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// Tool name of the keyword locator
pub const FIND_PROMPT: &str = "findprompt";
/// Tool name of the fetcher
pub const GET_PROMPT: &str = "getprompt";

/// Arguments of `findprompt`
#[derive(Debug, Deserialize)]
pub struct FindPromptArgs {
    /// Free-text keywords
    pub keywords: String,
}

/// Arguments of `getprompt`
#[derive(Debug, Deserialize)]
pub struct GetPromptArgs {
    /// Fragment of the prompt's file name
    pub prompt_name: String,
}

/// Get all tool definitions
pub fn get_tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: FIND_PROMPT.to_string(),
            description: "Fetch relevant prompts for the given keywords. Returns the top 3 markdown prompts ranked by keyword occurrences.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "keywords": {
                        "type": "string",
                        "description": "Whitespace-separated keywords, matched case-insensitively"
                    }
                },
                "required": ["keywords"]
            }),
        },
        ToolDefinition {
            name: GET_PROMPT.to_string(),
            description: "Fetch a specific prompt by name. Returns the full content of the first prompt whose file name contains the given text.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "prompt_name": {
                        "type": "string",
                        "description": "Full or partial file name, case-insensitive"
                    }
                },
                "required": ["prompt_name"]
            }),
        },
    ]
}

/// Handle tool call dispatch
///
/// Scans run on the blocking pool so concurrent callers do not stall the
/// runtime.
pub async fn handle_tool_call(
    ctx: &Arc<AppContext>,
    tool_name: &str,
    arguments: &Value,
) -> Result<ToolResult, JsonRpcError> {
    match tool_name {
        FIND_PROMPT => {
            let args: FindPromptArgs = parse_args(tool_name, arguments)?;
            let ctx = Arc::clone(ctx);
            tracing::info!("Searching for prompts: {:?}", args.keywords);
            let outcome = tokio::task::spawn_blocking(move || ctx.locate(&args.keywords))
                .await
                .map_err(|e| JsonRpcError::internal_error(format!("Search task failed: {}", e)))?;
            Ok(locate_result(outcome))
        }
        GET_PROMPT => {
            let args: GetPromptArgs = parse_args(tool_name, arguments)?;
            let ctx = Arc::clone(ctx);
            tracing::info!("Fetching prompt: {:?}", args.prompt_name);
            let outcome = tokio::task::spawn_blocking(move || ctx.fetch(&args.prompt_name))
                .await
                .map_err(|e| JsonRpcError::internal_error(format!("Fetch task failed: {}", e)))?;
            Ok(fetch_result(outcome))
        }
        _ => Err(JsonRpcError::invalid_params(format!(
            "Unknown tool: {}",
            tool_name
        ))),
    }
}

fn parse_args<T: DeserializeOwned>(tool_name: &str, arguments: &Value) -> Result<T, JsonRpcError> {
    serde_json::from_value(arguments.clone()).map_err(|e| {
        JsonRpcError::invalid_params(format!("Invalid arguments for {}: {}", tool_name, e))
    })
}

/// Render a locate outcome as tool text
pub fn locate_result(outcome: crate::Result<LocateReport>) -> ToolResult {
    let report = match outcome {
        Ok(report) => report,
        Err(Error::RootNotFound(_)) => {
            return ToolResult::error_text("Error: Prompts directory not found")
        }
        Err(Error::EmptyCorpus(_)) => {
            return ToolResult::text("No markdown files found in the prompts directory")
        }
        Err(e) => return ToolResult::error_text(format!("Error: {}", e)),
    };

    tracing::info!(
        "Scanned {} prompts, {} matched, {} skipped",
        report.scanned,
        report.matches.len(),
        report.skipped.len()
    );

    if report.matches.is_empty() {
        return ToolResult::text("No matching prompts found for the given keywords");
    }

    let mut text = format!("Top {} matching prompts:\n", report.matches.len());
    for (i, m) in report.matches.iter().enumerate() {
        text.push_str(&format!("{}. {} (score: {})\n", i + 1, m.name, m.score));
    }
    ToolResult::text(text)
}

/// Render a fetch outcome as tool text
pub fn fetch_result(outcome: crate::Result<FetchedDocument>) -> ToolResult {
    match outcome {
        Ok(fetched) => ToolResult::text(fetched.content),
        Err(Error::RootNotFound(_)) => ToolResult::error_text("Error: Prompts directory not found"),
        Err(e @ Error::NoMatch(_)) => ToolResult::text(e.to_string()),
        Err(Error::DocumentRead { path, reason }) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            ToolResult::error_text(format!(
                "Error: failed to read prompt '{}': {}",
                name, reason
            ))
        }
        Err(e) => ToolResult::error_text(format!("Error: {}", e)),
    }
}
