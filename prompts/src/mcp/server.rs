//! MCP server implementation
//!
//! Implements the stdio transport for the Model Context Protocol: one
//! newline-delimited JSON-RPC message per line.

use super::protocol::{
    JsonRpcError, JsonRpcRequest, JsonRpcResponse, ServerCapabilities, ServerInfo,
    JSONRPC_VERSION, MCP_PROTOCOL_VERSION,
};
use super::tools::{get_tool_definitions, handle_tool_call};
use crate::context::AppContext;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

/// MCP server for the prompt store
pub struct McpServer {
    ctx: Arc<AppContext>,
}

impl McpServer {
    /// Create a server over an application context
    pub fn new(ctx: AppContext) -> Self {
        Self { ctx: Arc::new(ctx) }
    }

    /// Serve a single client on stdin/stdout until EOF
    pub async fn run_stdio(&self) -> crate::Result<()> {
        tracing::info!(
            "Prompt MCP server started on stdio (protocol version {})",
            MCP_PROTOCOL_VERSION
        );
        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.serve(reader, writer).await
    }

    /// Handle requests from `reader`, writing responses to `writer`, until EOF
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> crate::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line).await? == 0 {
                tracing::info!("EOF received, shutting down");
                break;
            }

            let message = line.trim();
            if message.is_empty() {
                continue;
            }
            tracing::debug!("Received: {}", message);

            let response = match serde_json::from_str::<JsonRpcRequest>(message) {
                Ok(request) => self.handle_request(request).await,
                Err(e) => Some(JsonRpcResponse::error(
                    None,
                    JsonRpcError::parse_error(format!("Parse error: {}", e)),
                )),
            };

            if let Some(response) = response {
                let response_json = serde_json::to_string(&response)?;
                writer.write_all(response_json.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
                tracing::debug!("Sent: {}", response_json);
            }
        }

        Ok(())
    }

    /// Handle a single JSON-RPC message; notifications get no response
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                request.id,
                JsonRpcError::invalid_request(format!(
                    "Unsupported jsonrpc version: {}",
                    request.jsonrpc
                )),
            ));
        }

        if request.is_notification() {
            tracing::debug!("Notification: {}", request.method);
            return None;
        }

        let result = match request.method.as_str() {
            "initialize" => Ok(self.handle_initialize()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": get_tool_definitions() })),
            "tools/call" => self.handle_tools_call(&request.params).await,
            _ => Err(JsonRpcError::method_not_found(&request.method)),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(error) => JsonRpcResponse::error(request.id, error),
        })
    }

    fn handle_initialize(&self) -> Value {
        json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": ServerCapabilities::default(),
            "serverInfo": ServerInfo::default()
        })
    }

    async fn handle_tools_call(&self, params: &Option<Value>) -> Result<Value, JsonRpcError> {
        let params = params
            .as_ref()
            .ok_or_else(|| JsonRpcError::invalid_params("Missing params"))?;

        let tool_name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| JsonRpcError::invalid_params("Missing tool name"))?;

        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        let result = handle_tool_call(&self.ctx, tool_name, &arguments).await?;

        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn request(id: Option<Value>, method: &str, params: Option<Value>) -> JsonRpcRequest {
        JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id,
            method: method.to_string(),
            params,
        }
    }

    fn create_test_server() -> (McpServer, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("deploy.md"), "deploy deploy").unwrap();
        let server = McpServer::new(AppContext::new(dir.path()).unwrap());
        (server, dir)
    }

    #[tokio::test]
    async fn test_initialize_response() {
        let (server, _dir) = create_test_server();
        let response = server
            .handle_request(request(Some(json!(1)), "initialize", None))
            .await
            .unwrap();
        let result = response.result.unwrap();

        assert_eq!(result["protocolVersion"], MCP_PROTOCOL_VERSION);
        assert!(result["capabilities"]["tools"].is_object());
        assert_eq!(result["serverInfo"]["name"], "prompt-server");
    }

    #[tokio::test]
    async fn test_tools_list() {
        let (server, _dir) = create_test_server();
        let response = server
            .handle_request(request(Some(json!(2)), "tools/list", None))
            .await
            .unwrap();
        let tools = response.result.unwrap()["tools"].as_array().unwrap().clone();

        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "findprompt");
        assert!(tools[1]["inputSchema"]["properties"]["prompt_name"].is_object());
    }

    #[tokio::test]
    async fn test_tools_call_findprompt() {
        let (server, _dir) = create_test_server();
        let params = json!({"name": "findprompt", "arguments": {"keywords": "deploy"}});
        let response = server
            .handle_request(request(Some(json!(3)), "tools/call", Some(params)))
            .await
            .unwrap();
        let result = response.result.unwrap();

        assert_eq!(
            result["content"][0]["text"],
            "Top 1 matching prompts:\n1. deploy.md (score: 2)\n"
        );
    }

    #[tokio::test]
    async fn test_tools_call_missing_name() {
        let (server, _dir) = create_test_server();
        let response = server
            .handle_request(request(Some(json!(4)), "tools/call", Some(json!({"arguments": {}}))))
            .await
            .unwrap();

        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let (server, _dir) = create_test_server();
        let response = server
            .handle_request(request(Some(json!(5)), "unknown/method", None))
            .await
            .unwrap();

        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_ping() {
        let (server, _dir) = create_test_server();
        let response = server
            .handle_request(request(Some(json!(6)), "ping", None))
            .await
            .unwrap();

        assert!(response.result.is_some());
        assert!(response.error.is_none());
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let (server, _dir) = create_test_server();
        let response = server
            .handle_request(request(None, "notifications/initialized", None))
            .await;

        assert!(response.is_none());
    }

    #[tokio::test]
    async fn test_wrong_jsonrpc_version() {
        let (server, _dir) = create_test_server();
        let mut req = request(Some(json!(8)), "ping", None);
        req.jsonrpc = "1.0".to_string();
        let response = server.handle_request(req).await.unwrap();

        assert_eq!(response.error.unwrap().code, -32600);
    }

    #[tokio::test]
    async fn test_serve_parse_error_and_eof() {
        let (server, _dir) = create_test_server();
        let input = b"not json\n\n{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\"}\n";
        let mut output = Vec::new();

        server.serve(&input[..], &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);

        let parse_error: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parse_error["error"]["code"], -32700);
        assert!(parse_error.get("id").unwrap().is_null());
        assert!(lines[1].contains("\"id\":1"));
    }
}
