// Dweve HEC-RAS MCP - HEC-RAS project query server
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! MCP Server implementation.

use crate::error::McpResult;
use crate::protocol::*;
use crate::tools::{execute_tool, get_tools};
use crate::{SERVER_NAME, VERSION};
use hecras_core::compute_messages::DEFAULT_MAX_TOKENS;
use hecras_core::{DEFAULT_MAX_ROWS, DEFAULT_RAS_VERSION};
use serde::Serialize;
use serde_json::{json, Value};
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader as AsyncBufReader};
use tracing::{debug, error, info, warn};

/// MCP protocol revision spoken by the server.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP Server configuration.
#[derive(Debug, Clone)]
pub struct McpServerConfig {
    /// Root path that relative project paths resolve against.
    pub root_path: PathBuf,

    /// Server name reported in protocol handshake.
    pub name: String,

    /// Server version reported in protocol handshake.
    pub version: String,

    /// HEC-RAS version used when a tool call does not pass `ras_version`.
    pub default_ras_version: String,

    /// Output budget for compute messages, in tokens.
    ///
    /// Callers can override it per request with `max_tokens`.
    /// Default: 10,000 tokens.
    pub max_output_tokens: usize,

    /// Maximum rows rendered per table before the middle is elided.
    /// Default: 100 rows.
    pub max_table_rows: usize,

    /// Reject project folders outside `root_path`.
    pub restrict_to_root: bool,
}

impl Default for McpServerConfig {
    fn default() -> Self {
        Self {
            root_path: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            name: SERVER_NAME.to_string(),
            version: VERSION.to_string(),
            default_ras_version: DEFAULT_RAS_VERSION.to_string(),
            max_output_tokens: DEFAULT_MAX_TOKENS,
            max_table_rows: DEFAULT_MAX_ROWS,
            restrict_to_root: false,
        }
    }
}

/// HEC-RAS MCP Server.
///
/// Implements the Model Context Protocol (MCP) over JSON-RPC 2.0 on stdio.
/// Requests are handled one at a time in arrival order.
pub struct McpServer {
    config: McpServerConfig,

    /// Set by `initialize`, cleared by `shutdown`.
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use hecras_mcp::{McpServer, McpServerConfig};
    /// use std::path::PathBuf;
    ///
    /// let config = McpServerConfig {
    ///     root_path: PathBuf::from("/data/ras"),
    ///     max_output_tokens: 20_000,
    ///     ..Default::default()
    /// };
    /// let server = McpServer::new(config);
    /// assert!(!server.is_initialized());
    /// ```
    pub fn new(config: McpServerConfig) -> Self {
        Self {
            config,
            initialized: false,
        }
    }

    /// Create a new MCP server with default config and specified root path.
    pub fn with_root(root_path: PathBuf) -> Self {
        Self::new(McpServerConfig {
            root_path,
            ..Default::default()
        })
    }

    pub fn config(&self) -> &McpServerConfig {
        &self.config
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the server using stdio transport (synchronous).
    ///
    /// Reads one JSON-RPC request per line from stdin and writes one response
    /// per line to stdout until stdin is closed. Notifications get no reply.
    ///
    /// # Errors
    ///
    /// Returns an error if reading stdin, writing stdout or serializing a
    /// response fails.
    pub fn run_stdio(&mut self) -> McpResult<()> {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        let reader = BufReader::new(stdin.lock());

        info!("HEC-RAS MCP Server starting on stdio");

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            debug!("Received: {}", line);

            if let Some(response) = self.handle_line(line) {
                let response_str = serde_json::to_string(&response)?;
                debug!("Sending: {}", response_str);
                writeln!(stdout, "{}", response_str)?;
                stdout.flush()?;
            }
        }

        info!("stdin closed, stopping");
        Ok(())
    }

    /// Run the server using stdio transport (asynchronous).
    ///
    /// Same protocol as [`run_stdio`](Self::run_stdio), driven by Tokio.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hecras_mcp::{McpServer, McpServerConfig};
    ///
    /// #[tokio::main]
    /// async fn main() {
    ///     let mut server = McpServer::new(McpServerConfig::default());
    ///     server.run_stdio_async().await.expect("Server failed");
    /// }
    /// ```
    pub async fn run_stdio_async(&mut self) -> McpResult<()> {
        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut reader = AsyncBufReader::new(stdin);

        info!("HEC-RAS MCP Server starting on stdio (async)");

        let mut line = String::new();
        loop {
            line.clear();
            match reader.read_line(&mut line).await {
                Ok(0) => break, // EOF
                Ok(_) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    debug!("Received: {}", line);

                    if let Some(response) = self.handle_line(line) {
                        let response_str = serde_json::to_string(&response)?;
                        debug!("Sending: {}", response_str);
                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;
                    }
                }
                Err(e) => {
                    error!("Read error: {}", e);
                    break;
                }
            }
        }

        info!("stdin closed, stopping");
        Ok(())
    }

    /// Handle one raw line of input. Returns `None` for notifications.
    pub fn handle_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => {
                let is_notification = request.id.is_none();
                let response = self.handle_request(request);
                (!is_notification).then_some(response)
            }
            Err(e) => {
                warn!("Unparseable request: {}", e);
                Some(JsonRpcResponse::error(
                    None,
                    -32700,
                    format!("Parse error: {}", e),
                    None,
                ))
            }
        }
    }

    /// Handle a single JSON-RPC request.
    ///
    /// # Supported Methods
    ///
    /// - `initialize` - Protocol handshake
    /// - `initialized` / `notifications/initialized` - Handshake completion
    /// - `shutdown` - Graceful server shutdown
    /// - `tools/list` - List available HEC-RAS tools
    /// - `tools/call` - Execute a specific tool
    /// - `ping` - Health check endpoint
    ///
    /// Unknown methods return a "Method not found" error (-32601).
    pub fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let id = request.id.clone();

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id, request.params),
            "initialized" | "notifications/initialized" => self.handle_initialized(id),
            "shutdown" => self.handle_shutdown(id),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params),
            "ping" => JsonRpcResponse::success(id, json!({})),
            method => {
                warn!("Unknown method: {}", method);
                JsonRpcResponse::error(id, -32601, format!("Method not found: {}", method), None)
            }
        }
    }

    fn handle_initialize(&mut self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: InitializeParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        -32602,
                        format!("Invalid params: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(id, -32602, "Missing params".to_string(), None);
            }
        };

        self.initialized = true;
        info!(
            "Server initialized by {} {} (protocol {})",
            params.client_info.name, params.client_info.version, params.protocol_version
        );

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: Some(false),
                }),
            },
            server_info: ServerInfo {
                name: self.config.name.clone(),
                version: self.config.version.clone(),
            },
        };

        success(id, &result)
    }

    fn handle_initialized(&self, id: Option<Value>) -> JsonRpcResponse {
        info!("Client sent initialized notification");
        JsonRpcResponse::success(id, json!({}))
    }

    fn handle_shutdown(&mut self, id: Option<Value>) -> JsonRpcResponse {
        info!("Server shutting down");
        self.initialized = false;
        JsonRpcResponse::success(id, json!({}))
    }

    fn handle_tools_list(&self, id: Option<Value>) -> JsonRpcResponse {
        success(id, &ListToolsResult { tools: get_tools() })
    }

    /// Execute a tool. Tool failures are returned as successful responses
    /// with `isError: true`; only malformed params produce JSON-RPC errors.
    fn handle_tools_call(&self, id: Option<Value>, params: Option<Value>) -> JsonRpcResponse {
        let params: CallToolParams = match params {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        -32602,
                        format!("Invalid params: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(id, -32602, "Missing params".to_string(), None);
            }
        };

        info!("Tool call: {}", params.name);
        let result = match execute_tool(&params.name, params.arguments, &self.config) {
            Ok(result) => result,
            Err(e) => {
                error!("Tool {} failed: {}", params.name, e);
                CallToolResult::error(format!("Error: {}", e))
            }
        };

        success(id, &result)
    }
}

/// Serialize `result` into a success response.
fn success<T: Serialize>(id: Option<Value>, result: &T) -> JsonRpcResponse {
    match serde_json::to_value(result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, -32603, format!("Internal error: {}", e), None),
    }
}
