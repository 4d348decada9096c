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

//! HEC-RAS Model Context Protocol (MCP) Server
//!
//! This crate provides an MCP server that lets AI/LLM systems inspect
//! HEC-RAS hydraulic models without running them. Key features:
//!
//! - **Query projects** for plans, geometries, steady and unsteady flows
//! - **Summarize projects** with compact or verbose tables and boundaries
//! - **Read compute messages** grouped into tasks and speeds, bounded to a
//!   token budget
//! - **Report projections** from RAS Mapper files

mod error;
mod protocol;
mod server;
pub mod tools;

pub use error::{McpError, McpResult};
pub use protocol::*;
pub use server::{McpServer, McpServerConfig, PROTOCOL_VERSION};
pub use tools::{execute_tool, get_tools, ToolName};

/// MCP Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server name for MCP protocol
pub const SERVER_NAME: &str = "hecras-mcp";
