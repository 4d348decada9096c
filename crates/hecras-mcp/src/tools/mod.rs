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

//! HEC-RAS tools for MCP server.
//!
//! Available tools:
//! - `query_hecras_project`: Plans, geometries, flows and optionally boundaries
//! - `get_hecras_plans`: Plans only
//! - `get_hecras_geometries`: Geometries only
//! - `hecras_project_summary`: Configurable summary with compact/verbose tables
//! - `get_compute_messages`: Formatted compute log of a plan
//! - `get_projection_info`: Projection file and WKT from RAS Mapper

mod helpers;
mod mapping;
mod project;
mod results;
#[macro_use]
mod schema_macros;
mod types;

pub use helpers::{resolve_project_path, table_to_text};
pub use mapping::execute_projection_info;
pub use project::{
    execute_get_geometries, execute_get_plans, execute_project_summary, execute_query_project,
};
pub use results::execute_compute_messages;

use crate::error::{McpError, McpResult};
use crate::protocol::{CallToolResult, Tool};
use crate::server::McpServerConfig;
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Every tool the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    QueryProject,
    GetPlans,
    GetGeometries,
    ProjectSummary,
    ComputeMessages,
    ProjectionInfo,
}

impl ToolName {
    pub const ALL: [ToolName; 6] = [
        ToolName::QueryProject,
        ToolName::GetPlans,
        ToolName::GetGeometries,
        ToolName::ProjectSummary,
        ToolName::ComputeMessages,
        ToolName::ProjectionInfo,
    ];

    /// Wire name used in `tools/list` and `tools/call`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::QueryProject => "query_hecras_project",
            Self::GetPlans => "get_hecras_plans",
            Self::GetGeometries => "get_hecras_geometries",
            Self::ProjectSummary => "hecras_project_summary",
            Self::ComputeMessages => "get_compute_messages",
            Self::ProjectionInfo => "get_projection_info",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::QueryProject => "Query a HEC-RAS project and return information about plans, geometries, flows, and boundaries",
            Self::GetPlans => "Get only the plans information from a HEC-RAS project",
            Self::GetGeometries => "Get only the geometries information from a HEC-RAS project",
            Self::ProjectSummary => "Summarize a HEC-RAS project with selectable sections. Tables are compact unless showmore is set.",
            Self::ComputeMessages => "Get the compute messages of a plan run, grouped into general messages, computation tasks and computation speed. Long logs are truncated to a token budget.",
            Self::ProjectionInfo => "Get the spatial projection (WKT) used by a HEC-RAS project from its RAS Mapper file",
        }
    }

    fn input_schema(self) -> JsonValue {
        match self {
            Self::QueryProject => tool_schema! {
                required: ["project_path"],
                properties: {
                    project_path: project_path_arg!(),
                    ras_version: ras_version_arg!(),
                    include_boundaries: schema_bool!("Include boundary conditions data (can be large)", default: false)
                }
            },
            Self::GetPlans | Self::GetGeometries => tool_schema! {
                required: ["project_path"],
                properties: {
                    project_path: project_path_arg!(),
                    ras_version: ras_version_arg!()
                }
            },
            Self::ProjectSummary => tool_schema! {
                required: ["project_path"],
                properties: {
                    project_path: project_path_arg!(),
                    ras_version: ras_version_arg!(),
                    show_rasmap: schema_bool!("Include RAS Mapper projection and layers", default: false),
                    show_plan_df: schema_bool!("Include plans", default: true),
                    show_geom_df: schema_bool!("Include geometries", default: true),
                    show_flow_df: schema_bool!("Include steady flows", default: true),
                    show_unsteady_df: schema_bool!("Include unsteady flows", default: true),
                    show_boundaries: schema_bool!("Include boundary conditions (can be large)", default: false),
                    showmore: schema_bool!("Show every column instead of the compact view", default: false)
                }
            },
            Self::ComputeMessages => tool_schema! {
                required: ["project_path"],
                properties: {
                    project_path: project_path_arg!(),
                    plan_number: schema_string_or_integer!("Plan number (e.g., '01' or 1)"),
                    plan_name: schema_string!("Plan title or short identifier, used when plan_number is absent"),
                    max_tokens: schema_integer!("Approximate output budget in tokens (4 characters per token)", minimum: 1)
                }
            },
            Self::ProjectionInfo => tool_schema! {
                required: ["project_path"],
                properties: {
                    project_path: project_path_arg!()
                }
            },
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolName {
    type Err = McpError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.as_str() == name)
            .ok_or_else(|| McpError::ToolNotFound(name.to_string()))
    }
}

/// Get all available HEC-RAS tools.
pub fn get_tools() -> Vec<Tool> {
    ToolName::ALL
        .into_iter()
        .map(|tool| Tool {
            name: tool.as_str().to_string(),
            description: tool.description().to_string(),
            input_schema: tool.input_schema(),
        })
        .collect()
}

/// Execute a tool by name.
pub fn execute_tool(
    name: &str,
    arguments: Option<JsonValue>,
    config: &McpServerConfig,
) -> McpResult<CallToolResult> {
    let tool: ToolName = name.parse()?;
    debug!("Executing tool: {}", tool);

    match tool {
        ToolName::QueryProject => execute_query_project(arguments, config),
        ToolName::GetPlans => execute_get_plans(arguments, config),
        ToolName::GetGeometries => execute_get_geometries(arguments, config),
        ToolName::ProjectSummary => execute_project_summary(arguments, config),
        ToolName::ComputeMessages => execute_compute_messages(arguments, config),
        ToolName::ProjectionInfo => execute_projection_info(arguments, config),
    }
}
