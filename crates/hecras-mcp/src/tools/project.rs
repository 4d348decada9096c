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

//! Project query tools: full query, plans, geometries and summary.

use super::helpers::{open_project, parse_args, project_header, table_to_text};
use super::types::{ProjectArgs, QueryProjectArgs, SummaryArgs};
use crate::error::McpResult;
use crate::protocol::CallToolResult;
use crate::server::McpServerConfig;
use hecras_core::{RasMap, RasProject};
use serde_json::Value as JsonValue;
use tracing::debug;

/// Execute `query_hecras_project`.
pub fn execute_query_project(
    args: Option<JsonValue>,
    config: &McpServerConfig,
) -> McpResult<CallToolResult> {
    let args: QueryProjectArgs = parse_args(args)?;
    let project = open_project(config, &args.project_path, args.ras_version.as_deref())?;
    let rows = config.max_table_rows;

    let mut parts = project_header(&project, &args.project_path, true);
    parts.push(table_to_text(&project.plan_table(false), rows));
    parts.push(table_to_text(&project.geometry_table(false), rows));
    parts.push(table_to_text(&project.flow_table(false), rows));
    parts.push(table_to_text(&project.unsteady_table(false), rows));
    if args.include_boundaries {
        parts.push(table_to_text(&project.boundaries_table(), rows));
    }

    Ok(CallToolResult::text(parts.join("\n")))
}

/// Execute `get_hecras_plans`.
pub fn execute_get_plans(
    args: Option<JsonValue>,
    config: &McpServerConfig,
) -> McpResult<CallToolResult> {
    let args: ProjectArgs = parse_args(args)?;
    let project = open_project(config, &args.project_path, args.ras_version.as_deref())?;

    let mut parts = project_header(&project, &args.project_path, false);
    let plans = project.plan_table(false);
    if plans.is_empty() {
        parts.push("\nNo plan data available".to_string());
    } else {
        parts.push(table_to_text(&plans, config.max_table_rows));
    }

    Ok(CallToolResult::text(parts.join("\n")))
}

/// Execute `get_hecras_geometries`.
pub fn execute_get_geometries(
    args: Option<JsonValue>,
    config: &McpServerConfig,
) -> McpResult<CallToolResult> {
    let args: ProjectArgs = parse_args(args)?;
    let project = open_project(config, &args.project_path, args.ras_version.as_deref())?;

    let mut parts = project_header(&project, &args.project_path, false);
    let geometries = project.geometry_table(false);
    if geometries.is_empty() {
        parts.push("\nNo geometry data available".to_string());
    } else {
        parts.push(table_to_text(&geometries, config.max_table_rows));
    }

    Ok(CallToolResult::text(parts.join("\n")))
}

/// Execute `hecras_project_summary`.
pub fn execute_project_summary(
    args: Option<JsonValue>,
    config: &McpServerConfig,
) -> McpResult<CallToolResult> {
    let args: SummaryArgs = parse_args(args)?;
    let project = open_project(config, &args.project_path, args.ras_version.as_deref())?;
    let rows = config.max_table_rows;
    let verbose = args.showmore;

    let mut parts = project_header(&project, &args.project_path, true);
    if let Some(title) = project.title() {
        parts.push(format!("Project Title: {}", title));
    }
    if let Some(units) = project.units() {
        parts.push(format!("Units: {}", units));
    }
    if let Some(plan) = project.current_plan() {
        parts.push(format!("Current Plan: {}", plan));
    }

    if args.show_rasmap {
        parts.push(rasmap_section(&project, rows)?);
    }
    if args.show_plan_df {
        parts.push(table_to_text(&project.plan_table(verbose), rows));
    }
    if args.show_geom_df {
        parts.push(table_to_text(&project.geometry_table(verbose), rows));
    }
    if args.show_flow_df {
        parts.push(table_to_text(&project.flow_table(verbose), rows));
    }
    if args.show_unsteady_df {
        parts.push(table_to_text(&project.unsteady_table(verbose), rows));
    }
    if args.show_boundaries {
        parts.push(table_to_text(&project.boundaries_table(), rows));
    }

    debug!("Summary for {} has {} parts", project.name(), parts.len());
    Ok(CallToolResult::text(parts.join("\n")))
}

fn rasmap_section(project: &RasProject, rows: usize) -> McpResult<String> {
    let Some(map) = RasMap::load(project)? else {
        return Ok("\nRAS MAPPER: No data available\n".to_string());
    };

    let mut section = format!("\nRAS MAPPER:\nFile: {}\n", map.path.display());
    match &map.projection {
        Some(projection) => section.push_str(&format!("Projection File: {}\n", projection.display())),
        None => section.push_str("Projection File: None\n"),
    }
    section.push_str(&table_to_text(&map.layers_table(), rows));
    Ok(section)
}
