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

//! Helper functions shared across MCP tools.

use crate::error::{McpError, McpResult};
use crate::server::McpServerConfig;
use hecras_core::{RasProject, Table};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::path::{Path, PathBuf};
use tracing::info;

/// Width of the `=` rule under response headers.
pub const HEADER_RULE: usize = 80;

/// Parse JSON arguments into a typed structure.
pub fn parse_args<T: for<'de> Deserialize<'de>>(args: Option<JsonValue>) -> McpResult<T> {
    let args = args.unwrap_or(JsonValue::Object(serde_json::Map::new()));
    serde_json::from_value(args).map_err(|e| McpError::InvalidArguments(e.to_string()))
}

/// Resolve a project folder argument.
///
/// Relative paths resolve against the configured root. With
/// `restrict_to_root` set, folders outside the root are rejected after
/// resolving `..` and symlinks.
pub fn resolve_project_path(config: &McpServerConfig, path: &str) -> McpResult<PathBuf> {
    let requested = Path::new(path);
    let resolved = if requested.is_absolute() {
        requested.to_path_buf()
    } else {
        config.root_path.join(requested)
    };

    if !resolved.is_dir() {
        return Err(McpError::ProjectNotFound(path.to_string()));
    }

    if config.restrict_to_root {
        let canonical = resolved.canonicalize()?;
        let canonical_root = config
            .root_path
            .canonicalize()
            .unwrap_or_else(|_| config.root_path.clone());
        if !canonical.starts_with(&canonical_root) {
            return Err(McpError::PathTraversal(path.to_string()));
        }
        return Ok(canonical);
    }

    Ok(resolved)
}

/// Resolve `path` and open the project in it.
pub fn open_project(
    config: &McpServerConfig,
    path: &str,
    ras_version: Option<&str>,
) -> McpResult<RasProject> {
    let folder = resolve_project_path(config, path)?;
    let ras_version = ras_version.unwrap_or(config.default_ras_version.as_str());
    info!("Initializing HEC-RAS project at: {}", folder.display());
    Ok(RasProject::open(folder, ras_version)?)
}

/// Response header lines: project name, path as given, optionally the
/// HEC-RAS version, and a rule.
pub fn project_header(project: &RasProject, project_path: &str, with_version: bool) -> Vec<String> {
    let mut lines = vec![
        format!("HEC-RAS Project: {}", project.name()),
        format!("Project Path: {}", project_path),
    ];
    if with_version {
        lines.push(format!("HEC-RAS Version: {}", project.ras_version()));
    }
    lines.push("=".repeat(HEADER_RULE));
    lines
}

/// Named table section, or a "No data available" line when empty.
pub fn table_to_text(table: &Table, max_rows: usize) -> String {
    if table.is_empty() {
        return format!("\n{}: No data available\n", table.name());
    }
    format!("\n{}:\n{}\n", table.name(), table.render(max_rows))
}
