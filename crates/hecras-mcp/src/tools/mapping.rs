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

//! Spatial projection tool.

use super::helpers::{open_project, parse_args, project_header};
use super::types::ProjectionArgs;
use crate::error::McpResult;
use crate::protocol::CallToolResult;
use crate::server::McpServerConfig;
use hecras_core::RasMap;
use serde_json::Value as JsonValue;

const NO_PROJECTION: &str = "No projection information found";

/// Execute `get_projection_info`.
pub fn execute_projection_info(
    args: Option<JsonValue>,
    config: &McpServerConfig,
) -> McpResult<CallToolResult> {
    let args: ProjectionArgs = parse_args(args)?;
    let project = open_project(config, &args.project_path, None)?;

    let mut parts = project_header(&project, &args.project_path, false);

    let map = RasMap::load(&project)?;
    let projection = match &map {
        Some(map) => map.projection.as_ref().zip(map.projection_wkt()?),
        None => None,
    };

    match projection {
        Some((path, wkt)) => {
            parts.push(format!("\nProjection File: {}", path.display()));
            parts.push(format!("\nWKT:\n{}", wkt));
        }
        None => parts.push(format!("\n{}", NO_PROJECTION)),
    }

    Ok(CallToolResult::text(parts.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Content;
    use hecras_test::ProjectFixture;
    use serde_json::json;

    fn text(result: &CallToolResult) -> String {
        match &result.content[0] {
            Content::Text { text } => text.clone(),
        }
    }

    fn config(fixture: &ProjectFixture) -> McpServerConfig {
        McpServerConfig {
            root_path: fixture.path().to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_projection_from_rasmap() {
        let fixture = ProjectFixture::muncie();
        let result = execute_projection_info(Some(json!({ "project_path": "." })), &config(&fixture)).unwrap();
        let text = text(&result);

        assert!(text.contains("Projection File: "));
        assert!(text.contains("Albers.prj"));
        assert!(text.contains("WKT:\nPROJCS["));
    }

    #[test]
    fn test_projection_missing() {
        let fixture = ProjectFixture::muncie();
        fixture.remove("Albers.prj");
        let cfg = config(&fixture);

        let result = execute_projection_info(Some(json!({ "project_path": "." })), &cfg).unwrap();
        assert!(text(&result).ends_with(NO_PROJECTION));

        fixture.remove("Muncie.rasmap");
        let result = execute_projection_info(Some(json!({ "project_path": "." })), &cfg).unwrap();
        assert!(text(&result).ends_with(NO_PROJECTION));
    }
}
