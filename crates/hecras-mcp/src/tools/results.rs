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

//! Compute message tool.

use super::helpers::{open_project, parse_args};
use super::types::ComputeMessagesArgs;
use crate::error::{McpError, McpResult};
use crate::protocol::CallToolResult;
use crate::server::McpServerConfig;
use hecras_core::{
    format_compute_messages, read_compute_messages, FormatConfig, COMPUTE_MESSAGES_NOT_FOUND,
};
use serde_json::Value as JsonValue;
use tracing::info;

/// Execute `get_compute_messages`.
pub fn execute_compute_messages(
    args: Option<JsonValue>,
    config: &McpServerConfig,
) -> McpResult<CallToolResult> {
    let args: ComputeMessagesArgs = parse_args(args)?;

    let selector = match (&args.plan_number, &args.plan_name) {
        (Some(number), _) => number.to_string(),
        (None, Some(name)) => name.clone(),
        (None, None) => {
            return Err(McpError::InvalidArguments(
                "either plan_number or plan_name is required".to_string(),
            ))
        }
    };

    let max_tokens = args.max_tokens.unwrap_or(config.max_output_tokens);
    if max_tokens == 0 {
        return Err(McpError::InvalidArguments(
            "max_tokens must be greater than zero".to_string(),
        ));
    }

    let project = open_project(config, &args.project_path, None)?;
    let plan = project.find_plan(&selector)?;

    let Some(log) = read_compute_messages(&project, plan)? else {
        return Ok(CallToolResult::text(COMPUTE_MESSAGES_NOT_FOUND));
    };

    info!(
        "Formatting compute messages for plan {} ({} bytes)",
        plan.number,
        log.text.len()
    );
    let format = FormatConfig::from_token_budget(max_tokens);
    Ok(CallToolResult::text(format_compute_messages(
        &log.text,
        &log.source_label(),
        &format,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Content;
    use hecras_test::ProjectFixture;
    use serde_json::json;

    fn text(result: &CallToolResult) -> &str {
        match &result.content[0] {
            Content::Text { text } => text,
        }
    }

    fn config(fixture: &ProjectFixture) -> McpServerConfig {
        McpServerConfig {
            root_path: fixture.path().to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_compute_messages_by_number() {
        let fixture = ProjectFixture::muncie();
        let args = json!({ "project_path": ".", "plan_number": "03" });

        let result = execute_compute_messages(Some(args), &config(&fixture)).unwrap();
        let text = text(&result);
        assert!(text.starts_with("Compute Messages from: Muncie.p03.computeMsgs.txt\n"));
        assert!(text.contains("Computation Tasks:"));
        assert!(text.contains("Computation Speed:"));
    }

    #[test]
    fn test_compute_messages_by_name() {
        let fixture = ProjectFixture::muncie();
        let args = json!({ "project_path": ".", "plan_name": "9-SAs" });

        let result = execute_compute_messages(Some(args), &config(&fixture)).unwrap();
        assert!(text(&result).contains("General Messages:"));
    }

    #[test]
    fn test_compute_messages_missing_log() {
        let fixture = ProjectFixture::muncie();
        let args = json!({ "project_path": ".", "plan_number": 1 });

        let result = execute_compute_messages(Some(args), &config(&fixture)).unwrap();
        assert_eq!(text(&result), COMPUTE_MESSAGES_NOT_FOUND);
        assert!(result.is_error.is_none());
    }

    #[test]
    fn test_compute_messages_token_override() {
        let fixture = ProjectFixture::muncie();
        let long: String = (0..200)
            .map(|i| format!("Message {}: {}\n", i, "x".repeat(10)))
            .collect();
        fixture.write("Muncie.p01.computeMsgs.txt", &long);

        let args = json!({ "project_path": ".", "plan_number": "01", "max_tokens": 1000 });
        let result = execute_compute_messages(Some(args), &config(&fixture)).unwrap();
        let text = text(&result);

        assert!(text.chars().count() <= 4000);
        assert!(text.contains("[OUTPUT TRUNCATED: Response exceeded 1,000 tokens."));
        assert!(text.ends_with(&format!("{:<39} : {}", "Message 199", "x".repeat(10))));
    }

    #[test]
    fn test_compute_messages_requires_plan() {
        let fixture = ProjectFixture::muncie();
        let result = execute_compute_messages(Some(json!({ "project_path": "." })), &config(&fixture));
        assert!(matches!(result, Err(McpError::InvalidArguments(_))));

        let args = json!({ "project_path": ".", "plan_number": "03", "max_tokens": 0 });
        let result = execute_compute_messages(Some(args), &config(&fixture));
        assert!(matches!(result, Err(McpError::InvalidArguments(_))));
    }

    #[test]
    fn test_compute_messages_unknown_plan() {
        let fixture = ProjectFixture::muncie();
        let args = json!({ "project_path": ".", "plan_number": "09" });
        let result = execute_compute_messages(Some(args), &config(&fixture));
        assert!(matches!(result, Err(McpError::Ras(_))));
    }
}
