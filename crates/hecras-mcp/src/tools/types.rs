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

//! Shared types for MCP tools.

use serde::Deserialize;
use std::fmt;

// ============ Argument Structures ============

#[derive(Debug, Deserialize)]
pub struct ProjectArgs {
    pub project_path: String,
    pub ras_version: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QueryProjectArgs {
    pub project_path: String,
    pub ras_version: Option<String>,
    #[serde(default)]
    pub include_boundaries: bool,
}

#[derive(Debug, Deserialize)]
pub struct SummaryArgs {
    pub project_path: String,
    pub ras_version: Option<String>,
    #[serde(default)]
    pub show_rasmap: bool,
    #[serde(default = "default_true")]
    pub show_plan_df: bool,
    #[serde(default = "default_true")]
    pub show_geom_df: bool,
    #[serde(default = "default_true")]
    pub show_flow_df: bool,
    #[serde(default = "default_true")]
    pub show_unsteady_df: bool,
    #[serde(default)]
    pub show_boundaries: bool,
    /// Verbose tables with every known column.
    #[serde(default)]
    pub showmore: bool,
}

#[derive(Debug, Deserialize)]
pub struct ComputeMessagesArgs {
    pub project_path: String,
    pub plan_number: Option<PlanRef>,
    pub plan_name: Option<String>,
    /// Overrides the server's output token budget for this call.
    pub max_tokens: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct ProjectionArgs {
    pub project_path: String,
}

/// Plan number given either as `"01"` or `1`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PlanRef {
    Number(u64),
    Text(String),
}

impl fmt::Display for PlanRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

// ============ Default Value Functions ============

pub fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_defaults() {
        let args: SummaryArgs = serde_json::from_value(json!({"project_path": "/p"})).unwrap();
        assert!(!args.show_rasmap);
        assert!(args.show_plan_df && args.show_geom_df && args.show_flow_df && args.show_unsteady_df);
        assert!(!args.show_boundaries);
        assert!(!args.showmore);
        assert!(args.ras_version.is_none());
    }

    #[test]
    fn test_plan_ref_accepts_string_or_number() {
        let args: ComputeMessagesArgs =
            serde_json::from_value(json!({"project_path": "/p", "plan_number": 3})).unwrap();
        assert_eq!(args.plan_number, Some(PlanRef::Number(3)));

        let args: ComputeMessagesArgs =
            serde_json::from_value(json!({"project_path": "/p", "plan_number": "03"})).unwrap();
        assert_eq!(args.plan_number.unwrap().to_string(), "03");
    }
}
