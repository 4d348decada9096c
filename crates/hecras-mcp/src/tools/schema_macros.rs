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

//! Declarative macros for JSON schema generation.
//!
//! Tool input schemas are plain JSON Schema objects. The macros keep the
//! definitions in `tools/mod.rs` short:
//!
//! ```text
//! tool_schema! {
//!     required: ["project_path"],
//!     properties: {
//!         project_path: project_path_arg!(),
//!         ras_version: ras_version_arg!(),
//!         showmore: schema_bool!("Show every column", default: false)
//!     }
//! }
//! ```

/// Generate a JSON schema object with type "string" and description.
///
/// # Usage
/// ```text
/// schema_string!("Plan title or short identifier")
/// schema_string!("HEC-RAS version", default: "6.6")
/// ```
#[macro_export]
macro_rules! schema_string {
    ($description:expr) => {
        serde_json::json!({
            "type": "string",
            "description": $description
        })
    };
    ($description:expr, default: $default:expr) => {
        serde_json::json!({
            "type": "string",
            "description": $description,
            "default": $default
        })
    };
}

/// Generate a JSON schema object with type "boolean" and optional default.
#[macro_export]
macro_rules! schema_bool {
    ($description:expr) => {
        serde_json::json!({
            "type": "boolean",
            "description": $description
        })
    };
    ($description:expr, default: $default:expr) => {
        serde_json::json!({
            "type": "boolean",
            "description": $description,
            "default": $default
        })
    };
}

/// Generate a JSON schema object with type "integer" and a lower bound.
///
/// # Usage
/// ```text
/// schema_integer!("Token budget", minimum: 1)
/// ```
#[macro_export]
macro_rules! schema_integer {
    ($description:expr, minimum: $min:expr) => {
        serde_json::json!({
            "type": "integer",
            "description": $description,
            "minimum": $min
        })
    };
}

/// Generate a JSON schema accepting either a string or an integer.
#[macro_export]
macro_rules! schema_string_or_integer {
    ($description:expr) => {
        serde_json::json!({
            "type": ["string", "integer"],
            "description": $description
        })
    };
}

/// Generate a complete tool schema with properties and required fields.
#[macro_export]
macro_rules! tool_schema {
    (
        required: [$($req:expr),* $(,)?],
        properties: {
            $($field:ident: $schema:expr),+ $(,)?
        }
    ) => {
        serde_json::json!({
            "type": "object",
            "properties": {
                $(stringify!($field): $schema),+
            },
            "required": [$($req),*]
        })
    };
}

/// Schema for the `project_path` argument shared by every tool.
#[macro_export]
macro_rules! project_path_arg {
    () => {
        $crate::schema_string!("Full path to the HEC-RAS project folder")
    };
}

/// Schema for the `ras_version` argument.
#[macro_export]
macro_rules! ras_version_arg {
    () => {
        $crate::schema_string!(
            "HEC-RAS version (e.g., '6.5', '6.6')",
            default: hecras_core::DEFAULT_RAS_VERSION
        )
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_tool_schema_required_and_properties() {
        let schema = tool_schema! {
            required: ["project_path"],
            properties: {
                project_path: project_path_arg!(),
                ras_version: ras_version_arg!(),
                showmore: schema_bool!("Show every column", default: false)
            }
        };

        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"][0], "project_path");
        assert_eq!(schema["properties"]["ras_version"]["default"], "6.6");
        assert_eq!(schema["properties"]["showmore"]["type"], "boolean");
    }

    #[test]
    fn test_schema_integer_minimum() {
        let schema = schema_integer!("Token budget", minimum: 1);
        assert_eq!(schema["minimum"], 1);
    }

    #[test]
    fn test_schema_string_or_integer() {
        let schema = schema_string_or_integer!("Plan number");
        assert_eq!(schema["type"][1], "integer");
    }
}
