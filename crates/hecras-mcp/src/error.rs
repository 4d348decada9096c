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

//! Error types for the MCP server.

use hecras_core::RasError;
use thiserror::Error;

/// MCP server error type.
#[derive(Error, Debug)]
pub enum McpError {
    /// Project folder missing or not a directory.
    #[error("The specified project folder does not exist or is not a directory: {0}")]
    ProjectNotFound(String),

    /// HEC-RAS project reading error.
    #[error("{0}")]
    Ras(#[from] RasError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Tool not found.
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Invalid arguments.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Path traversal attempt.
    #[error("Path traversal not allowed: {0}")]
    PathTraversal(String),
}

/// Result type for MCP operations.
pub type McpResult<T> = Result<T, McpError>;

impl McpError {
    /// Get the MCP error code.
    pub fn code(&self) -> i32 {
        match self {
            Self::ProjectNotFound(_) => -32004,
            Self::Ras(_) => -32001,
            Self::Json(_) => -32700,
            Self::Io(_) => -32002,
            Self::InvalidRequest(_) => -32600,
            Self::ToolNotFound(_) => -32601,
            Self::InvalidArguments(_) => -32602,
            Self::PathTraversal(_) => -32003,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_not_found_message() {
        let err = McpError::ProjectNotFound("/data/missing".to_string());
        assert_eq!(
            format!("Error: {}", err),
            "Error: The specified project folder does not exist or is not a directory: /data/missing"
        );
        assert_eq!(err.code(), -32004);
    }

    #[test]
    fn test_ras_error_converts() {
        let err: McpError = RasError::PlanNotFound("07".to_string()).into();
        assert_eq!(err.to_string(), "plan not found: 07");
        assert_eq!(err.code(), -32001);
    }
}
