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

//! Error types for reading HEC-RAS projects.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while locating or reading HEC-RAS project files.
#[derive(Debug, Error)]
pub enum RasError {
    /// The project folder does not exist or is not a directory.
    #[error("project folder does not exist or is not a directory: {}", .0.display())]
    FolderNotFound(PathBuf),

    /// No `.prj` file with a `Proj Title=` line was found in the folder.
    #[error("no HEC-RAS project file (.prj) found in {}", .0.display())]
    ProjectFileNotFound(PathBuf),

    /// No plan matched the given number, title or short identifier.
    #[error("plan not found: {0}")]
    PlanNotFound(String),

    /// A plan selector could not be interpreted.
    #[error("invalid plan selector: {0}")]
    InvalidPlanSelector(String),

    /// I/O failure on a specific file.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed RAS Mapper XML.
    #[error("invalid RAS Mapper file {}: {message}", path.display())]
    RasMap { path: PathBuf, message: String },
}

/// Result type for project reading.
pub type RasResult<T> = Result<T, RasError>;

impl RasError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
