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

//! Compute message logs.
//!
//! HEC-RAS writes the compute log of each plan run as plain text beside
//! the project: `<project>.p01.computeMsgs.txt` since 6.0 and
//! `<project>.p01.comp_msgs.txt` before that.

use crate::error::{RasError, RasResult};
use crate::project::{ProjectFile, RasProject};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Returned in place of a log when none was written for the plan.
pub const COMPUTE_MESSAGES_NOT_FOUND: &str = "Compute messages not found. The simulation may not have completed or results were not saved properly.";

const LOG_SUFFIXES: [&str; 2] = ["computeMsgs.txt", "comp_msgs.txt"];

/// Raw compute log of one plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputeLog {
    pub path: PathBuf,
    pub text: String,
}

impl ComputeLog {
    /// File name of the log, used as the formatter's source label.
    pub fn source_label(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Candidate log paths for a plan, newest naming first.
pub fn compute_log_paths(plan: &ProjectFile) -> Vec<PathBuf> {
    LOG_SUFFIXES
        .iter()
        .map(|suffix| with_suffix(&plan.path, suffix))
        .collect()
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

/// Read the compute log of `plan`. `Ok(None)` when no log exists.
pub fn read_compute_messages(project: &RasProject, plan: &ProjectFile) -> RasResult<Option<ComputeLog>> {
    for path in compute_log_paths(plan) {
        if !path.is_file() {
            continue;
        }
        debug!("Reading compute messages for {} plan {}", project.name(), plan.number);
        let bytes = std::fs::read(&path).map_err(|e| RasError::read(&path, e))?;
        return Ok(Some(ComputeLog {
            text: String::from_utf8_lossy(&bytes).into_owned(),
            path,
        }));
    }

    debug!("No compute messages for {} plan {}", project.name(), plan.number);
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::DEFAULT_RAS_VERSION;
    use hecras_test::ProjectFixture;

    #[test]
    fn test_reads_6x_log() {
        let fixture = ProjectFixture::muncie();
        let project = RasProject::open(fixture.path(), DEFAULT_RAS_VERSION).unwrap();
        let plan = project.find_plan("03").unwrap();

        let log = read_compute_messages(&project, plan).unwrap().unwrap();
        assert_eq!(log.source_label(), "Muncie.p03.computeMsgs.txt");
        assert!(log.text.contains("Computation Task"));
    }

    #[test]
    fn test_falls_back_to_legacy_name() {
        let fixture = ProjectFixture::muncie();
        fixture.write("Muncie.p01.comp_msgs.txt", "Plan: Steady Flow Run\n");
        let project = RasProject::open(fixture.path(), DEFAULT_RAS_VERSION).unwrap();
        let plan = project.find_plan("01").unwrap();

        let log = read_compute_messages(&project, plan).unwrap().unwrap();
        assert_eq!(log.source_label(), "Muncie.p01.comp_msgs.txt");
        assert_eq!(log.text, "Plan: Steady Flow Run\n");
    }

    #[test]
    fn test_missing_log() {
        let fixture = ProjectFixture::muncie();
        let project = RasProject::open(fixture.path(), DEFAULT_RAS_VERSION).unwrap();
        let plan = project.find_plan("01").unwrap();

        assert!(read_compute_messages(&project, plan).unwrap().is_none());
    }
}
