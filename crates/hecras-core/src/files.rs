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

//! `Key=Value` text files.
//!
//! Project, plan, geometry and flow files all share the same line format:
//! `Key=Value`, one per line, with a handful of bare flag lines such as
//! `English Units`. Keys may repeat (`Plan File=p01`, `Plan File=p02`), so
//! entries keep their file order.

use crate::error::{RasError, RasResult};
use std::path::{Path, PathBuf};

/// An ordered `Key=Value` file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyValueFile {
    path: PathBuf,
    entries: Vec<(String, String)>,
    flags: Vec<String>,
}

impl KeyValueFile {
    /// Read and parse a file. Bytes that are not valid UTF-8 are replaced,
    /// since HEC-RAS writes files in the system code page.
    pub fn read(path: impl AsRef<Path>) -> RasResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| RasError::read(path, e))?;
        Ok(Self::parse(path, &String::from_utf8_lossy(&bytes)))
    }

    /// Parse already loaded text.
    pub fn parse(path: impl Into<PathBuf>, text: &str) -> Self {
        let mut entries = Vec::new();
        let mut flags = Vec::new();

        for line in text.lines() {
            let line = line.trim_end();
            if line.trim().is_empty() {
                continue;
            }
            match line.split_once('=') {
                Some((key, value)) => entries.push((key.trim().to_string(), value.trim().to_string())),
                None => flags.push(line.trim().to_string()),
            }
        }

        Self {
            path: path.into(),
            entries,
            flags,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// First value for `key`, if present and non-empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, v)| k == key && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }

    /// All values for `key` in file order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All entries in file order.
    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    /// Whether a bare flag line such as `English Units` is present.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| f == flag)
    }

    /// Bare flag lines in file order.
    pub fn flags(&self) -> &[String] {
        &self.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entries_and_flags() {
        let text = "Proj Title=Muncie\r\nCurrent Plan=p03\r\nEnglish Units\r\nPlan File=p01\r\nPlan File=p03\r\n";
        let file = KeyValueFile::parse("Muncie.prj", text);

        assert_eq!(file.get("Proj Title"), Some("Muncie"));
        assert_eq!(file.get("Current Plan"), Some("p03"));
        assert_eq!(file.get_all("Plan File").collect::<Vec<_>>(), vec!["p01", "p03"]);
        assert!(file.has_flag("English Units"));
        assert!(!file.has_flag("SI Units"));
        assert_eq!(file.entries().len(), 4);
    }

    #[test]
    fn test_value_keeps_later_equals_signs() {
        let file = KeyValueFile::parse("x", "Description=a=b\n");
        assert_eq!(file.get("Description"), Some("a=b"));
    }

    #[test]
    fn test_empty_value_is_none() {
        let file = KeyValueFile::parse("x", "Short Identifier=   \nShort Identifier=later\n");
        assert_eq!(file.get("Short Identifier"), Some("later"));
        assert_eq!(file.get("Missing"), None);
    }

    #[test]
    fn test_read_missing_file() {
        let err = KeyValueFile::read("/nonexistent/file.p01").unwrap_err();
        assert!(matches!(err, RasError::Read { .. }));
    }
}
