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

//! Tabular results with fixed-width text rendering.
//!
//! Readers return their results as a [`Table`]: named columns over string
//! cells. Rendering mirrors the familiar dataframe text layout: a row index
//! on the left, every column right-aligned to its widest cell and separated
//! by two spaces. Tables longer than the row cap show their first and last
//! rows around a `...` marker, followed by a shape footer.

use std::fmt;

/// Default number of rows rendered before a table is abbreviated.
pub const DEFAULT_MAX_ROWS: usize = 100;

const COLUMN_SEPARATOR: &str = "  ";
const ELLIPSIS: &str = "...";

/// A named table of string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create an empty table with the given columns.
    pub fn new<I, S>(name: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded with empty cells and long rows
    /// are cut to the column count.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// A table is empty when it has no rows or no columns.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    /// Cell value by row index and column name.
    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row).map(|r| r[col].as_str())
    }

    /// Render with at most `max_rows` rows (`0` renders every row).
    pub fn render(&self, max_rows: usize) -> String {
        if self.columns.is_empty() {
            return format!("Empty table\nColumns: []\nIndex: [{} rows]", self.rows.len());
        }
        if self.rows.is_empty() {
            return format!("Empty table\nColumns: [{}]\nIndex: []", self.columns.join(", "));
        }

        let abbreviated = max_rows > 0 && self.rows.len() > max_rows;
        let shown: Vec<(String, &[String])> = if abbreviated {
            let head = (max_rows + 1) / 2;
            let tail = max_rows / 2;
            self.rows[..head]
                .iter()
                .enumerate()
                .chain(self.rows.iter().enumerate().skip(self.rows.len() - tail))
                .map(|(i, row)| (i.to_string(), row.as_slice()))
                .collect()
        } else {
            self.rows
                .iter()
                .enumerate()
                .map(|(i, row)| (i.to_string(), row.as_slice()))
                .collect()
        };

        let index_width = shown.iter().map(|(i, _)| i.len()).max().unwrap_or(0);
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(c, name)| {
                shown
                    .iter()
                    .map(|(_, row)| width(&row[c]))
                    .chain([width(name), if abbreviated { ELLIPSIS.len() } else { 0 }])
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut lines = Vec::with_capacity(shown.len() + 3);
        lines.push(render_line(
            &" ".repeat(index_width),
            self.columns.iter().map(String::as_str),
            &widths,
        ));

        let split_at = if abbreviated { (max_rows + 1) / 2 } else { usize::MAX };
        for (n, (index, row)) in shown.iter().enumerate() {
            if n == split_at {
                lines.push(render_line(
                    &format!("{:<w$}", ELLIPSIS, w = index_width),
                    std::iter::repeat(ELLIPSIS).take(widths.len()),
                    &widths,
                ));
            }
            lines.push(render_line(
                &format!("{:<w$}", index, w = index_width),
                row.iter().map(String::as_str),
                &widths,
            ));
        }

        let mut out = lines.join("\n");
        if abbreviated {
            out.push_str(&format!(
                "\n\n[{} rows x {} columns]",
                self.rows.len(),
                self.columns.len()
            ));
        }
        out
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_MAX_ROWS))
    }
}

fn width(cell: &str) -> usize {
    cell.chars().count()
}

fn render_line<'a>(index: &str, cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let mut line = String::from(index);
    for (cell, w) in cells.zip(widths) {
        line.push_str(COLUMN_SEPARATOR);
        line.push_str(&format!("{:>w$}", cell, w = *w));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(rows: usize) -> Table {
        let mut table = Table::new("PLANS", ["plan_number", "Plan Title"]);
        for i in 0..rows {
            table.push_row([format!("{:02}", i + 1), format!("Plan {}", i + 1)]);
        }
        table
    }

    #[test]
    fn test_render_aligns_columns() {
        let out = sample(2).render(DEFAULT_MAX_ROWS);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "   plan_number  Plan Title");
        assert_eq!(lines[1], "0           01      Plan 1");
        assert_eq!(lines[2], "1           02      Plan 2");
    }

    #[test]
    fn test_render_abbreviates_long_tables() {
        let out = sample(10).render(4);
        let lines: Vec<&str> = out.lines().collect();

        // header, 2 head rows, ellipsis, 2 tail rows, blank, footer
        assert_eq!(lines.len(), 8);
        assert!(lines[1].starts_with("0 "));
        assert!(lines[2].starts_with("1 "));
        assert!(lines[3].starts_with("..."));
        assert!(lines[4].starts_with("8 "));
        assert!(lines[5].starts_with("9 "));
        assert_eq!(lines[7], "[10 rows x 2 columns]");
    }

    #[test]
    fn test_render_zero_cap_shows_everything() {
        let out = sample(150).render(0);
        assert_eq!(out.lines().count(), 151);
        assert!(!out.contains("rows x"));
    }

    #[test]
    fn test_push_row_pads_and_truncates() {
        let mut table = Table::new("T", ["a", "b"]);
        table.push_row(["1"]);
        table.push_row(["1", "2", "3"]);
        assert_eq!(table.rows()[0], vec!["1".to_string(), String::new()]);
        assert_eq!(table.rows()[1].len(), 2);
        assert_eq!(table.cell(1, "b"), Some("2"));
        assert_eq!(table.cell(1, "c"), None);
    }

    #[test]
    fn test_empty_tables() {
        let table = Table::new("T", ["a"]);
        assert!(table.is_empty());
        assert_eq!(table.render(10), "Empty table\nColumns: [a]\nIndex: []");

        let no_columns = Table::new("T", Vec::<String>::new());
        assert!(no_columns.is_empty());
    }

    #[test]
    fn test_display_uses_default_cap() {
        let table = sample(3);
        assert_eq!(table.to_string(), table.render(DEFAULT_MAX_ROWS));
    }
}
