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

//! Compute message formatting.
//!
//! HEC-RAS keeps a free-form log of every run: plan metadata as `key: value`
//! lines, a tab-separated table of elapsed time per computation task, and a
//! tab-separated table of simulation-to-runtime speed ratios. This module
//! classifies those lines and renders them as a sectioned report that stays
//! within a character budget.
//!
//! # Examples
//!
//! ```
//! use hecras_core::compute_messages::{format_compute_messages, FormatConfig};
//!
//! let raw = "Plan Name: Test\r\nComputation Task\tGeometry\t00:01:23\r\n";
//! let report = format_compute_messages(raw, "Muncie.p01.hdf", &FormatConfig::default());
//!
//! assert!(report.starts_with("Compute Messages from: Muncie.p01.hdf"));
//! assert!(report.contains("General Messages:"));
//! assert!(report.contains("Computation Tasks:"));
//! assert!(!report.contains("Computation Speed:"));
//! ```

use std::fmt::{self, Write};
use tracing::debug;

/// Default output budget in tokens.
pub const DEFAULT_MAX_TOKENS: usize = 10_000;

/// Approximate characters per token used to turn a token budget into a
/// character budget.
pub const CHARS_PER_TOKEN: usize = 4;

/// Number of trailing lines always kept when output is truncated.
pub const PRESERVED_TAIL_LINES: usize = 50;

const TASK_MARKER: &str = "Computation Task";
const SPEED_MARKER: &str = "Computation Speed";

// Key column of a general message, excluding the space before the colon.
const KEY_WIDTH: usize = 39;
const COLUMN_GAP: &str = "   ";
const HEADER_RULE: usize = 80;
const GENERAL_RULE: usize = 40;
const TABLE_RULE: usize = 60;
const TABLE_LABEL_HEADING: &str = "Task";

/// Output bounds for [`format_compute_messages`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatConfig {
    /// Maximum number of characters in the formatted report (default: 40,000).
    pub max_output_chars: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self::from_token_budget(DEFAULT_MAX_TOKENS)
    }
}

impl FormatConfig {
    /// Derive the character budget from a token budget at
    /// [`CHARS_PER_TOKEN`] characters per token.
    pub fn from_token_budget(max_tokens: usize) -> Self {
        Self {
            max_output_chars: max_tokens.saturating_mul(CHARS_PER_TOKEN),
        }
    }

    /// The token budget this configuration corresponds to.
    pub fn token_budget(&self) -> usize {
        self.max_output_chars / CHARS_PER_TOKEN
    }

    /// Notice inserted between the kept head and the preserved tail.
    pub fn truncation_notice(&self) -> String {
        format!(
            "\n\n[OUTPUT TRUNCATED: Response exceeded {} tokens. Showing beginning and last {} lines.]\n\n",
            group_thousands(self.token_budget()),
            PRESERVED_TAIL_LINES
        )
    }
}

/// Category of a single non-blank log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Elapsed time for a computation stage.
    Task,
    /// Simulation-time to runtime ratio for a stage.
    Speed,
    /// Anything else, including `key: value` metadata.
    General,
}

/// Classify a trimmed, non-blank line.
///
/// Task detection wins over speed detection, and both win over colon
/// splitting, so `"Computation Task\tPlan: 01"` is a task record.
pub fn classify_line(line: &str) -> LineKind {
    let has_tab = line.contains('\t');
    if has_tab && line.contains(TASK_MARKER) {
        LineKind::Task
    } else if has_tab && line.contains(SPEED_MARKER) {
        LineKind::Speed
    } else {
        LineKind::General
    }
}

/// Classify, format and bound a raw compute message log.
///
/// `source_label` names the file the log came from and appears in the
/// header. The result never exceeds `config.max_output_chars` unless the
/// preserved tail alone is larger than the budget. Formatting failures are
/// reported as a single error line instead of a partial report.
pub fn format_compute_messages(raw: &str, source_label: &str, config: &FormatConfig) -> String {
    let sections = Sections::classify(raw);
    debug!(
        general = sections.general.len(),
        tasks = sections.tasks.len(),
        speeds = sections.speeds.len(),
        "classified compute messages"
    );

    match sections.render(source_label) {
        Ok(formatted) => truncate_output(formatted, config),
        Err(e) => format!("Error formatting compute messages from {}: {}", source_label, e),
    }
}

/// Apply the size bound to an already formatted report.
///
/// Reports within budget are returned untouched. Otherwise the last
/// [`PRESERVED_TAIL_LINES`] lines are kept verbatim and the rest of the
/// budget is filled with whole lines from the start of the report.
pub fn truncate_output(formatted: String, config: &FormatConfig) -> String {
    if formatted.chars().count() <= config.max_output_chars {
        return formatted;
    }

    let lines: Vec<&str> = formatted.split('\n').collect();
    let tail_start = lines.len().saturating_sub(PRESERVED_TAIL_LINES);
    let tail = lines[tail_start..].join("\n");
    let notice = config.truncation_notice();

    let available = config
        .max_output_chars
        .saturating_sub(tail.chars().count())
        .saturating_sub(notice.chars().count());
    let head = whole_lines_prefix(&formatted, available);

    debug!(
        original_chars = formatted.len(),
        head_chars = head.len(),
        "truncated compute messages"
    );

    let mut out = String::with_capacity(head.len() + notice.len() + tail.len());
    out.push_str(head);
    out.push_str(&notice);
    out.push_str(&tail);
    out
}

/// Longest prefix of `text` holding at most `max_chars` characters that
/// ends on a line boundary. The terminating newline is not included.
fn whole_lines_prefix(text: &str, max_chars: usize) -> &str {
    let cut = text
        .char_indices()
        .nth(max_chars)
        .map_or(text.len(), |(i, _)| i);

    if text[cut..].starts_with('\n') {
        return &text[..cut];
    }
    match text[..cut].rfind('\n') {
        Some(end) => &text[..end],
        None => "",
    }
}

/// Split on CRLF when the log uses it anywhere, LF otherwise.
fn split_lines(raw: &str) -> Vec<&str> {
    if raw.contains("\r\n") {
        raw.split("\r\n").collect()
    } else {
        raw.split('\n').collect()
    }
}

#[derive(Debug, Default)]
struct Sections<'a> {
    general: Vec<&'a str>,
    tasks: Vec<&'a str>,
    speeds: Vec<&'a str>,
}

impl<'a> Sections<'a> {
    fn classify(raw: &'a str) -> Self {
        let mut sections = Self::default();
        for line in split_lines(raw) {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match classify_line(line) {
                LineKind::Task => sections.tasks.push(line),
                LineKind::Speed => sections.speeds.push(line),
                LineKind::General => sections.general.push(line),
            }
        }
        sections
    }

    fn render(&self, source_label: &str) -> Result<String, fmt::Error> {
        let mut out = String::new();
        writeln!(out, "Compute Messages from: {}", source_label)?;
        writeln!(out, "{}", "=".repeat(HEADER_RULE))?;

        if !self.general.is_empty() {
            writeln!(out)?;
            writeln!(out, "General Messages:")?;
            writeln!(out, "{}", "-".repeat(GENERAL_RULE))?;
            for message in &self.general {
                write_general(&mut out, message)?;
            }
        }

        if !self.tasks.is_empty() {
            write_table(&mut out, "Computation Tasks:", "Time", TASK_MARKER, &self.tasks)?;
        }

        if !self.speeds.is_empty() {
            write_table(
                &mut out,
                "Computation Speed:",
                "Simulation/Runtime",
                SPEED_MARKER,
                &self.speeds,
            )?;
        }

        let len = out.trim_end_matches('\n').len();
        out.truncate(len);
        Ok(out)
    }
}

fn write_general(out: &mut String, message: &str) -> fmt::Result {
    match message.split_once(':') {
        Some((key, value)) if !message.starts_with("http") => writeln!(
            out,
            "{:<width$} : {}",
            key.trim(),
            value.trim(),
            width = KEY_WIDTH
        ),
        _ => writeln!(out, "{}", message),
    }
}

fn write_table(
    out: &mut String,
    title: &str,
    value_heading: &str,
    marker: &str,
    records: &[&str],
) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "{}", title)?;

    let rows: Vec<(String, &str)> = records
        .iter()
        .map(|record| split_record(record, marker))
        .collect();
    let width = rows
        .iter()
        .map(|(label, _)| label.chars().count())
        .chain(std::iter::once(TABLE_LABEL_HEADING.len()))
        .max()
        .unwrap_or_default();

    writeln!(out, "{}", "-".repeat(TABLE_RULE))?;
    write_row(out, TABLE_LABEL_HEADING, value_heading, width)?;
    writeln!(out, "{}", "-".repeat(TABLE_RULE))?;
    for (label, value) in &rows {
        write_row(out, label, value, width)?;
    }
    Ok(())
}

fn write_row(out: &mut String, label: &str, value: &str, width: usize) -> fmt::Result {
    let row = format!("{:<width$}{}{}", label, COLUMN_GAP, value, width = width);
    writeln!(out, "{}", row.trim_end())
}

/// Split a task or speed record into its label and value columns.
///
/// The label is the first tab field with the category phrase removed. When
/// that leaves nothing (`"Computation Task\tGeometry\t00:01:23"`), the next
/// two fields become label and value.
fn split_record<'a>(line: &'a str, marker: &str) -> (String, &'a str) {
    let mut fields = line.split('\t');
    let label = fields.next().unwrap_or_default().replace(marker, "");
    let label = label.trim();
    let value = fields.next().unwrap_or_default().trim();

    if label.is_empty() {
        if let Some(rest) = fields.next() {
            return (value.to_string(), rest.trim());
        }
    }
    (label.to_string(), value)
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_default(raw: &str) -> String {
        format_compute_messages(raw, "plan.hdf", &FormatConfig::default())
    }

    fn header(label: &str) -> String {
        format!("Compute Messages from: {}\n{}", label, "=".repeat(80))
    }

    #[test]
    fn test_default_budget_is_forty_thousand_chars() {
        let config = FormatConfig::default();
        assert_eq!(config.max_output_chars, 40_000);
        assert_eq!(config.token_budget(), 10_000);
    }

    #[test]
    fn test_truncation_notice_text() {
        assert_eq!(
            FormatConfig::default().truncation_notice(),
            "\n\n[OUTPUT TRUNCATED: Response exceeded 10,000 tokens. Showing beginning and last 50 lines.]\n\n"
        );
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_empty_input_yields_header_only() {
        assert_eq!(format_default(""), header("plan.hdf"));
    }

    #[test]
    fn test_blank_lines_yield_header_only() {
        assert_eq!(format_default("\r\n   \r\n\t\r\n"), header("plan.hdf"));
    }

    #[test]
    fn test_concrete_scenario() {
        let raw = "Plan Name: Test\nComputation Task\tGeometry\t00:01:23\nComputation Speed\tUnsteady\t2.5\n";
        let out = format_default(raw);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].contains("plan.hdf"));
        assert_eq!(lines[1], "=".repeat(80));

        let general = lines.iter().position(|l| *l == "General Messages:").unwrap();
        let tasks = lines.iter().position(|l| *l == "Computation Tasks:").unwrap();
        let speed = lines.iter().position(|l| *l == "Computation Speed:").unwrap();
        assert!(general < tasks && tasks < speed);

        assert!(out.contains("Plan Name                               : Test"));
        assert!(lines[tasks..speed].contains(&"Geometry   00:01:23"));
        assert!(lines[speed..].contains(&"Unsteady   2.5"));
    }

    #[test]
    fn test_task_table_layout() {
        let out = format_default("Completing Geometry Computation Task\t00:00:05");
        let expected = format!(
            "\nComputation Tasks:\n{rule}\n{head}\n{rule}\n{row}",
            rule = "-".repeat(60),
            head = format!("{:<19}   {}", "Task", "Time"),
            row = "Completing Geometry   00:00:05",
        );
        assert!(out.ends_with(&expected), "unexpected layout:\n{}", out);
    }

    #[test]
    fn test_speed_header_row() {
        let out = format_default("Computation Speed\tSimulation/Runtime\r\nUnsteady Flow Computation Speed\t3510x");
        assert!(out.contains(&format!("{:<13}   {}", "Task", "Simulation/Runtime")));
        assert!(out.contains("Unsteady Flow   3510x"));
    }

    #[test]
    fn test_sections_follow_fixed_order() {
        let raw = "Computation Task\tA\t1\nGeneral B\nComputation Speed\tC\t2\n";
        let out = format_default(raw);

        let general = out.find("General Messages:").unwrap();
        let tasks = out.find("Computation Tasks:").unwrap();
        let speed = out.find("Computation Speed:").unwrap();
        assert!(general < tasks && tasks < speed);

        assert!(out[general..tasks].contains("General B"));
        assert!(out[tasks..speed].lines().any(|l| l.starts_with("A ")));
        assert!(out[speed..].lines().any(|l| l.starts_with("C ")));
    }

    #[test]
    fn test_order_within_category_preserved() {
        let out = format_default("first\nComputation Task\tx\t1\nsecond\nthird");
        let a = out.find("first").unwrap();
        let b = out.find("second").unwrap();
        let c = out.find("third").unwrap();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_empty_sections_omitted() {
        let out = format_default("just a message");
        assert!(out.contains("General Messages:"));
        assert!(!out.contains("Computation Tasks:"));
        assert!(!out.contains("Computation Speed:"));

        let out = format_default("Computation Task\tGeometry\t1");
        assert!(!out.contains("General Messages:"));
        assert!(out.contains("Computation Tasks:"));
    }

    #[test]
    fn test_task_with_colon_is_task_record() {
        assert_eq!(classify_line("Computation Task\tStart: 01:00"), LineKind::Task);
        let out = format_default("Computation Task\tStart: 01:00");
        assert!(!out.contains("General Messages:"));
        assert!(out.contains("Start: 01:00"));
    }

    #[test]
    fn test_marker_without_tab_is_general() {
        assert_eq!(classify_line("Computation Task summary"), LineKind::General);
        assert_eq!(classify_line("Computation Speed: fast"), LineKind::General);
    }

    #[test]
    fn test_task_takes_priority_over_speed() {
        assert_eq!(
            classify_line("Computation Task Computation Speed\t1"),
            LineKind::Task
        );
    }

    #[test]
    fn test_http_line_is_verbatim() {
        let out = format_default("http://example.com/docs: see here");
        assert!(out.lines().any(|l| l == "http://example.com/docs: see here"));
    }

    #[test]
    fn test_line_without_colon_is_verbatim() {
        let out = format_default("  Writing results  ");
        assert!(out.lines().any(|l| l == "Writing results"));
    }

    #[test]
    fn test_colon_split_at_first_colon() {
        let out = format_default("Simulation Started At: 10:30:00");
        assert!(out.contains(&format!("{:<39} : {}", "Simulation Started At", "10:30:00")));
    }

    #[test]
    fn test_crlf_takes_precedence() {
        assert_eq!(split_lines("a\nb\r\nc"), vec!["a\nb", "c"]);
        assert_eq!(split_lines("a\nb\nc"), vec!["a", "b", "c"]);
        assert_eq!(split_lines(""), vec![""]);
    }

    #[test]
    fn test_general_section_reclassifies_as_general() {
        let out = format_default("Plan: p01\nComputation Task\tGeometry\t1\nnote");
        let start = out.find("General Messages:").unwrap();
        let end = out.find("Computation Tasks:").unwrap();
        for line in out[start..end].lines().filter(|l| !l.trim().is_empty()) {
            assert_eq!(classify_line(line.trim()), LineKind::General);
        }
    }

    #[test]
    fn test_under_budget_not_truncated() {
        let raw: String = (0..100).map(|i| format!("message {}\n", i)).collect();
        let out = format_default(&raw);
        assert!(!out.contains("OUTPUT TRUNCATED"));
        assert!(out.len() <= raw.len() + 200);
    }

    #[test]
    fn test_over_budget_preserves_last_fifty_lines() {
        // 60 distinct messages of 750 characters each, 45,000 in total.
        let messages: Vec<String> = (0..60)
            .map(|i| format!("{:03}{}", i, "x".repeat(747)))
            .collect();
        let raw = messages.join("\n");
        assert_eq!(raw.len() - 59, 45_000);

        let out = format_default(&raw);
        assert_eq!(out.matches("[OUTPUT TRUNCATED").count(), 1);
        assert!(out.chars().count() <= 40_000);

        let notice = FormatConfig::default().truncation_notice();
        let tail = out.split(notice.as_str()).nth(1).unwrap();
        let tail_lines: Vec<&str> = tail.split('\n').collect();
        assert_eq!(tail_lines.len(), 50);
        assert_eq!(tail_lines, messages[10..].iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn test_truncated_tail_matches_untruncated_tail() {
        let raw: String = (0..500).map(|i| format!("Key {}: {}\n", i, "v".repeat(20))).collect();
        let config = FormatConfig { max_output_chars: 8_000 };
        let full = format_compute_messages(&raw, "p.hdf", &FormatConfig { max_output_chars: usize::MAX });
        let out = format_compute_messages(&raw, "p.hdf", &config);

        let full_lines: Vec<&str> = full.split('\n').collect();
        let out_lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(
            &out_lines[out_lines.len() - 50..],
            &full_lines[full_lines.len() - 50..]
        );
        assert!(out.chars().count() <= 8_000);
    }

    #[test]
    fn test_truncated_head_ends_on_line_boundary() {
        let raw: String = (0..500).map(|i| format!("line number {}\n", i)).collect();
        let config = FormatConfig { max_output_chars: 2_000 };
        let full = format_compute_messages(&raw, "p.hdf", &FormatConfig { max_output_chars: usize::MAX });
        let out = format_compute_messages(&raw, "p.hdf", &config);

        let head = out.split(config.truncation_notice().as_str()).next().unwrap();
        assert!(full.starts_with(head));
        assert!(full[head.len()..].starts_with('\n'));
    }

    #[test]
    fn test_whole_lines_prefix() {
        assert_eq!(whole_lines_prefix("abc\ndef\nghi", 5), "abc");
        assert_eq!(whole_lines_prefix("abc\ndef\nghi", 7), "abc\ndef");
        assert_eq!(whole_lines_prefix("abcdef", 3), "");
        assert_eq!(whole_lines_prefix("abc\ndef", 0), "");
    }

    #[test]
    fn test_deterministic_output() {
        let raw = "A: 1\nComputation Task\tB\t2\nComputation Speed\tC\t3";
        assert_eq!(format_default(raw), format_default(raw));
    }

    #[test]
    fn test_split_record_variants() {
        assert_eq!(
            split_record("Computation Task\tGeometry\t00:01:23", TASK_MARKER),
            ("Geometry".to_string(), "00:01:23")
        );
        assert_eq!(
            split_record("Computation Task\tTime(hh:mm:ss)", TASK_MARKER),
            (String::new(), "Time(hh:mm:ss)")
        );
        assert_eq!(
            split_record("Unsteady Computation Speed \t 2.5 ", SPEED_MARKER),
            ("Unsteady".to_string(), "2.5")
        );
    }
}
