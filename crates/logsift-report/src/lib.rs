//! logsift-report: terminal rendering of aggregator output.
//!
//! Pure consumers: these functions take the structured results from
//! `logsift-core` and return strings for the binary to print. Colour is
//! opt-in so output stays clean when piped.

use comfy_table::{presets::ASCII_FULL, ContentArrangement, Table};
use crossterm::style::{Color, Stylize};
use logsift_core::{
    aggregate::LevelSummary,
    export::CSV_HEADER,
    pipeline::{FileFailure, FileReport},
    LogRecord,
};
use std::fmt::Write as _;

/// Traffic-light state of one summary row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Light {
    Green,
    Yellow,
    Red,
}

impl Light {
    fn color(self) -> Color {
        match self {
            Light::Green => Color::Green,
            Light::Yellow => Color::Yellow,
            Light::Red => Color::Red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub metric: String,
    pub value: String,
    pub light: Light,
}

impl SummaryRow {
    fn new(metric: impl Into<String>, value: impl ToString, light: Light) -> Self {
        Self {
            metric: metric.into(),
            value: value.to_string(),
            light,
        }
    }
}

/// Rows for the summary block: total, every level present (warnings yellow,
/// errors red), then the unusual-activity verdict.
pub fn summary_rows(summary: &LevelSummary, unusual_threshold: f64) -> Vec<SummaryRow> {
    let mut rows = vec![SummaryRow::new("Total Lines", summary.total(), Light::Green)];
    for (level, count) in summary.levels() {
        let light = match level {
            "ERROR" if count > 0 => Light::Red,
            "WARNING" if count > 0 => Light::Yellow,
            _ => Light::Green,
        };
        rows.push(SummaryRow::new(level, count, light));
    }
    let unusual = summary.is_unusual_with(unusual_threshold);
    rows.push(SummaryRow::new(
        "Unusual Activity",
        if unusual { "Yes" } else { "No" },
        if unusual { Light::Red } else { Light::Green },
    ));
    rows
}

pub fn render_summary(summary: &LevelSummary, unusual_threshold: f64, color: bool) -> String {
    let mut out = String::from("--- Log Summary ---\n");
    for row in summary_rows(summary, unusual_threshold) {
        if color {
            let _ = writeln!(out, "{}: {}", row.metric, row.value.with(row.light.color()));
        } else {
            let _ = writeln!(out, "{}: {}", row.metric, row.value);
        }
    }
    out
}

/// Table of the first `limit` records, with a trailer counting the rest.
pub fn render_preview(records: &[LogRecord], limit: usize) -> String {
    let shown = &records[..records.len().min(limit)];

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(CSV_HEADER);
    for r in shown {
        table.add_row([&r.timestamp, &r.level, &r.message]);
    }

    let mut out = format!("{table}\n");
    if records.len() > shown.len() {
        let _ = writeln!(out, "...and {} more rows", records.len() - shown.len());
    }
    out
}

/// Per-file lines: format and record count, then failures with their cause.
pub fn render_files(files: &[FileReport], failures: &[FileFailure]) -> String {
    let mut out = String::new();
    for f in files {
        let _ = writeln!(out, "{} [{}] {} records", f.path.display(), f.format, f.records);
    }
    for f in failures {
        let _ = writeln!(out, "FAILED {}: {}", f.path.display(), f.cause);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use logsift_core::summarize;
    use pretty_assertions::assert_eq;

    fn records() -> Vec<LogRecord> {
        vec![
            LogRecord::new("2026-02-18 12:00:00", "INFO", "ok"),
            LogRecord::new("2026-02-18 12:01:00", "ERROR", "fail"),
            LogRecord::new("2026-02-18 12:02:00", "WARNING", "warn"),
        ]
    }

    #[test]
    fn summary_lights() {
        let rows = summary_rows(&summarize(&records()), 0.2);
        let lights: Vec<(&str, &str, Light)> = rows
            .iter()
            .map(|r| (r.metric.as_str(), r.value.as_str(), r.light))
            .collect();
        assert_eq!(
            lights,
            vec![
                ("Total Lines", "3", Light::Green),
                ("ERROR", "1", Light::Red),
                ("INFO", "1", Light::Green),
                ("WARNING", "1", Light::Yellow),
                ("Unusual Activity", "Yes", Light::Red),
            ]
        );
    }

    #[test]
    fn plain_summary_has_no_escape_codes() {
        let text = render_summary(&summarize(&records()), 0.2, false);
        assert!(!text.contains('\u{1b}'));
        assert!(text.contains("Total Lines: 3\n"));
    }

    #[test]
    fn preview_truncates_with_trailer() {
        let text = render_preview(&records(), 2);
        assert!(text.contains("2026-02-18 12:00:00"));
        assert!(text.contains("fail"));
        assert!(!text.contains("warn"));
        assert!(text.ends_with("...and 1 more rows\n"));
    }

    #[test]
    fn preview_rows_are_aligned() {
        let text = render_preview(&records(), 3);
        let widths: Vec<usize> = text.lines().map(|l| l.chars().count()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]), "ragged table:\n{text}");
        assert!(text.contains("| INFO "));
    }

    #[test]
    fn preview_of_nothing_is_header_only() {
        let text = render_preview(&[], 5);
        for name in CSV_HEADER {
            assert!(text.contains(name));
        }
        assert!(!text.contains("more rows"));
    }
}
