//! Line-oriented parser for free-text logs.
//!
//! Splitting rule, applied to each non-blank line:
//!
//! 1. The first token must be date-like (`2026-02-20`, `2026/02/20`, or an
//!    ISO date-time such as `2026-02-20T12:00:00Z`).
//! 2. If it is a bare date and the next token is a time of day
//!    (`12:00`, `12:00:00`, `12:00:00.123`, optional zone), both tokens form
//!    the timestamp.
//! 3. The next token is the level.
//! 4. The rest of the line, with its original spacing, is the message.
//!
//! A line that fails any step becomes an unstructured record: empty
//! timestamp and level, the whole line as message. Blank lines are the only
//! lines that produce no record.

use crate::types::LogRecord;
use regex::Regex;
use once_cell::sync::Lazy;
use tracing::debug;

static DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\d{4}[-/]\d{2}[-/]\d{2}(?:[T_]\d{2}:\d{2}(?::\d{2}(?:[.,]\d+)?)?(?:Z|[+-]\d{2}:?\d{2})?)?$",
    )
    .expect("date pattern is valid")
});

static TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{2}:\d{2}(?::\d{2}(?:[.,]\d+)?)?(?:Z|[+-]\d{2}:?\d{2})?$")
        .expect("time pattern is valid")
});

/// Length of a bare `YYYY-MM-DD` token.
const BARE_DATE_LEN: usize = 10;

pub fn parse(content: &str) -> Vec<LogRecord> {
    let records: Vec<LogRecord> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_line)
        .collect();

    let unstructured = records.iter().filter(|r| r.level.is_empty()).count();
    if unstructured > 0 {
        debug!(unstructured, total = records.len(), "text lines without timestamp/level");
    }
    records
}

/// Split one line. Never fails; see the module docs for the fallback.
pub fn parse_line(line: &str) -> LogRecord {
    split_line(line.trim()).unwrap_or_else(|| LogRecord::unstructured(line))
}

pub fn is_date_like(token: &str) -> bool {
    DATE.is_match(token)
}

pub fn is_time_like(token: &str) -> bool {
    TIME.is_match(token)
}

fn split_line(line: &str) -> Option<LogRecord> {
    let (first, rest) = next_token(line)?;
    if !is_date_like(first) {
        return None;
    }

    let (timestamp, rest) = match next_token(rest) {
        Some((second, after)) if first.len() == BARE_DATE_LEN && is_time_like(second) => {
            (line[..line.len() - after.len()].trim_end(), after)
        }
        _ => (first, rest),
    };

    let (level, message) = next_token(rest)?;
    let message = message.trim();
    if message.is_empty() {
        return None;
    }

    Some(LogRecord::new(timestamp, level, message))
}

/// First whitespace-delimited token of `s` and everything after it.
fn next_token(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    Some(match s.find(char::is_whitespace) {
        Some(i) => (&s[..i], &s[i..]),
        None => (s, ""),
    })
}
