//! Parsers: turn file content into normalised [`LogRecord`] sequences.
//!
//! One sub-module per [`FormatTag`]. Every parser is total over its input:
//! malformed lines, rows, entries or elements are skipped or degraded to a
//! best-effort record, never propagated as errors. The only failure a caller
//! sees is the file itself being unreadable.

pub mod csv;
pub mod json;
pub mod text;
pub mod xml;

use crate::{
    detect::strip_bom,
    error::{IoContext, Result},
    types::{FormatTag, LogRecord},
};
use std::path::Path;
use tracing::debug;

/// Read `path` and parse it as `tag`.
pub fn parse_file(path: &Path, tag: FormatTag) -> Result<Vec<LogRecord>> {
    let content = read_content(path)?;
    let records = parse_str(&content, tag);
    debug!(path = %path.display(), %tag, records = records.len(), "parsed file");
    Ok(records)
}

/// Parse already-loaded content as `tag`.
pub fn parse_str(content: &str, tag: FormatTag) -> Vec<LogRecord> {
    match tag {
        FormatTag::Text => text::parse(content),
        FormatTag::Csv => csv::parse(content),
        FormatTag::Json => json::parse(content),
        FormatTag::Xml => xml::parse(content),
    }
}

/// Whole-file read, decoded lossily so stray invalid bytes never fail a parse.
pub fn read_content(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).at(path)?;
    Ok(String::from_utf8_lossy(strip_bom(&bytes)).into_owned())
}
