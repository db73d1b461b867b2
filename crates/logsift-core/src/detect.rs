//! Detector: classifies a file as text, CSV, JSON or XML.
//!
//! Classification is two composable steps:
//!
//! 1. [`detect`] trusts a recognised extension, otherwise sniffs the first
//!    [`SAMPLE_LINES`] lines for cheap structural signals (brackets, tags,
//!    comma shape).
//! 2. [`verify`] attempts a real structural parse for the guessed tag and
//!    downgrades to [`FormatTag::Text`] if it fails.
//!
//! Neither step ever fails: the worst outcome is `Text`, which the line
//! parser always accepts.

use crate::{
    error::{IoContext, Result},
    types::FormatTag,
};
use quick_xml::{events::Event, Reader};
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};
use tracing::debug;

/// Number of lines the content heuristics and the CSV sniff look at.
pub const SAMPLE_LINES: usize = 5;

/// Upper bound on bytes [`read_sample`] consumes, so a large file without
/// newlines is not loaded whole just to be classified.
pub const SAMPLE_BYTES: u64 = 64 * 1024;

/// Delimiters tried by [`sniff_delimiter`], most common first.
pub const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Best-guess format for `path`. See the module docs for the rule order.
pub fn detect(path: &Path) -> FormatTag {
    if let Some(tag) = FormatTag::from_path(path) {
        debug!(path = %path.display(), %tag, "format from extension");
        return tag;
    }

    match read_sample(path, SAMPLE_LINES) {
        Ok(sample) => {
            let tag = classify_sample(&sample);
            debug!(path = %path.display(), %tag, "format from content sample");
            tag
        }
        Err(err) => {
            debug!(%err, "sample unreadable, assuming text");
            FormatTag::Text
        }
    }
}

/// Content heuristics over an already-read line sample. Blank lines are
/// ignored; an all-blank sample is text.
pub fn classify_sample<S: AsRef<str>>(sample: &[S]) -> FormatTag {
    let lines: Vec<&str> = sample
        .iter()
        .map(|l| l.as_ref().trim())
        .filter(|l| !l.is_empty())
        .collect();

    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return FormatTag::Text;
    };

    if first.starts_with(['{', '[']) && last.ends_with(['}', ']']) {
        return FormatTag::Json;
    }

    if first.starts_with('<') && lines.iter().any(|l| l.contains("</")) {
        return FormatTag::Xml;
    }

    let commas = first.matches(',').count();
    if commas > 0 && lines[1..].iter().all(|l| l.matches(',').count() == commas) {
        return FormatTag::Csv;
    }

    FormatTag::Text
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Confirm `tag` with a structural parse of `path`, or downgrade it to text.
pub fn verify(path: &Path, tag: FormatTag) -> FormatTag {
    let confirmed = match tag {
        FormatTag::Text => return FormatTag::Text,
        FormatTag::Json => std::fs::read(path).is_ok_and(|bytes| is_valid_json(&bytes)),
        FormatTag::Xml => std::fs::read(path).is_ok_and(|bytes| is_well_formed_xml(&bytes)),
        FormatTag::Csv => {
            read_sample(path, SAMPLE_LINES).is_ok_and(|sample| sniff_delimiter(&sample).is_some())
        }
    };

    if confirmed {
        tag
    } else {
        debug!(path = %path.display(), %tag, "structural parse failed, downgrading to text");
        FormatTag::Text
    }
}

/// `verify(path, detect(path))`.
pub fn resolve(path: &Path) -> FormatTag {
    verify(path, detect(path))
}

pub fn is_valid_json(bytes: &[u8]) -> bool {
    serde_json::from_slice::<serde::de::IgnoredAny>(strip_bom(bytes)).is_ok()
}

/// A single root element, every start tag closed, nothing but markup
/// declarations, comments or whitespace outside it.
pub fn is_well_formed_xml(bytes: &[u8]) -> bool {
    let mut reader = Reader::from_reader(strip_bom(bytes));
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut depth = 0usize;
    let mut root_seen = false;

    loop {
        let event = match reader.read_event_into(&mut buf) {
            Ok(event) => event,
            Err(_) => return false,
        };
        match event {
            Event::Start(_) => {
                if depth == 0 && root_seen {
                    return false;
                }
                root_seen = true;
                depth += 1;
            }
            Event::Empty(_) => {
                if depth == 0 && root_seen {
                    return false;
                }
                root_seen = true;
            }
            Event::End(_) => match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            },
            Event::Text(_) | Event::CData(_) if depth == 0 => return false,
            Event::Eof => return root_seen && depth == 0,
            _ => {}
        }
        buf.clear();
    }
}

/// Pick the first candidate delimiter that splits every sampled row into the
/// same number of fields (at least two). `None` means the sample does not
/// look like delimited data.
pub fn sniff_delimiter<S: AsRef<str>>(sample: &[S]) -> Option<u8> {
    let rows: Vec<&str> = sample
        .iter()
        .map(|l| l.as_ref())
        .filter(|l| !l.trim().is_empty())
        .collect();
    if rows.is_empty() {
        return None;
    }
    let joined = rows.join("\n");

    CANDIDATE_DELIMITERS
        .into_iter()
        .find(|&delimiter| has_consistent_width(&joined, delimiter))
}

fn has_consistent_width(sample: &str, delimiter: u8) -> bool {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(sample.as_bytes());

    let mut width = None;
    for record in reader.records() {
        let Ok(record) = record else {
            return false;
        };
        match width {
            _ if record.len() < 2 => return false,
            None => width = Some(record.len()),
            Some(w) if w != record.len() => return false,
            Some(_) => {}
        }
    }
    width.is_some()
}

// ---------------------------------------------------------------------------
// Sampling helpers
// ---------------------------------------------------------------------------

/// Read up to `max_lines` lines from the first [`SAMPLE_BYTES`] of `path`,
/// lossily decoded and trimmed. The file handle is dropped before returning.
pub fn read_sample(path: &Path, max_lines: usize) -> Result<Vec<String>> {
    let file = File::open(path).at(path)?;
    let mut reader = BufReader::new(file.take(SAMPLE_BYTES));
    let mut lines = Vec::with_capacity(max_lines);
    let mut buf = Vec::new();

    while lines.len() < max_lines {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).at(path)? == 0 {
            break;
        }
        let bytes = if lines.is_empty() { strip_bom(&buf) } else { &buf[..] };
        lines.push(String::from_utf8_lossy(bytes).trim().to_string());
    }
    Ok(lines)
}

pub(crate) fn strip_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
