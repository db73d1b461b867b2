//! Core types for logsift-core.
//!
//! This module defines the fundamental data structures shared across all
//! pipeline stages: the normalised [`LogRecord`] and the [`FormatTag`]
//! classification produced by the detector.

use serde::{Deserialize, Serialize};
use std::{fmt, path::Path, str::FromStr};

/// Level value used by the aggregator for records without a level.
pub const UNKNOWN_LEVEL: &str = "UNKNOWN";

/// A normalised log entry produced by every parser.
///
/// All three fields are always present. Values may be empty when the source
/// did not carry them; `level` is upper-cased on construction so downstream
/// filtering and summarising can compare by equality.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub message: String,
}

impl LogRecord {
    pub fn new(
        timestamp: impl Into<String>,
        level: impl AsRef<str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            level: normalize_level(level.as_ref()),
            message: message.into(),
        }
    }

    /// A line that could not be split: no timestamp, no level, the whole
    /// (trimmed) line as message.
    pub fn unstructured(line: &str) -> Self {
        Self {
            timestamp: String::new(),
            level: String::new(),
            message: line.trim().to_string(),
        }
    }
}

/// Upper-case and trim a raw level token. `"info"`, `"Info"` and `" INFO "`
/// all become `"INFO"`.
pub fn normalize_level(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Content shape of a log file, as classified by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTag {
    Text,
    Csv,
    Json,
    Xml,
}

impl FormatTag {
    /// File suffixes the batch pipeline picks up, in the order they are
    /// usually listed.
    pub const RECOGNIZED_EXTENSIONS: [&'static str; 5] = ["txt", "log", "csv", "json", "xml"];

    /// Map a file extension (without the dot, any case) to a tag.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "txt" | "log" => Some(FormatTag::Text),
            "csv" => Some(FormatTag::Csv),
            "json" => Some(FormatTag::Json),
            "xml" => Some(FormatTag::Xml),
            _ => None,
        }
    }

    /// Tag implied by the extension of `path`, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormatTag::Text => "text",
            FormatTag::Csv => "csv",
            FormatTag::Json => "json",
            FormatTag::Xml => "xml",
        }
    }
}

/// True when `path` carries one of [`FormatTag::RECOGNIZED_EXTENSIONS`].
pub fn has_recognized_extension(path: &Path) -> bool {
    FormatTag::from_path(path).is_some()
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" | "log" => Ok(FormatTag::Text),
            "csv" => Ok(FormatTag::Csv),
            "json" => Ok(FormatTag::Json),
            "xml" => Ok(FormatTag::Xml),
            other => Err(format!("unknown format: {other}")),
        }
    }
}
