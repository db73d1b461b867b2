//! JSON parser: a top-level array of objects, or one object.
//!
//! Each object contributes `timestamp`, `level` and `message`; missing keys
//! and `null` become empty strings, other scalars are rendered as JSON text.
//! Array elements that are not objects are skipped. Content that is not JSON
//! at all, or whose top level is a bare scalar, is handed to the text parser.

use super::text;
use crate::types::LogRecord;
use serde_json::{Map, Value};
use tracing::{debug, warn};

pub fn parse(content: &str) -> Vec<LogRecord> {
    let document: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(err) => {
            warn!(%err, "content is not valid json, parsing as text lines");
            return text::parse(content);
        }
    };

    match document {
        Value::Array(items) => {
            let total = items.len();
            let records: Vec<LogRecord> = items.iter().filter_map(record_from).collect();
            if records.len() < total {
                debug!(skipped = total - records.len(), "non-object json array elements");
            }
            records
        }
        Value::Object(ref object) => vec![record_from_object(object)],
        _ => {
            warn!("top-level json value is a scalar, parsing as text lines");
            text::parse(content)
        }
    }
}

fn record_from(value: &Value) -> Option<LogRecord> {
    value.as_object().map(record_from_object)
}

fn record_from_object(object: &Map<String, Value>) -> LogRecord {
    LogRecord::new(
        field(object, "timestamp"),
        field(object, "level"),
        field(object, "message"),
    )
}

fn field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
