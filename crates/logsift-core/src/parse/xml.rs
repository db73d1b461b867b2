//! Streaming XML parser for `<logs><log>…</log></logs>` documents.
//!
//! Every `<log>` element, at any depth, becomes one record built from the
//! text of its `timestamp`, `level` and `message` children. A syntax error
//! part-way through keeps the records completed before it.

use crate::types::{normalize_level, LogRecord};
use quick_xml::{events::Event, Reader};
use tracing::warn;

const ENTRY_TAG: &[u8] = b"log";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Timestamp,
    Level,
    Message,
}

impl Field {
    fn from_tag(name: &[u8]) -> Option<Self> {
        match name {
            b"timestamp" => Some(Field::Timestamp),
            b"level" => Some(Field::Level),
            b"message" => Some(Field::Message),
            _ => None,
        }
    }

    fn slot(self, record: &mut LogRecord) -> &mut String {
        match self {
            Field::Timestamp => &mut record.timestamp,
            Field::Level => &mut record.level,
            Field::Message => &mut record.message,
        }
    }
}

pub fn parse(content: &str) -> Vec<LogRecord> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut records = Vec::new();
    let mut current: Option<LogRecord> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = e.local_name();
                if name.as_ref() == ENTRY_TAG {
                    current = Some(LogRecord::default());
                    field = None;
                } else if current.is_some() {
                    field = Field::from_tag(name.as_ref());
                }
            }
            Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == ENTRY_TAG {
                    records.push(LogRecord::default());
                }
            }
            Ok(Event::Text(t)) => {
                if let (Some(record), Some(f)) = (current.as_mut(), field) {
                    match t.unescape() {
                        Ok(text) => f.slot(record).push_str(&text),
                        Err(_) => f.slot(record).push_str(&String::from_utf8_lossy(&t)),
                    }
                }
            }
            Ok(Event::CData(c)) => {
                if let (Some(record), Some(f)) = (current.as_mut(), field) {
                    f.slot(record).push_str(&String::from_utf8_lossy(&c));
                }
            }
            Ok(Event::End(e)) => {
                field = None;
                if e.local_name().as_ref() == ENTRY_TAG {
                    if let Some(record) = current.take() {
                        records.push(finish(record));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                warn!(
                    position = reader.buffer_position(),
                    %err,
                    kept = records.len(),
                    "xml syntax error, keeping records parsed so far"
                );
                break;
            }
            Ok(_) => {}
        }
    }
    records
}

fn finish(record: LogRecord) -> LogRecord {
    LogRecord {
        timestamp: record.timestamp.trim().to_string(),
        level: normalize_level(&record.level),
        message: record.message.trim().to_string(),
    }
}
