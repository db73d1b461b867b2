//! Header-driven CSV parser.
//!
//! The first row names the columns; `timestamp`, `level` and `message` are
//! looked up case-insensitively and any other columns are ignored. Missing
//! columns and short rows yield empty strings. The delimiter is sniffed from
//! the first few lines and defaults to a comma.

use crate::{
    detect::{sniff_delimiter, SAMPLE_LINES},
    types::LogRecord,
};
use tracing::warn;

pub fn parse(content: &str) -> Vec<LogRecord> {
    let sample: Vec<&str> = content.lines().take(SAMPLE_LINES).collect();
    let delimiter = sniff_delimiter(&sample).unwrap_or(b',');

    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns = match reader.headers() {
        Ok(headers) => Columns::locate(headers),
        Err(err) => {
            warn!(%err, "csv header unreadable, no rows parsed");
            return Vec::new();
        }
    };

    let mut records = Vec::new();
    for (row, result) in reader.records().enumerate() {
        match result {
            Ok(fields) => records.push(columns.extract(&fields)),
            Err(err) => warn!(row = row + 1, %err, "skipping undecodable csv row"),
        }
    }
    records
}

/// Positions of the three normalised columns in the header row.
#[derive(Debug, Default, Clone, Copy)]
struct Columns {
    timestamp: Option<usize>,
    level: Option<usize>,
    message: Option<usize>,
}

impl Columns {
    fn locate(headers: &::csv::StringRecord) -> Self {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        Self {
            timestamp: find("timestamp"),
            level: find("level"),
            message: find("message"),
        }
    }

    fn extract(&self, row: &::csv::StringRecord) -> LogRecord {
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).unwrap_or_default();
        LogRecord::new(cell(self.timestamp), cell(self.level), cell(self.message))
    }
}
