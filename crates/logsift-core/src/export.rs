//! Export: write normalised records as a three-column CSV file.

use crate::{
    error::{IoContext, Result},
    types::LogRecord,
};
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::info;

pub const CSV_HEADER: [&str; 3] = ["timestamp", "level", "message"];

/// Write the header and one row per record to `writer`, LF-terminated.
///
/// The header is written explicitly so an empty `records` still produces a
/// well-formed file.
pub fn write_csv<W: Write>(writer: W, records: &[LogRecord]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    wtr.write_record(CSV_HEADER)?;
    for record in records {
        wtr.write_record([&record.timestamp, &record.level, &record.message])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Write `records` to `<destination>/<prefix>.csv`, creating `destination`
/// as needed and replacing any existing file. Returns the written path.
pub fn export_csv(records: &[LogRecord], destination: &Path, prefix: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(destination).at(destination)?;

    let file_name = if prefix.ends_with(".csv") {
        prefix.to_string()
    } else {
        format!("{prefix}.csv")
    };
    let path = destination.join(file_name);

    let file = File::create(&path).at(&path)?;
    write_csv(BufWriter::new(file), records)?;

    info!(path = %path.display(), rows = records.len(), "exported csv");
    Ok(path)
}
