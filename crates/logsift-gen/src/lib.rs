//! logsift-gen: random multi-format log fixtures.
//!
//! [`generate_logs`] draws one random record set and writes it to the same
//! directory as `.txt`, `.log`, `.json`, `.csv` and `.xml` files, so every
//! parser can be checked against identical content. Pass a seeded RNG for
//! reproducible fixtures.

use chrono::{Duration, Local, NaiveDateTime};
use logsift_core::{export::write_csv, LogRecord};
use rand::Rng;
use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};
use tracing::info;

const USERS: &[&str] = &["john", "mary", "admin", "alice", "bob", "eve"];
const LEVELS: &[&str] = &["INFO", "WARNING", "ERROR", "DEBUG"];
const MESSAGES: &[&str] = &[
    "logged in",
    "logged out",
    "failed login attempt",
    "disk space low",
    "database connection timeout",
    "configuration updated",
    "file deleted",
    "permission denied",
    "process started",
    "process terminated",
];

/// Inclusive bounds on how many records [`generate_logs`] draws.
pub const MIN_RECORDS: usize = 5;
pub const MAX_RECORDS: usize = 15;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Debug, thiserror::Error)]
pub enum GenError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Export(#[from] logsift_core::Error),
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> GenError + '_ {
    move |source| GenError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Paths of one generated fixture set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    pub text: PathBuf,
    pub log: PathBuf,
    pub json: PathBuf,
    pub csv: PathBuf,
    pub xml: PathBuf,
}

impl GeneratedFiles {
    pub fn all(&self) -> [&Path; 5] {
        [&self.text, &self.log, &self.json, &self.csv, &self.xml]
    }
}

// ---------------------------------------------------------------------------
// Record generation
// ---------------------------------------------------------------------------

/// `count` random records with timestamps within the day before `now`.
pub fn random_records<R: Rng + ?Sized>(rng: &mut R, count: usize, now: NaiveDateTime) -> Vec<LogRecord> {
    (0..count)
        .map(|_| {
            let user = pick(rng, USERS);
            let level = pick(rng, LEVELS);
            let action = pick(rng, MESSAGES);
            let message = if action.contains("login") {
                format!("{action} for user {user} from {}", random_ip(rng))
            } else {
                format!("{action} by user {user}")
            };
            let ts = now - Duration::seconds(rng.gen_range(0..=SECONDS_PER_DAY));
            LogRecord::new(ts.format(TIMESTAMP_FORMAT).to_string(), level, message)
        })
        .collect()
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.gen_range(0..items.len())]
}

fn random_ip<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}.{}.{}.{}",
        rng.gen_range(1..=255u8),
        rng.gen::<u8>(),
        rng.gen::<u8>(),
        rng.gen::<u8>()
    )
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

/// Draw between [`MIN_RECORDS`] and [`MAX_RECORDS`] records and write them in
/// all five formats under `dir` (created if missing), named
/// `logs_<YYYYmmdd_HHMMSS>.<ext>`.
pub fn generate_logs<R: Rng + ?Sized>(dir: &Path, rng: &mut R) -> Result<GeneratedFiles, GenError> {
    let now = Local::now().naive_local();
    let count = rng.gen_range(MIN_RECORDS..=MAX_RECORDS);
    let records = random_records(rng, count, now);
    let stem = format!("logs_{}", now.format("%Y%m%d_%H%M%S"));
    write_fixture_set(dir, &stem, &records)
}

/// Write `records` as `<stem>.{txt,log,json,csv,xml}` under `dir`.
pub fn write_fixture_set(dir: &Path, stem: &str, records: &[LogRecord]) -> Result<GeneratedFiles, GenError> {
    std::fs::create_dir_all(dir).map_err(io_err(dir))?;
    let files = GeneratedFiles {
        text: dir.join(format!("{stem}.txt")),
        log: dir.join(format!("{stem}.log")),
        json: dir.join(format!("{stem}.json")),
        csv: dir.join(format!("{stem}.csv")),
        xml: dir.join(format!("{stem}.xml")),
    };

    let text = to_text(records);
    std::fs::write(&files.text, &text).map_err(io_err(&files.text))?;
    std::fs::write(&files.log, &text).map_err(io_err(&files.log))?;

    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(&files.json, json).map_err(io_err(&files.json))?;

    let csv = File::create(&files.csv).map_err(io_err(&files.csv))?;
    write_csv(BufWriter::new(csv), records)?;

    std::fs::write(&files.xml, to_xml(records)).map_err(io_err(&files.xml))?;

    info!(dir = %dir.display(), records = records.len(), "generated fixture set");
    Ok(files)
}

/// One `<timestamp> <level> <message>` line per record.
pub fn to_text(records: &[LogRecord]) -> String {
    records
        .iter()
        .map(|r| format!("{} {} {}", r.timestamp, r.level, r.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `<logs><log><timestamp/><level/><message/></log>…</logs>` with an XML
/// declaration.
pub fn to_xml(records: &[LogRecord]) -> String {
    use quick_xml::escape::escape;

    let mut out = String::from("<?xml version='1.0' encoding='utf-8'?>\n<logs>\n");
    for r in records {
        out.push_str(&format!(
            "  <log>\n    <timestamp>{}</timestamp>\n    <level>{}</level>\n    <message>{}</message>\n  </log>\n",
            escape(r.timestamp.as_str()),
            escape(r.level.as_str()),
            escape(r.message.as_str()),
        ));
    }
    out.push_str("</logs>\n");
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
