//! Test builders: ergonomic constructors for records and log directories.
//!
//! These are designed for readability in test assertions, not for production
//! use. They panic on I/O failure rather than returning `Result`.

use logsift_core::LogRecord;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

pub fn record(ts: &str, level: &str, message: &str) -> LogRecord {
    LogRecord::new(ts, level, message)
}

pub fn info(message: &str) -> LogRecord {
    record("2026-02-20 12:00:00", "INFO", message)
}

pub fn warning(message: &str) -> LogRecord {
    record("2026-02-20 12:01:00", "WARNING", message)
}

pub fn error(message: &str) -> LogRecord {
    record("2026-02-20 12:02:00", "ERROR", message)
}

/// `n` records where every block of ten holds one ERROR, two WARNINGs and
/// seven INFOs.
pub fn build_corpus(n: usize) -> Vec<LogRecord> {
    (0..n)
        .map(|i| match i % 10 {
            0 => error(&format!("log line {i}")),
            1 | 2 => warning(&format!("log line {i}")),
            _ => info(&format!("log line {i}")),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// LogDirBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a temporary directory of log files.
///
/// # Example
///
/// ```rust
/// let dir = LogDirBuilder::new()
///     .file("app.log", "2026-02-20 12:00:00 INFO started")
///     .file("events.json", r#"[{"level":"error"}]"#)
///     .build();
/// ```
#[derive(Default)]
pub struct LogDirBuilder {
    files: Vec<(String, Vec<u8>)>,
}

impl LogDirBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn file(mut self, name: &str, content: impl AsRef<[u8]>) -> Self {
        self.files.push((name.to_string(), content.as_ref().to_vec()));
        self
    }

    pub fn build(self) -> LogDir {
        let dir = tempfile::tempdir().expect("create temp dir");
        for (name, content) in self.files {
            std::fs::write(dir.path().join(&name), content).expect("write fixture");
        }
        LogDir { dir }
    }
}

/// A populated temp directory, removed on drop.
pub struct LogDir {
    dir: TempDir,
}

impl LogDir {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn join(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Export directory nested inside the log dir. Discovery skips it since
    /// it is a directory.
    pub fn out(&self) -> PathBuf {
        self.dir.path().join("out")
    }
}
