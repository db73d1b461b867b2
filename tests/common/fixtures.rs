//! Static log corpora used across harnesses.
//!
//! The `SAMPLE_*` documents all encode the three records returned by
//! [`sample_records`], so each parser can be checked against the same
//! expectation.

use logsift_core::LogRecord;
use std::path::Path;

pub fn sample_records() -> Vec<LogRecord> {
    vec![
        LogRecord::new("2026-02-20 12:00:00", "INFO", "ok"),
        LogRecord::new("2026-02-20 12:01:00", "WARNING", "warn"),
        LogRecord::new("2026-02-20 12:02:00", "ERROR", "err"),
    ]
}

pub const SAMPLE_TEXT: &str = "\
2026-02-20 12:00:00 info ok
2026-02-20 12:01:00 Warning warn

2026-02-20 12:02:00 ERROR err
";

pub const SAMPLE_CSV: &str = "\
timestamp,level,message
2026-02-20 12:00:00,info,ok
2026-02-20 12:01:00,Warning,warn
2026-02-20 12:02:00,ERROR,err
";

pub const SAMPLE_JSON: &str = r#"[
    {"timestamp": "2026-02-20 12:00:00", "level": "info", "message": "ok"},
    {"timestamp": "2026-02-20 12:01:00", "level": "Warning", "message": "warn"},
    {"timestamp": "2026-02-20 12:02:00", "level": "ERROR", "message": "err"}
]"#;

pub const SAMPLE_XML: &str = r#"<?xml version='1.0' encoding='utf-8'?>
<logs>
  <log><timestamp>2026-02-20 12:00:00</timestamp><level>info</level><message>ok</message></log>
  <log><timestamp>2026-02-20 12:01:00</timestamp><level>Warning</level><message>warn</message></log>
  <log><timestamp>2026-02-20 12:02:00</timestamp><level>ERROR</level><message>err</message></log>
</logs>
"#;

/// Lines the text parser cannot split; each must survive as one record.
pub const CORPUS_UNSTRUCTURED: &[&str] = &[
    "Jan 15 10:00:02 myhost sshd[12345]: Failed password for invalid user admin",
    "[2024-01-15T10:00:03Z] WARN: Disk usage at 92% on /dev/sda1",
    "ERROR: NullPointerException at com.example.App.handle(App.java:42)",
    "10:00:05.123 [main] DEBUG o.s.w.s.DispatcherServlet - Initializing",
    "GET /api/v1/users 200 47ms",
];

/// Read an exported CSV back into records, header row skipped.
pub fn read_export(path: &Path) -> Vec<LogRecord> {
    let mut reader = csv::Reader::from_path(path).expect("open export");
    reader
        .deserialize()
        .collect::<Result<Vec<LogRecord>, _>>()
        .expect("export rows decode")
}
