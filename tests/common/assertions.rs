//! Domain-specific assertion macros for logsift harnesses.
//!
//! These give context-rich failure messages that make it clear which record
//! broke an invariant and what it looked like.

use logsift_core::LogRecord;

// ---------------------------------------------------------------------------
// Record assertions
// ---------------------------------------------------------------------------

/// Assert that a `LogRecord` carries a specific normalised level.
///
/// ```rust
/// assert_level!(records[0], "ERROR");
/// ```
#[macro_export]
macro_rules! assert_level {
    ($record:expr, $level:expr) => {{
        let record: &logsift_core::LogRecord = &$record;
        let expected: &str = $level;
        if record.level != expected {
            panic!(
                "assert_level! failed:\n  expected: {:?}\n  actual:   {:?}\n  record: {:?}",
                expected, record.level, record
            );
        }
    }};
}

/// Assert all three fields of a `LogRecord` at once.
///
/// ```rust
/// assert_record!(records[0], "t1", "INFO", "msg1");
/// ```
#[macro_export]
macro_rules! assert_record {
    ($record:expr, $ts:expr, $level:expr, $message:expr) => {{
        let record: &logsift_core::LogRecord = &$record;
        let expected = logsift_core::LogRecord {
            timestamp: $ts.to_string(),
            level: $level.to_string(),
            message: $message.to_string(),
        };
        pretty_assertions::assert_eq!(*record, expected);
    }};
}

/// Assert that every record in a slice satisfies a predicate.
///
/// ```rust
/// assert_records_all!(records, |r: &LogRecord| r.level == "ERROR");
/// ```
#[macro_export]
macro_rules! assert_records_all {
    ($records:expr, $pred:expr) => {{
        let records: &[logsift_core::LogRecord] = &$records;
        let pred = $pred;
        let failing: Vec<_> = records.iter().filter(|r| !pred(*r)).collect();
        if !failing.is_empty() {
            panic!(
                "assert_records_all! failed: {} of {} records did not satisfy predicate.\n  first: {:?}",
                failing.len(),
                records.len(),
                failing[0]
            );
        }
    }};
}

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Every parser must emit trimmed, upper-cased levels.
pub fn assert_levels_normalised(records: &[LogRecord]) {
    for record in records {
        assert_eq!(
            record.level,
            record.level.trim().to_uppercase(),
            "level not normalised: {record:?}"
        );
    }
}

/// Levels of `records`, in order, for compact comparisons.
pub fn levels(records: &[LogRecord]) -> Vec<&str> {
    records.iter().map(|r| r.level.as_str()).collect()
}

pub fn messages(records: &[LogRecord]) -> Vec<&str> {
    records.iter().map(|r| r.message.as_str()).collect()
}
