//! Aggregator: merging, level counts, level filtering.
//!
//! [`summarize`] returns structured counts, never formatted text; printing is
//! left to the caller (see the `logsift-report` crate).

use crate::types::{normalize_level, LogRecord, UNKNOWN_LEVEL};
use serde::{ser::SerializeMap, Serialize, Serializer};
use std::{
    collections::{BTreeMap, BTreeSet},
    str::FromStr,
};

/// Key holding the record count in [`LevelSummary::to_map`].
pub const TOTAL_KEY: &str = "TOTAL";

/// Key a level literally named `TOTAL` is reported under in
/// [`LevelSummary::to_map`] and the serialized summary. Normalised levels are
/// upper-case, so the lower-case prefix cannot collide with a real level.
pub const TOTAL_LEVEL_KEY: &str = "level:TOTAL";

/// Share of warnings plus errors above which activity counts as unusual.
pub const DEFAULT_UNUSUAL_THRESHOLD: f64 = 0.2;

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Concatenate per-file record batches, keeping batch order and the order
/// within each batch.
pub fn merge<I>(batches: I) -> Vec<LogRecord>
where
    I: IntoIterator<Item = Vec<LogRecord>>,
{
    batches.into_iter().flatten().collect()
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Per-level record counts plus the total.
///
/// Levels are whatever normalised values occur, so custom levels survive.
/// Records with an empty level are counted under [`UNKNOWN_LEVEL`].
/// Serializes as one flat object: every level, then [`TOTAL_KEY`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelSummary {
    levels: BTreeMap<String, usize>,
    total: usize,
}

pub fn summarize(records: &[LogRecord]) -> LevelSummary {
    let mut levels = BTreeMap::new();
    for record in records {
        *levels.entry(bucket(&record.level)).or_insert(0) += 1;
    }
    LevelSummary {
        levels,
        total: records.len(),
    }
}

fn level_key(level: &str) -> &str {
    if level == TOTAL_KEY {
        TOTAL_LEVEL_KEY
    } else {
        level
    }
}

impl Serialize for LevelSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.levels.len() + 1))?;
        for (level, count) in &self.levels {
            map.serialize_entry(level_key(level), count)?;
        }
        map.serialize_entry(TOTAL_KEY, &self.total)?;
        map.end()
    }
}

/// Summary bucket of a raw level: normalised, with empty mapped to
/// [`UNKNOWN_LEVEL`]. Filtering uses the same mapping.
fn bucket(level: &str) -> String {
    let level = normalize_level(level);
    if level.is_empty() {
        UNKNOWN_LEVEL.to_string()
    } else {
        level
    }
}

impl LevelSummary {
    pub fn total(&self) -> usize {
        self.total
    }

    /// Count for `level` (any case); zero when absent.
    pub fn count(&self, level: &str) -> usize {
        self.levels.get(&bucket(level)).copied().unwrap_or(0)
    }

    pub fn warning_count(&self) -> usize {
        self.count("WARNING")
    }

    pub fn error_count(&self) -> usize {
        self.count("ERROR")
    }

    /// Level buckets in lexical order, without the total.
    pub fn levels(&self) -> impl Iterator<Item = (&str, usize)> {
        self.levels.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Flat `level -> count` mapping with the synthetic `TOTAL` key. A level
    /// named `TOTAL` moves to [`TOTAL_LEVEL_KEY`].
    pub fn to_map(&self) -> BTreeMap<String, usize> {
        let mut map: BTreeMap<String, usize> = self
            .levels
            .iter()
            .map(|(level, count)| (level_key(level).to_string(), *count))
            .collect();
        map.insert(TOTAL_KEY.to_string(), self.total);
        map
    }

    pub fn is_unusual(&self) -> bool {
        self.is_unusual_with(DEFAULT_UNUSUAL_THRESHOLD)
    }

    /// `(warnings + errors) / total > threshold`; an empty summary is never
    /// unusual.
    pub fn is_unusual_with(&self, threshold: f64) -> bool {
        if self.total == 0 {
            return false;
        }
        let flagged = (self.warning_count() + self.error_count()) as f64;
        flagged / self.total as f64 > threshold
    }
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Which records to keep, by level.
///
/// `All` disables filtering. `Levels` keeps records whose normalised level is
/// in the set; an empty set keeps nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LevelFilter {
    #[default]
    All,
    Levels(BTreeSet<String>),
}

impl LevelFilter {
    /// Build from caller-supplied level names. No names means no filtering.
    pub fn from_levels<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set: BTreeSet<String> = levels
            .into_iter()
            .map(|l| normalize_level(l.as_ref()))
            .filter(|l| !l.is_empty())
            .collect();
        if set.is_empty() {
            LevelFilter::All
        } else {
            LevelFilter::Levels(set)
        }
    }

    /// Warnings and errors.
    pub fn suspicious() -> Self {
        Self::from_levels(["WARNING", "ERROR"])
    }

    pub fn errors() -> Self {
        Self::from_levels(["ERROR"])
    }

    pub fn warnings() -> Self {
        Self::from_levels(["WARNING"])
    }

    pub fn matches(&self, record: &LogRecord) -> bool {
        match self {
            LevelFilter::All => true,
            LevelFilter::Levels(set) => set.contains(&bucket(&record.level)),
        }
    }

    pub fn apply(&self, records: &[LogRecord]) -> Vec<LogRecord> {
        records.iter().filter(|r| self.matches(r)).cloned().collect()
    }

    /// In-place variant of [`apply`](Self::apply).
    pub fn retain(&self, records: &mut Vec<LogRecord>) {
        if let LevelFilter::Levels(_) = self {
            records.retain(|r| self.matches(r));
        }
    }
}

impl FromStr for LevelFilter {
    type Err = String;

    /// `all`/`everything`, `suspicious`, `errors`, `warnings`, or a comma
    /// separated list of level names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" | "everything" => Ok(LevelFilter::All),
            "suspicious" => Ok(LevelFilter::suspicious()),
            "errors" => Ok(LevelFilter::errors()),
            "warnings" => Ok(LevelFilter::warnings()),
            list => {
                let filter = LevelFilter::from_levels(list.split(','));
                match filter {
                    LevelFilter::All => Err(format!("no level names in {s:?}")),
                    levels => Ok(levels),
                }
            }
        }
    }
}

/// Keep records whose level is in `wanted` (case-insensitive). An empty
/// `wanted` returns every record.
pub fn filter<S: AsRef<str>>(records: &[LogRecord], wanted: &[S]) -> Vec<LogRecord> {
    LevelFilter::from_levels(wanted).apply(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
