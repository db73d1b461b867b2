//! Batch pipeline. Detects, verifies and parses every log file in a directory,
//! then summarises, filters and exports the combined records once.
//!
//! Files are processed in lexical path order. A file that cannot be read is
//! recorded as a [`FileFailure`] and contributes no records; the batch
//! carries on. [`Pipeline::run_concurrent`] parses files on tokio's blocking
//! pool and reassembles results in the same order, so both entry points
//! produce identical exports.

use crate::{
    aggregate::{merge, summarize, LevelFilter, LevelSummary},
    config::Config,
    detect::resolve,
    error::{IoContext, Result},
    export::export_csv,
    parse::parse_file,
    types::{has_recognized_extension, FormatTag, LogRecord},
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::task::JoinSet;
use tracing::{info, warn};

// ---------------------------------------------------------------------------
// Options and results
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Directory the combined CSV is written to; created if missing.
    pub output_dir: PathBuf,
    /// File name of the export, without the `.csv` suffix.
    pub prefix: String,
    pub filter: LevelFilter,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from_config(&Config::defaults())
    }
}

impl PipelineOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            output_dir: config.output.dir.clone(),
            prefix: config.output.prefix.clone(),
            filter: config.filter.level_filter(),
        }
    }
}

/// Records taken from one file and the format they were parsed as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingested {
    pub format: FormatTag,
    pub records: Vec<LogRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub format: FormatTag,
    pub records: usize,
}

/// A file that could not be read at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: PathBuf,
    pub cause: String,
}

/// Everything gathered from a directory before summarising.
#[derive(Debug, Clone, Default)]
pub struct Collected {
    pub records: Vec<LogRecord>,
    pub files: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
}

impl Collected {
    fn absorb(&mut self, path: PathBuf, result: Result<Ingested>) {
        match result {
            Ok(Ingested { format, records }) => {
                info!(path = %path.display(), %format, records = records.len(), "ingested file");
                self.files.push(FileReport {
                    path,
                    format,
                    records: records.len(),
                });
                self.records.extend(records);
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "skipping unreadable file");
                self.failures.push(FileFailure {
                    path,
                    cause: err.to_string(),
                });
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub path: PathBuf,
    /// Counts over every collected record, before filtering.
    pub summary: LevelSummary,
    /// Rows written after filtering.
    pub exported: usize,
    pub files: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
}

/// Outcome of [`Pipeline::run`].
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ExportResult {
    /// No records were collected; nothing was exported.
    NoLogs {
        files: Vec<FileReport>,
        failures: Vec<FileFailure>,
    },
    Exported(ExportReport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    /// At least one file could not be read.
    PartialFailure,
    /// Nothing to export and nothing failed.
    NoInput,
}

impl ExportResult {
    pub fn failures(&self) -> &[FileFailure] {
        match self {
            ExportResult::NoLogs { failures, .. } => failures,
            ExportResult::Exported(report) => &report.failures,
        }
    }

    pub fn files(&self) -> &[FileReport] {
        match self {
            ExportResult::NoLogs { files, .. } => files,
            ExportResult::Exported(report) => &report.files,
        }
    }

    pub fn status(&self) -> RunStatus {
        if !self.failures().is_empty() {
            RunStatus::PartialFailure
        } else if matches!(self, ExportResult::NoLogs { .. }) {
            RunStatus::NoInput
        } else {
            RunStatus::Success
        }
    }
}

// ---------------------------------------------------------------------------
// Single file
// ---------------------------------------------------------------------------

/// Detect, verify and parse one file, whatever its extension.
pub fn ingest_file(path: &Path) -> Result<Ingested> {
    let format = resolve(path);
    let records = parse_file(path, format)?;
    Ok(Ingested { format, records })
}

/// Regular files in `dir` with a recognised log suffix, in lexical order.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).at(dir)? {
        let path = entry.at(dir)?.path();
        if path.is_file() && has_recognized_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Ingest every log file in `dir`, one after another.
    pub fn collect(&self, dir: &Path) -> Result<Collected> {
        let mut collected = Collected::default();
        for path in discover(dir)? {
            let result = ingest_file(&path);
            collected.absorb(path, result);
        }
        Ok(collected)
    }

    /// Ingest every log file in `dir` on the blocking pool. Must be called
    /// from within a tokio runtime.
    pub async fn collect_concurrent(&self, dir: &Path) -> Result<Collected> {
        let files = discover(dir)?;
        let mut workers = JoinSet::new();
        for (index, path) in files.into_iter().enumerate() {
            workers.spawn_blocking(move || {
                let result = ingest_file(&path);
                (index, path, result)
            });
        }

        let mut finished = Vec::with_capacity(workers.len());
        while let Some(joined) = workers.join_next().await {
            finished.push(joined?);
        }
        finished.sort_by_key(|(index, _, _)| *index);

        let mut collected = Collected::default();
        let mut batches = Vec::with_capacity(finished.len());
        for (_, path, result) in finished {
            let mut staged = Collected::default();
            staged.absorb(path, result);
            collected.files.append(&mut staged.files);
            collected.failures.append(&mut staged.failures);
            batches.push(staged.records);
        }
        collected.records = merge(batches);
        Ok(collected)
    }

    pub fn run(&self, dir: &Path) -> Result<ExportResult> {
        let collected = self.collect(dir)?;
        self.finish(collected)
    }

    pub async fn run_concurrent(&self, dir: &Path) -> Result<ExportResult> {
        let collected = self.collect_concurrent(dir).await?;
        self.finish(collected)
    }

    fn finish(&self, collected: Collected) -> Result<ExportResult> {
        let Collected {
            mut records,
            files,
            failures,
        } = collected;

        if records.is_empty() {
            info!(files = files.len(), failures = failures.len(), "no logs found");
            return Ok(ExportResult::NoLogs { files, failures });
        }

        let summary = summarize(&records);
        self.options.filter.retain(&mut records);
        let path = export_csv(&records, &self.options.output_dir, &self.options.prefix)?;

        Ok(ExportResult::Exported(ExportReport {
            path,
            summary,
            exported: records.len(),
            files,
            failures,
        }))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
