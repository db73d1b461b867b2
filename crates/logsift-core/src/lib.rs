//! logsift-core: detect, normalise, summarise and export log files.
//!
//! This crate exposes each pipeline stage as a public module, plus the
//! shared types used across all stages.
//!
//! # Architecture
//!
//! ```text
//! Detector ──► Parsers ──► Aggregator ──► Exporter
//!     └───────────── Pipeline ──────────────┘
//! ```
//!
//! The detector guesses a [`FormatTag`] per file and verifies it with a real
//! structural parse; the parsers turn content into [`LogRecord`]s without
//! failing on malformed input; the aggregator counts and filters; the
//! exporter writes one CSV. [`pipeline::Pipeline`] wires them together over
//! a directory. Nothing here prompts or prints: callers pass paths and
//! filters in and get structured results back.

pub mod aggregate;
pub mod config;
pub mod detect;
pub mod error;
pub mod export;
pub mod parse;
pub mod pipeline;
pub mod types;

pub use aggregate::{filter, summarize, LevelFilter, LevelSummary};
pub use detect::{detect, resolve, verify};
pub use error::{Error, Result};
pub use export::export_csv;
pub use parse::parse_file;
pub use pipeline::{ingest_file, ExportResult, Pipeline, PipelineOptions, RunStatus};
pub use types::{FormatTag, LogRecord};
