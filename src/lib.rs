//! logsift: detect, normalise, summarise and export heterogeneous log files.
//!
//! Re-exports the workspace crates so integration tests, benches and the
//! binary can import everything from one place.
//!
//! # Architecture
//!
//! ```text
//! Detector ──► Parsers ──► Aggregator ──► Exporter
//!     └───────────── Pipeline ──────────────┘
//!                       │
//!                       └──► report (terminal)   generate (fixtures)
//! ```

pub use logsift_core::*;

pub use logsift_gen as generate;
pub use logsift_report as report;
