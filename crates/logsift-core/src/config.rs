//! Configuration types for logsift.
//!
//! [`Config::load`] reads `~/.config/logsift/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use crate::{
    aggregate::{LevelFilter, DEFAULT_UNUSUAL_THRESHOLD},
    error::{IoContext, Result},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[output]
dir    = "output"
prefix = "selected_logs"

[filter]
levels = []

[summary]
unusual_threshold = 0.2

[pipeline]
concurrent = false
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/logsift/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub summary: SummaryConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// `[output]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_output_dir() -> PathBuf { PathBuf::from("output") }
fn default_prefix() -> String { "selected_logs".to_string() }

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            prefix: default_prefix(),
        }
    }
}

/// `[filter]` section. An empty `levels` list exports everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub levels: Vec<String>,
}

impl FilterConfig {
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_levels(&self.levels)
    }
}

/// `[summary]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryConfig {
    #[serde(default = "default_unusual_threshold")]
    pub unusual_threshold: f64,
}

fn default_unusual_threshold() -> f64 { DEFAULT_UNUSUAL_THRESHOLD }

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            unusual_threshold: default_unusual_threshold(),
        }
    }
}

/// `[pipeline]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineConfig {
    /// Parse files on a blocking worker pool instead of one after another.
    #[serde(default)]
    pub concurrent: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/logsift/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).at(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start()).at(&path)?;
        }

        Self::load_from(&path)
    }

    /// Layer `path` (if present) over the built-in defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("logsift")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
