//! Configuration for loggers

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::logging::{Severity, DEFAULT_BACKUP_COUNT};

/// Default directory for log files, relative to the working directory
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Logger configuration
///
/// Fixed once a logger has been built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Directory holding `applog.log` and its rolled files
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Days a rolled file is kept; 0 keeps them forever (default: 30)
    #[serde(default = "default_backup_count")]
    pub backup_count: u32,

    /// Records below this severity are dropped (default: DEBUG)
    #[serde(default = "default_min_level")]
    pub min_level: Severity,

    /// Also write records to stdout (default: true)
    #[serde(default = "default_console")]
    pub console: bool,
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_DIR)
}

fn default_backup_count() -> u32 {
    DEFAULT_BACKUP_COUNT
}

fn default_min_level() -> Severity {
    Severity::Debug
}

fn default_console() -> bool {
    true
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            backup_count: default_backup_count(),
            min_level: default_min_level(),
            console: default_console(),
        }
    }
}

impl LoggerConfig {
    /// Configuration for a directory and retention window, other fields default
    pub fn new(log_dir: impl Into<PathBuf>, backup_count: u32) -> Self {
        Self {
            log_dir: log_dir.into(),
            backup_count,
            ..Self::default()
        }
    }

    /// Set the minimum severity
    pub fn with_min_level(mut self, min_level: Severity) -> Self {
        self.min_level = min_level;
        self
    }

    /// Enable or disable console output
    pub fn with_console(mut self, console: bool) -> Self {
        self.console = console;
        self
    }

    /// Parse from TOML text; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse logger config")
    }

    /// Load configuration from file, or return default if not found
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content =
                std::fs::read_to_string(path).context("Failed to read logger config file")?;
            Self::from_toml_str(&content)
        } else {
            Ok(Self::default())
        }
    }
}
