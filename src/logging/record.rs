//! Log records and the call-site information attached to them

use std::error::Error;
use std::fmt;
use std::panic::Location;
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Placeholder file name when the call site is not known
pub const UNKNOWN_FILE: &str = "unknown";

/// Severity of a log record, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Debug,
    Info,
    #[serde(alias = "WARN")]
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// All severities, least severe first
    pub const ALL: [Severity; 5] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
    ];

    /// Get the display name for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// The closest `tracing` level, used to build subscriber filters
    pub fn as_tracing_level(&self) -> tracing::Level {
        match self {
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Info => tracing::Level::INFO,
            Severity::Warning => tracing::Level::WARN,
            Severity::Error | Severity::Critical => tracing::Level::ERROR,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` so width/alignment flags like `{:<8}` apply
        f.pad(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" | "TRACE" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "WARNING" | "WARN" => Ok(Severity::Warning),
            "ERROR" => Ok(Severity::Error),
            "CRITICAL" | "FATAL" => Ok(Severity::Critical),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE | tracing::Level::DEBUG => Severity::Debug,
            tracing::Level::INFO => Severity::Info,
            tracing::Level::WARN => Severity::Warning,
            tracing::Level::ERROR => Severity::Error,
        }
    }
}

/// Source file basename and line of the code that emitted a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerLocation {
    pub file: String,
    pub line: u32,
}

impl CallerLocation {
    /// Capture the location of the caller.
    ///
    /// Every function between the application code and this call must also be
    /// `#[track_caller]`, otherwise the reported location points inside them.
    #[track_caller]
    pub fn capture() -> Self {
        Self::from_location(Location::caller())
    }

    /// Build from a `std::panic::Location`
    pub fn from_location(location: &Location<'_>) -> Self {
        Self::from_parts(Some(location.file()), Some(location.line()))
    }

    /// Build from optional parts, falling back to `unknown`/0
    pub fn from_parts(file: Option<&str>, line: Option<u32>) -> Self {
        let file = file
            .and_then(|f| Path::new(f).file_name())
            .and_then(|name| name.to_str())
            .filter(|name| !name.is_empty())
            .unwrap_or(UNKNOWN_FILE);

        Self {
            file: file.to_string(),
            line: line.unwrap_or(0),
        }
    }

    /// Placeholder used when no call site could be determined
    pub fn unknown() -> Self {
        Self::from_parts(None, None)
    }
}

impl fmt::Display for CallerLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}]", self.file, self.line)
    }
}

/// A single log record
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Local time the record was created
    pub timestamp: DateTime<Local>,
    /// Severity of the record
    pub level: Severity,
    /// Where the record was emitted from
    pub location: CallerLocation,
    /// Log message
    pub message: String,
    /// Rendered error chain, when the record reports an error
    pub trace: Option<String>,
}

impl LogRecord {
    /// Create a new log record
    pub fn new(
        timestamp: DateTime<Local>,
        level: Severity,
        location: CallerLocation,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            level,
            location,
            message: message.into(),
            trace: None,
        }
    }

    /// Attach an error, rendered with its full `source()` chain
    pub fn with_error(mut self, error: &(dyn Error + 'static)) -> Self {
        self.trace = Some(render_error_chain(error));
        self
    }

    /// Attach an already rendered trace
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        self.trace = Some(trace.into());
        self
    }
}

/// Render an error and its causes, one per line
pub fn render_error_chain(error: &(dyn Error + 'static)) -> String {
    let mut out = format!("Error: {}", error);
    let mut source = error.source();
    if source.is_some() {
        out.push_str("\n\nCaused by:");
    }
    let mut index = 0;
    while let Some(cause) = source {
        out.push_str(&format!("\n    {}: {}", index, cause));
        source = cause.source();
        index += 1;
    }
    out
}
