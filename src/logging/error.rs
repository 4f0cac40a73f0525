use std::path::PathBuf;

use thiserror::Error;

use crate::config::LoggerConfig;

/// Errors from building loggers or installing them as subscribers
///
/// Logging calls themselves never fail; these only come out of setup.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("log directory {log_dir:?} is already in use with a different configuration (existing: {existing:?}, requested: {requested:?})")]
    ConflictingConfig {
        log_dir: PathBuf,
        existing: Box<LoggerConfig>,
        requested: Box<LoggerConfig>,
    },

    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}
