//! Registry of loggers, one per log directory
//!
//! Owned by the application and passed to whatever needs a logger. Dropping the
//! registry (or calling [`LoggerRegistry::shutdown`]) releases its loggers once
//! no component still holds one.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::{LoggerConfig, DEFAULT_LOG_DIR};

use super::clock::{Clock, SystemClock};
use super::console::ConsoleSink;
use super::error::LoggingError;
use super::logger::Logger;
use super::retention::DEFAULT_BACKUP_COUNT;

/// Hands out shared loggers keyed by log directory
pub struct LoggerRegistry {
    clock: Arc<dyn Clock>,
    loggers: Mutex<HashMap<PathBuf, Arc<Logger>>>,
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerRegistry {
    /// Registry whose loggers use the wall clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Registry whose loggers use `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            loggers: Mutex::new(HashMap::new()),
        }
    }

    /// Logger for `logs/` with 30 days of retention
    pub fn get_default(&self) -> Result<Arc<Logger>, LoggingError> {
        self.get_logger(DEFAULT_LOG_DIR, DEFAULT_BACKUP_COUNT)
    }

    /// Logger for a directory and retention window
    pub fn get_logger(
        &self,
        log_dir: impl AsRef<Path>,
        backup_count: u32,
    ) -> Result<Arc<Logger>, LoggingError> {
        self.get(LoggerConfig::new(log_dir.as_ref(), backup_count))
    }

    /// Logger for `config`
    ///
    /// The first request for a directory builds the logger; later requests with
    /// the same settings get the same instance. A request for a registered
    /// directory with different settings fails instead of silently reusing it.
    pub fn get(&self, config: LoggerConfig) -> Result<Arc<Logger>, LoggingError> {
        let log_dir = resolve_dir(&config.log_dir);
        let config = LoggerConfig {
            log_dir: log_dir.clone(),
            ..config
        };

        let mut loggers = self.loggers.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = loggers.get(&log_dir) {
            if existing.config() != &config {
                return Err(LoggingError::ConflictingConfig {
                    log_dir,
                    existing: Box::new(existing.config().clone()),
                    requested: Box::new(config),
                });
            }
            return Ok(Arc::clone(existing));
        }

        let logger = Arc::new(Logger::with_parts(
            config,
            Arc::clone(&self.clock),
            ConsoleSink::stdout(),
        ));
        loggers.insert(log_dir, Arc::clone(&logger));
        Ok(logger)
    }

    /// Number of registered loggers
    pub fn len(&self) -> usize {
        self.loggers
            .lock()
            .map(|loggers| loggers.len())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flush and forget every logger
    pub fn shutdown(&self) {
        let mut loggers = self.loggers.lock().unwrap_or_else(PoisonError::into_inner);
        for logger in loggers.values() {
            logger.flush();
        }
        loggers.clear();
    }
}

impl Drop for LoggerRegistry {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Create the directory and return its canonical form, so `logs` and `./logs`
/// share one logger. Falls back to the path as given.
fn resolve_dir(dir: &Path) -> PathBuf {
    let _ = std::fs::create_dir_all(dir);
    std::fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf())
}
