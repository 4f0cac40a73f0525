//! The logger handed to application code
//!
//! Every public logging method is `#[track_caller]`, so the location tag on a
//! record is the application line that called it.

use std::error::Error;
use std::fmt;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::LoggerConfig;

use super::clock::{Clock, SystemClock};
use super::console::ConsoleSink;
use super::file_writer::RotatingFile;
use super::format::format_plain;
use super::record::{render_error_chain, CallerLocation, LogRecord, Severity};

/// Output targets, guarded together so rotate and write happen as one step
struct Sinks {
    console: Option<ConsoleSink>,
    file: RotatingFile,
}

impl Sinks {
    fn write(&mut self, record: &LogRecord) {
        if let Some(console) = self.console.as_mut() {
            console.write_record(record);
        }
        self.file
            .write_line(record.timestamp.date_naive(), &format_plain(record));
    }
}

/// Writes records to the console and a daily rotating file
pub struct Logger {
    config: LoggerConfig,
    file_path: PathBuf,
    clock: Arc<dyn Clock>,
    sinks: Mutex<Sinks>,
}

impl Logger {
    /// Logger on the wall clock, printing to stdout
    pub fn new(config: LoggerConfig) -> Self {
        Self::with_parts(config, Arc::new(SystemClock), ConsoleSink::stdout())
    }

    /// Logger with an explicit clock and console sink
    ///
    /// The console sink is ignored when `config.console` is false.
    pub fn with_parts(config: LoggerConfig, clock: Arc<dyn Clock>, console: ConsoleSink) -> Self {
        // Failure here is reported by the file sink on first write
        let _ = std::fs::create_dir_all(&config.log_dir);

        let file = RotatingFile::new(&config.log_dir, config.backup_count);
        let file_path = file.path().to_path_buf();
        let sinks = Sinks {
            console: config.console.then_some(console),
            file,
        };

        Self {
            config,
            file_path,
            clock,
            sinks: Mutex::new(sinks),
        }
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Path of the active log file
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Whether records at `level` are written
    pub fn enabled(&self, level: Severity) -> bool {
        level >= self.config.min_level
    }

    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        self.emit(Severity::Debug, message, Location::caller());
    }

    #[track_caller]
    pub fn info(&self, message: impl fmt::Display) {
        self.emit(Severity::Info, message, Location::caller());
    }

    #[track_caller]
    pub fn warning(&self, message: impl fmt::Display) {
        self.emit(Severity::Warning, message, Location::caller());
    }

    #[track_caller]
    pub fn error(&self, message: impl fmt::Display) {
        self.emit(Severity::Error, message, Location::caller());
    }

    #[track_caller]
    pub fn critical(&self, message: impl fmt::Display) {
        self.emit(Severity::Critical, message, Location::caller());
    }

    /// Log at ERROR with `error` and its causes rendered below the message
    #[track_caller]
    pub fn exception(&self, message: impl fmt::Display, error: &(dyn Error + 'static)) {
        if !self.enabled(Severity::Error) {
            return;
        }
        let location = CallerLocation::from_location(Location::caller());
        self.emit_at(
            Severity::Error,
            location,
            message.to_string(),
            Some(render_error_chain(error)),
        );
    }

    /// Stamp and write a record in one step
    ///
    /// The timestamp is taken under the sink lock, so a record can never be
    /// stamped for a day whose file has already been rolled by another thread.
    pub fn emit_at(
        &self,
        level: Severity,
        location: CallerLocation,
        message: String,
        trace: Option<String>,
    ) {
        if !self.enabled(level) {
            return;
        }

        let mut sinks = self.lock();
        let mut record = LogRecord::new(self.clock.now(), level, location, message);
        record.trace = trace;
        sinks.write(&record);
    }

    /// Build a record stamped with this logger's clock
    pub fn make_record(
        &self,
        level: Severity,
        location: CallerLocation,
        message: impl Into<String>,
    ) -> LogRecord {
        LogRecord::new(self.clock.now(), level, location, message)
    }

    /// Write a prebuilt record to every sink
    ///
    /// A record stamped before the open file's day lands in that day's rolled file.
    pub fn log(&self, record: LogRecord) {
        if !self.enabled(record.level) {
            return;
        }

        self.lock().write(&record);
    }

    /// Flush both sinks
    pub fn flush(&self) {
        let mut sinks = self.lock();
        if let Some(console) = sinks.console.as_mut() {
            let _ = console.flush();
        }
        let _ = sinks.file.flush();
    }

    fn emit(&self, level: Severity, message: impl fmt::Display, location: &Location<'_>) {
        if !self.enabled(level) {
            return;
        }
        // Render before locking; a Display impl may itself log
        let message = message.to_string();
        self.emit_at(level, CallerLocation::from_location(location), message, None);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Sinks> {
        // A panic mid-write leaves nothing inconsistent worth refusing to log over
        self.sinks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.flush();
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
