//! Logging facade
//!
//! Color-coded console output, a plain-text daily rotating file, retention
//! cleanup of rolled files, and caller file/line on every record.

mod clock;
mod console;
mod error;
mod file_writer;
mod format;
mod layer;
mod logger;
mod record;
mod registry;
mod retention;

pub use clock::{Clock, ManualClock, SystemClock};
pub use console::ConsoleSink;
pub use error::LoggingError;
pub use file_writer::{RotatingFile, LOG_FILE_NAME};
pub use format::{format_colored, format_plain, TIMESTAMP_FORMAT};
pub use layer::{init_tracing, FacadeLayer};
pub use logger::Logger;
pub use record::{render_error_chain, CallerLocation, LogRecord, Severity};
pub use registry::LoggerRegistry;
pub use retention::{cleanup_old_logs, DEFAULT_BACKUP_COUNT};
