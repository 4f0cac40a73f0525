//! pretty-logger - color-coded logging with caller locations and daily rotation
//!
//! Get loggers from a [`logging::LoggerRegistry`] owned by the application.

pub mod config;
pub mod logging;

pub use config::LoggerConfig;
pub use logging::{Logger, LoggerRegistry, Severity};
