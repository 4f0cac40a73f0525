//! Console output

use std::io::{self, Write};

use crossterm::tty::IsTty;

use super::format::{format_colored, format_plain};
use super::record::LogRecord;

/// Writes records to a terminal stream, styled when the stream is a terminal
pub struct ConsoleSink {
    writer: Box<dyn Write + Send>,
    ansi: bool,
}

impl ConsoleSink {
    /// Sink for any writer, with styling chosen by the caller
    pub fn new(writer: impl Write + Send + 'static, ansi: bool) -> Self {
        Self {
            writer: Box::new(writer),
            ansi,
        }
    }

    /// Sink for stdout; styled only if stdout is a terminal
    pub fn stdout() -> Self {
        let stdout = io::stdout();
        let ansi = stdout.is_tty();
        Self::new(stdout, ansi)
    }

    /// Whether ANSI styles are emitted
    pub fn ansi(&self) -> bool {
        self.ansi
    }

    /// Write one record; errors are dropped
    pub fn write_record(&mut self, record: &LogRecord) {
        let line = if self.ansi {
            format_colored(record)
        } else {
            format_plain(record)
        };
        let _ = writeln!(self.writer, "{}", line);
        let _ = self.writer.flush();
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Cloneable in-memory writer for inspecting console output in tests
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct CaptureBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

#[cfg(test)]
impl CaptureBuffer {
    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

#[cfg(test)]
impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
