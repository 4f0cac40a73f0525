//! Line formatting for console and file output
//!
//! Both variants render `<timestamp> [<file>:<line>] <LEVEL> - <message>` with the
//! level padded to 8 columns. The console variant wraps each field in ANSI styles,
//! the file variant is the same text without escape sequences.

use crossterm::style::{Attribute, Color, SetAttribute, SetForegroundColor};

use super::record::{LogRecord, Severity};

/// Timestamp layout used by both variants
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Width the level name is padded to
const LEVEL_WIDTH: usize = 8;

/// Escape sequence that clears every color and attribute
pub fn reset() -> String {
    SetAttribute(Attribute::Reset).to_string()
}

/// Escape sequence for a severity's color
pub fn level_style(level: Severity) -> String {
    match level {
        Severity::Debug => SetForegroundColor(Color::Cyan).to_string(),
        Severity::Info => SetForegroundColor(Color::Green).to_string(),
        Severity::Warning => SetForegroundColor(Color::Yellow).to_string(),
        Severity::Error => SetForegroundColor(Color::Red).to_string(),
        Severity::Critical => format!(
            "{}{}",
            SetAttribute(Attribute::Bold),
            SetForegroundColor(Color::Magenta)
        ),
    }
}

fn timestamp_style() -> String {
    SetForegroundColor(Color::Yellow).to_string()
}

fn location_style() -> String {
    SetForegroundColor(Color::DarkGrey).to_string()
}

fn trace_style() -> String {
    SetForegroundColor(Color::Red).to_string()
}

/// Render a record without escape codes (file output)
pub fn format_plain(record: &LogRecord) -> String {
    let mut line = format!(
        "{} {} {:<width$} - {}",
        record.timestamp.format(TIMESTAMP_FORMAT),
        record.location,
        record.level,
        record.message,
        width = LEVEL_WIDTH,
    );

    if let Some(trace) = &record.trace {
        line.push('\n');
        line.push_str(trace);
    }

    line
}

/// Render a record with ANSI styles (console output)
pub fn format_colored(record: &LogRecord) -> String {
    let reset = reset();
    let level = level_style(record.level);

    let mut line = format!(
        "{ts_style}{ts}{reset} {loc_style}{loc}{reset} {level}{name:<width$}{reset} - {level}{msg}{reset}",
        ts_style = timestamp_style(),
        ts = record.timestamp.format(TIMESTAMP_FORMAT),
        loc_style = location_style(),
        loc = record.location,
        name = record.level,
        msg = record.message,
        width = LEVEL_WIDTH,
    );

    if let Some(trace) = &record.trace {
        line.push('\n');
        line.push_str(&trace_style());
        line.push_str(trace);
        line.push_str(&reset);
    }

    line
}

/// Remove `ESC [ ... m` sequences
#[cfg(test)]
pub(crate) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\u{1b}' && chars.peek() == Some(&'[') {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}
