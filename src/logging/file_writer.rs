//! Daily rotating log file
//!
//! Records go to `<dir>/applog.log`. When a record arrives for a later calendar
//! day than the open file's, the file is renamed to `applog.log.<YYYY-MM-DD>`,
//! a fresh base file is opened and the retention sweep runs.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};

use super::retention::{cleanup_old_logs, rolled_file_name};

/// Name of the active log file inside the log directory
pub const LOG_FILE_NAME: &str = "applog.log";

/// The open file and the day its records belong to
struct RotationState {
    file: File,
    date: NaiveDate,
}

/// Log file that rolls over at the first write of each new day
pub struct RotatingFile {
    dir: PathBuf,
    path: PathBuf,
    backup_count: u32,
    state: Option<RotationState>,
    /// Set after a failure has been reported, cleared by the next success
    degraded: bool,
}

impl RotatingFile {
    /// Create a sink for `dir`; the file is opened on first write
    pub fn new(dir: impl Into<PathBuf>, backup_count: u32) -> Self {
        let dir = dir.into();
        let path = dir.join(LOG_FILE_NAME);
        Self {
            dir,
            path,
            backup_count,
            state: None,
            degraded: false,
        }
    }

    /// Full path to the active log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Date of the open file, if one is open
    pub fn current_date(&self) -> Option<NaiveDate> {
        self.state.as_ref().map(|s| s.date)
    }

    /// Write a line, containing any I/O failure
    ///
    /// On failure the handle is dropped so the next write reopens the file, and
    /// a single notice is printed to stderr until a write succeeds again.
    pub fn write_line(&mut self, date: NaiveDate, line: &str) {
        match self.try_write_line(date, line) {
            Ok(()) => self.degraded = false,
            Err(e) => {
                self.state = None;
                if !self.degraded {
                    self.degraded = true;
                    eprintln!(
                        "pretty-logger: failed to write {}: {}",
                        self.path.display(),
                        e
                    );
                }
            }
        }
    }

    /// Write a line, rotating first if `date` is past the open file's date
    ///
    /// A line for a day before the open file's goes to that day's rolled file,
    /// so every file only holds records of its own date.
    pub fn try_write_line(&mut self, date: NaiveDate, line: &str) -> io::Result<()> {
        let mut state = match self.state.take() {
            Some(state) => state,
            None => self.open(date)?,
        };
        if date > state.date {
            state = self.rotate(state, date)?;
        }

        let state = self.state.insert(state);
        if date < state.date {
            let rolled = self.dir.join(rolled_file_name(LOG_FILE_NAME, date));
            return append_line(&rolled, line);
        }

        writeln!(state.file, "{}", line)?;
        state.file.flush()
    }

    /// Flush the open file, if any
    pub fn flush(&mut self) -> io::Result<()> {
        match self.state.as_mut() {
            Some(state) => state.file.flush(),
            None => Ok(()),
        }
    }

    fn open(&self, date: NaiveDate) -> io::Result<RotationState> {
        fs::create_dir_all(&self.dir)?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        // A non-empty file left by an earlier run belongs to the day it was last written
        let metadata = file.metadata()?;
        let date = if metadata.len() > 0 {
            metadata
                .modified()
                .map(|modified| DateTime::<Local>::from(modified).date_naive().min(date))
                .unwrap_or(date)
        } else {
            date
        };

        Ok(RotationState { file, date })
    }

    fn rotate(&self, previous: RotationState, date: NaiveDate) -> io::Result<RotationState> {
        let RotationState {
            file,
            date: previous_date,
        } = previous;
        drop(file);

        let rolled = self.dir.join(rolled_file_name(LOG_FILE_NAME, previous_date));
        if rolled.exists() {
            drain_into(&self.path, &rolled)?;
            // Left empty if removal fails, and reopened as a fresh file
            let _ = fs::remove_file(&self.path);
        } else {
            match fs::rename(&self.path, &rolled) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
                _ => {}
            }
        }

        let state = self.open(date)?;

        cleanup_old_logs(&self.dir, LOG_FILE_NAME, date, self.backup_count);

        Ok(state)
    }
}

/// Move the contents of `from` onto the end of `to`, leaving `from` empty
///
/// Repeating the call after a later failure copies nothing twice.
fn drain_into(from: &Path, to: &Path) -> io::Result<()> {
    let mut source = match OpenOptions::new().read(true).write(true).open(from) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };
    let mut target = OpenOptions::new().append(true).open(to)?;
    io::copy(&mut source, &mut target)?;
    target.flush()?;
    source.set_len(0)
}

/// Append one line to `path`, creating it if needed
fn append_line(path: &Path, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", line)?;
    file.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn test_writes_to_base_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut sink = RotatingFile::new(temp_dir.path(), 30);

        sink.try_write_line(date(2026, 4, 1), "first").unwrap();
        sink.try_write_line(date(2026, 4, 1), "second").unwrap();

        assert_eq!(read(sink.path()), "first\nsecond\n");
        assert_eq!(sink.current_date(), Some(date(2026, 4, 1)));
    }

    #[test]
    fn test_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");
        let mut sink = RotatingFile::new(&nested, 30);

        sink.try_write_line(date(2026, 4, 1), "hello").unwrap();
        assert!(nested.join(LOG_FILE_NAME).exists());
    }

    #[test]
    fn test_rotates_on_date_change() {
        let temp_dir = TempDir::new().unwrap();
        let mut sink = RotatingFile::new(temp_dir.path(), 30);

        sink.try_write_line(date(2026, 4, 1), "day one").unwrap();
        sink.try_write_line(date(2026, 4, 2), "day two").unwrap();

        let rolled = temp_dir.path().join("applog.log.2026-04-01");
        assert_eq!(read(&rolled), "day one\n");
        assert_eq!(read(sink.path()), "day two\n");
        assert_eq!(sink.current_date(), Some(date(2026, 4, 2)));
    }

    #[test]
    fn test_earlier_date_goes_to_its_own_file() {
        let temp_dir = TempDir::new().unwrap();
        let mut sink = RotatingFile::new(temp_dir.path(), 30);

        sink.try_write_line(date(2026, 4, 1), "day one").unwrap();
        sink.try_write_line(date(2026, 4, 2), "day two").unwrap();
        sink.try_write_line(date(2026, 4, 1), "late for day one").unwrap();

        assert_eq!(read(sink.path()), "day two\n");
        let rolled = temp_dir.path().join("applog.log.2026-04-01");
        assert_eq!(read(&rolled), "day one\nlate for day one\n");
        assert_eq!(sink.current_date(), Some(date(2026, 4, 2)));
    }

    #[test]
    fn test_drain_cannot_duplicate_on_retry() {
        let temp_dir = TempDir::new().unwrap();
        let from = temp_dir.path().join(LOG_FILE_NAME);
        let to = temp_dir.path().join("applog.log.2026-04-01");
        fs::write(&from, "a\nb\n").unwrap();
        fs::write(&to, "x\n").unwrap();

        drain_into(&from, &to).unwrap();
        drain_into(&from, &to).unwrap();

        assert_eq!(read(&to), "x\na\nb\n");
        assert_eq!(read(&from), "");
    }

    #[test]
    fn test_rotation_keeps_exactly_the_retention_window() {
        let temp_dir = TempDir::new().unwrap();
        let backup_count = 4;
        let today = date(2026, 5, 20);

        for days_ago in 1..=(backup_count + 5) {
            let day = today - chrono::Duration::days(i64::from(days_ago));
            fs::write(temp_dir.path().join(rolled_file_name(LOG_FILE_NAME, day)), "old\n").unwrap();
        }

        let mut sink = RotatingFile::new(temp_dir.path(), backup_count);
        let yesterday = today - chrono::Duration::days(1);
        sink.try_write_line(yesterday, "yesterday").unwrap();
        sink.try_write_line(today, "today").unwrap();

        let mut remaining: Vec<String> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        remaining.sort();

        let mut expected = vec![LOG_FILE_NAME.to_string()];
        for days_ago in 1..=backup_count {
            let day = today - chrono::Duration::days(i64::from(days_ago));
            expected.push(rolled_file_name(LOG_FILE_NAME, day));
        }
        expected.sort();

        assert_eq!(remaining, expected);
        let just_rolled = temp_dir.path().join(rolled_file_name(LOG_FILE_NAME, yesterday));
        assert_eq!(read(&just_rolled), "old\nyesterday\n");
        assert_eq!(read(sink.path()), "today\n");
    }

    #[test]
    fn test_existing_rolled_file_is_appended_to() {
        let temp_dir = TempDir::new().unwrap();
        let rolled = temp_dir.path().join("applog.log.2026-04-01");
        fs::write(&rolled, "from earlier run\n").unwrap();

        let mut sink = RotatingFile::new(temp_dir.path(), 30);
        sink.try_write_line(date(2026, 4, 1), "day one").unwrap();
        sink.try_write_line(date(2026, 4, 2), "day two").unwrap();

        assert_eq!(read(&rolled), "from earlier run\nday one\n");
        assert_eq!(read(sink.path()), "day two\n");
    }

    #[test]
    fn test_stale_file_rolls_by_modification_date() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join(LOG_FILE_NAME);
        fs::write(&base, "left over\n").unwrap();
        let written_on = Local::now().date_naive();

        let mut sink = RotatingFile::new(temp_dir.path(), 0);
        let future = date(2099, 1, 1);
        sink.try_write_line(future, "new run").unwrap();

        let rolled = temp_dir.path().join(rolled_file_name(LOG_FILE_NAME, written_on));
        assert_eq!(read(&rolled), "left over\n");
        assert_eq!(read(&base), "new run\n");
        assert_eq!(sink.current_date(), Some(future));
    }

    #[test]
    fn test_rotation_runs_retention() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("applog.log.2026-03-01"), "old").unwrap();

        let mut sink = RotatingFile::new(temp_dir.path(), 2);
        sink.try_write_line(date(2026, 4, 1), "a").unwrap();
        assert!(temp_dir.path().join("applog.log.2026-03-01").exists());

        sink.try_write_line(date(2026, 4, 2), "b").unwrap();
        assert!(!temp_dir.path().join("applog.log.2026-03-01").exists());
        assert!(temp_dir.path().join("applog.log.2026-04-01").exists());
    }

    #[test]
    fn test_write_failure_is_contained() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("not-a-dir");
        fs::write(&blocker, "file").unwrap();

        let mut sink = RotatingFile::new(blocker.join("logs"), 30);
        assert!(sink.try_write_line(date(2026, 4, 1), "lost").is_err());

        sink.write_line(date(2026, 4, 1), "lost too");
        assert!(sink.current_date().is_none());
    }
}
