//! Log file retention management
//!
//! Deletes rolled log files whose date suffix falls outside the retention window.

use std::fs;
use std::path::Path;

use chrono::{Duration, NaiveDate};

/// Default retention period in days
pub const DEFAULT_BACKUP_COUNT: u32 = 30;

/// Date layout of rolled file suffixes
pub const DATE_SUFFIX_FORMAT: &str = "%Y-%m-%d";

/// Name of the file a base log is rolled into for `date`
pub fn rolled_file_name(base_name: &str, date: NaiveDate) -> String {
    format!("{}.{}", base_name, date.format(DATE_SUFFIX_FORMAT))
}

/// Extract the date from a rolled file name, if it is one
pub fn parse_rolled_date(base_name: &str, file_name: &str) -> Option<NaiveDate> {
    let suffix = file_name.strip_prefix(base_name)?.strip_prefix('.')?;
    NaiveDate::parse_from_str(suffix, DATE_SUFFIX_FORMAT).ok()
}

/// Delete rolled files strictly older than `today - backup_count` days
///
/// A `backup_count` of zero keeps every file. Failures to list or delete are
/// ignored. Returns the number of files deleted.
pub fn cleanup_old_logs(
    logs_dir: &Path,
    base_name: &str,
    today: NaiveDate,
    backup_count: u32,
) -> usize {
    if backup_count == 0 {
        return 0;
    }

    let Some(cutoff) = today.checked_sub_signed(Duration::days(i64::from(backup_count))) else {
        return 0;
    };

    let Ok(entries) = fs::read_dir(logs_dir) else {
        return 0;
    };

    let mut deleted_count = 0;

    for entry in entries.flatten() {
        let path = entry.path();

        let Some(date) = path
            .file_name()
            .and_then(|n| n.to_str())
            .and_then(|name| parse_rolled_date(base_name, name))
        else {
            continue;
        };

        if date < cutoff && path.is_file() && fs::remove_file(&path).is_ok() {
            deleted_count += 1;
        }
    }

    deleted_count
}
