//! Backup-before-overwrite primitive
//!
//! Any write that would clobber an existing file first copies the current
//! bytes aside to `<name>.bak.<timestamp>`. The copy is synced to disk
//! before the caller may overwrite the original; a failed backup aborts the
//! overwrite.

use std::fs;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

use crate::error::{ReplugError, Result};

/// Filesystem-safe, sortable, sub-second timestamp
/// (e.g. `20260823T141503.123456789`)
const BACKUP_TIMESTAMP: &[FormatItem<'_>] =
    format_description!("[year][month][day]T[hour][minute][second].[subsecond digits:9]");

/// Back up `path` if it exists, returning the backup path.
///
/// Returns `Ok(None)` when there is nothing to back up. On timestamp
/// collision an incrementing disambiguator is appended.
pub fn backup_if_exists(path: &Path) -> Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }

    let timestamp = OffsetDateTime::now_utc()
        .format(&BACKUP_TIMESTAMP)
        .map_err(|e| backup_error(path, format!("Failed to format timestamp: {e}")))?;

    let mut backup = backup_sibling(path, &timestamp);
    let mut counter = 1u32;
    while backup.exists() {
        backup = backup_sibling(path, &format!("{timestamp}-{counter}"));
        counter += 1;
    }

    fs::copy(path, &backup).map_err(|e| backup_error(path, e.to_string()))?;

    // The backup must be durable before the original is overwritten
    fs::File::open(&backup)
        .and_then(|f| f.sync_all())
        .map_err(|e| backup_error(path, format!("Failed to sync backup: {e}")))?;

    Ok(Some(backup))
}

fn backup_sibling(path: &Path, suffix: &str) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    path.with_file_name(format!("{name}.bak.{suffix}"))
}

fn backup_error(path: &Path, reason: String) -> ReplugError {
    ReplugError::BackupFailed {
        path: path.display().to_string(),
        reason,
    }
}
