//! Cache statistics and maintenance

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{ReplugError, Result};

/// Aggregate numbers for the repository cache
#[derive(Debug, Default)]
pub struct CacheStats {
    /// Number of cached repositories
    pub repositories: usize,
    /// Number of cached checkouts (ref directories)
    pub checkouts: usize,
    /// Total size in bytes
    pub total_size: u64,
}

impl CacheStats {
    /// Format total size as a human-readable string
    pub fn formatted_size(&self) -> String {
        let size = self.total_size as f64;
        if size < 1024.0 {
            format!("{} B", self.total_size)
        } else if size < 1024.0 * 1024.0 {
            format!("{:.1} KB", size / 1024.0)
        } else if size < 1024.0 * 1024.0 * 1024.0 {
            format!("{:.1} MB", size / (1024.0 * 1024.0))
        } else {
            format!("{:.1} GB", size / (1024.0 * 1024.0 * 1024.0))
        }
    }
}

/// Collect cache statistics. A missing cache directory counts as empty.
pub fn cache_stats() -> Result<CacheStats> {
    let path = super::paths::repos_dir()?;
    if !path.exists() {
        return Ok(CacheStats::default());
    }

    let mut stats = CacheStats::default();
    for entry in fs::read_dir(&path).map_err(read_failed)? {
        let entry = entry.map_err(read_failed)?;
        if !entry.path().is_dir() {
            continue;
        }
        stats.repositories += 1;

        let Ok(ref_entries) = fs::read_dir(entry.path()) else {
            continue;
        };
        for ref_entry in ref_entries {
            let ref_entry = ref_entry.map_err(read_failed)?;
            if ref_entry.path().is_dir() {
                stats.checkouts += 1;
                stats.total_size += dir_size(&ref_entry.path());
            }
        }
    }

    Ok(stats)
}

/// Remove every cached repository
pub fn clear_cache() -> Result<()> {
    let path = super::paths::repos_dir()?;
    if path.exists() {
        fs::remove_dir_all(&path).map_err(|e| ReplugError::CacheOperationFailed {
            message: format!("Failed to clear cache: {e}"),
        })?;
    }
    Ok(())
}

fn read_failed(e: std::io::Error) -> ReplugError {
    ReplugError::CacheOperationFailed {
        message: format!("Failed to read cache directory: {e}"),
    }
}

/// Recursive file size total; unreadable entries are skipped
fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .follow_links(false)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| e.metadata().ok())
        .map(|m| m.len())
        .sum()
}
