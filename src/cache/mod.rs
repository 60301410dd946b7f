//! Repository cache
//!
//! Git sources are cloned once per (URL, ref) pair and reused on later runs.
//! Entries live under `repos/<slug>-<hash8>/<ref-or-HEAD>`; a checkout is
//! considered valid when its `.git` directory exists.

pub mod paths;
pub mod stats;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReplugError, Result};
use crate::progress;
use crate::source::{GitSource, git};

pub use paths::{CACHE_DIR_ENV, cache_dir};
pub use stats::{CacheStats, cache_stats, clear_cache};

/// Return a checkout of the source, cloning into the cache on a miss.
///
/// A hit skips the network entirely. Leftovers from interrupted clones
/// (entry directory without `.git`) are removed and fetched fresh.
pub fn ensure_repo(source: &GitSource) -> Result<PathBuf> {
    let entry = paths::repo_entry_dir(&paths::repos_dir()?, &source.url, source.git_ref.as_deref());

    if entry.join(".git").exists() {
        return Ok(entry);
    }

    if entry.exists() {
        fs::remove_dir_all(&entry).map_err(|e| ReplugError::CacheOperationFailed {
            message: format!("Failed to remove stale cache entry: {e}"),
        })?;
    }
    if let Some(parent) = entry.parent() {
        fs::create_dir_all(parent).map_err(|e| ReplugError::CacheOperationFailed {
            message: format!("Failed to create cache directory: {e}"),
        })?;
    }

    let pb = progress::fetch_spinner(&source.display());
    let result = fetch_into(source, &entry);
    pb.finish_and_clear();

    if result.is_err() {
        let _ = fs::remove_dir_all(&entry);
    }
    result.map(|()| entry)
}

fn fetch_into(source: &GitSource, entry: &Path) -> Result<()> {
    // Full history is only needed when a ref has to be resolved
    let shallow = source.git_ref.is_none();
    let repo = git::clone(&source.url, entry, shallow)?;
    if let Some(git_ref) = &source.git_ref {
        git::checkout_ref(&repo, git_ref)?;
    }
    Ok(())
}
