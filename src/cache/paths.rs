//! Cache directory layout
//!
//! Cached clones live at `<cache>/repos/<slug>-<hash8>/<ref-or-HEAD>` where
//! `<cache>` is the platform cache location (XDG on Linux, Library/Caches on
//! macOS) with a `replug` subdirectory, overridable through the
//! `REPLUG_CACHE_DIR` environment variable.

use std::path::{Path, PathBuf};

use crate::error::{ReplugError, Result};
use crate::path_utils;

/// Default cache directory name under the user's cache directory
const CACHE_DIR: &str = "replug";

/// Subdirectory holding one entry per repository URL
pub const REPOS_DIR: &str = "repos";

/// Environment variable overriding the cache location
pub const CACHE_DIR_ENV: &str = "REPLUG_CACHE_DIR";

/// Resolve the cache root. This is the only place the environment is read.
pub fn cache_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(CACHE_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }

    let base = dirs::cache_dir().ok_or_else(|| ReplugError::CacheOperationFailed {
        message: "Could not determine cache directory".to_string(),
    })?;

    Ok(base.join(CACHE_DIR))
}

pub fn repos_dir() -> Result<PathBuf> {
    Ok(cache_dir()?.join(REPOS_DIR))
}

/// Directory name for one repository URL: a readable slug plus a short hash
/// so URLs that slugify identically never collide
pub fn repo_key(url: &str) -> String {
    let hash = blake3::hash(url.as_bytes()).to_hex();
    format!("{}-{}", repo_slug(url), &hash.as_str()[..8])
}

/// Checkout directory for a repository at a ref, under the given repos root
pub fn repo_entry_dir(repos_root: &Path, url: &str, git_ref: Option<&str>) -> PathBuf {
    let ref_dir = git_ref.map_or_else(|| "HEAD".to_string(), path_utils::make_path_safe);
    repos_root.join(repo_key(url)).join(ref_dir)
}

/// Derive `owner-repo` from the last two path segments of the URL
fn repo_slug(url: &str) -> String {
    let clean = url.trim_end_matches('/').trim_end_matches(".git");
    // Drop the scheme or SCP-style host prefix
    let path_part = clean.find(':').map_or(clean, |idx| &clean[idx + 1..]);
    let parts: Vec<&str> = path_part.split('/').filter(|s| !s.is_empty()).collect();

    let name = match parts.as_slice() {
        [.., owner, repo] => format!("{owner}/{repo}"),
        [single] => (*single).to_string(),
        [] => clean.to_string(),
    };
    path_utils::make_path_safe(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_slug_https() {
        assert_eq!(
            repo_slug("https://github.com/anthropics/demo-plugin.git"),
            "anthropics-demo-plugin"
        );
    }

    #[test]
    fn test_repo_slug_ssh() {
        assert_eq!(
            repo_slug("git@github.com:owner/repo.git"),
            "owner-repo"
        );
    }

    #[test]
    fn test_repo_slug_file_url() {
        assert_eq!(
            repo_slug("file:///tmp/fixtures/demo"),
            "fixtures-demo"
        );
    }

    #[test]
    fn test_repo_key_is_stable_and_distinct() {
        let a = repo_key("https://github.com/owner/repo.git");
        let b = repo_key("https://github.com/owner/repo.git");
        assert_eq!(a, b);
        assert!(a.starts_with("owner-repo-"));

        // Same slug, different URL: the hash suffix keeps them apart
        let c = repo_key("git@github.com:owner/repo.git");
        assert_ne!(a, c);
    }

    #[test]
    fn test_repo_entry_dir_ref_and_head() {
        let root = Path::new("/cache/repos");
        let with_ref = repo_entry_dir(root, "https://github.com/o/r.git", Some("v1.0"));
        assert!(with_ref.ends_with(format!("{}/v1.0", repo_key("https://github.com/o/r.git"))));

        let head = repo_entry_dir(root, "https://github.com/o/r.git", None);
        assert!(head.ends_with(format!("{}/HEAD", repo_key("https://github.com/o/r.git"))));
    }

    #[test]
    fn test_repo_entry_dir_sanitizes_ref() {
        let root = Path::new("/cache/repos");
        let entry = repo_entry_dir(root, "https://github.com/o/r.git", Some("feature/x"));
        assert!(entry.ends_with("feature-x"));
    }
}
