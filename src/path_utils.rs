//! Cross-platform path utilities for Replug
//!
//! Helpers for deriving filesystem-safe names (cache entry slugs), for
//! normalizing output roots, and for displaying paths consistently across
//! platforms.

use normpath::PathExt;
use std::path::{Path, PathBuf};

/// Characters that are unsafe in filesystem paths
/// Replaced with hyphens and collapsed: `/`, `\`, `:`, `*`, `?`, `"`, `<`, `>`, `|`
const PATH_UNSAFE_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Make a repository or plugin name safe for filesystem use.
///
/// Replaces unsafe characters (including `/`, `\`, and `:`) with hyphens,
/// collapses runs of hyphens, and strips leading/trailing hyphens.
/// Returns "unknown" if nothing survives.
///
/// # Examples
///
/// ```
/// use replug::path_utils::make_path_safe;
///
/// assert_eq!(make_path_safe("owner/repo"), "owner-repo");
/// assert_eq!(make_path_safe("github.com:owner/repo"), "github.com-owner-repo");
/// assert_eq!(make_path_safe(":::"), "unknown");
/// ```
pub fn make_path_safe(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if PATH_UNSAFE_CHARS.contains(&c) { '-' } else { c })
        .collect();

    let collapsed = replaced
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    if collapsed.is_empty() {
        "unknown".to_string()
    } else {
        collapsed
    }
}

/// Render a path with forward slashes regardless of platform.
///
/// Used for user-facing messages and for matching artifact paths against
/// `--only` glob filters, which are always written with `/`.
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Normalize an output root before writing into it.
///
/// Resolves symlinks in the longest existing ancestor (so `/var` and
/// `/private/var` on macOS name the same root) and appends the components
/// that do not exist yet. Windows verbatim `\\?\` prefixes are stripped so
/// reported paths stay readable.
pub fn normalize_root(path: &Path) -> PathBuf {
    if let Ok(norm) = path.normalize() {
        return dunce::simplified(norm.as_path()).to_path_buf();
    }

    // Walk up to the closest ancestor that exists, then re-append the rest
    let mut current = path;
    let mut pending = Vec::new();
    while !current.exists() {
        match (current.file_name(), current.parent()) {
            (Some(name), Some(parent)) => {
                pending.push(name);
                current = parent;
            }
            _ => return path.to_path_buf(),
        }
    }

    let base = current
        .normalize()
        .map(|norm| norm.as_path().to_path_buf())
        .unwrap_or_else(|_| current.to_path_buf());
    let mut result = dunce::simplified(&base).to_path_buf();
    for name in pending.iter().rev() {
        result.push(name);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_path_safe_basic() {
        assert_eq!(make_path_safe("owner/repo"), "owner-repo");
        assert_eq!(make_path_safe("plain-name"), "plain-name");
    }

    #[test]
    fn test_make_path_safe_url_remnants() {
        assert_eq!(
            make_path_safe("github.com:owner/repo"),
            "github.com-owner-repo"
        );
        assert_eq!(make_path_safe("a///b//c"), "a-b-c");
    }

    #[test]
    fn test_make_path_safe_empty() {
        assert_eq!(make_path_safe(":::"), "unknown");
        assert_eq!(make_path_safe("---"), "unknown");
        assert_eq!(make_path_safe(""), "unknown");
    }

    #[test]
    fn test_make_path_safe_collapses_hyphens() {
        assert_eq!(make_path_safe("a--b---c"), "a-b-c");
        assert_eq!(make_path_safe("--edge--"), "edge");
    }

    #[test]
    fn test_make_path_safe_preserves_unicode() {
        assert_eq!(make_path_safe("日本語/repo"), "日本語-repo");
    }

    #[test]
    fn test_to_forward_slashes() {
        assert_eq!(to_forward_slashes(Path::new("/usr/local/bin")), "/usr/local/bin");
        assert_eq!(
            to_forward_slashes(Path::new("C:\\Users\\file.txt")),
            "C:/Users/file.txt"
        );
        assert_eq!(to_forward_slashes(Path::new("")), "");
    }

    #[test]
    fn test_normalize_root_resolves_existing_paths() {
        let temp = tempfile::TempDir::new().unwrap();
        let normalized = normalize_root(temp.path());
        assert!(normalized.is_absolute());
        // Stable under repeated normalization
        assert_eq!(normalize_root(&normalized), normalized);
    }

    #[test]
    fn test_normalize_root_appends_missing_components() {
        let temp = tempfile::TempDir::new().unwrap();
        let base = normalize_root(temp.path());
        let result = normalize_root(&temp.path().join("missing").join("child"));
        assert_eq!(result, base.join("missing").join("child"));
    }

    #[test]
    fn test_normalize_root_keeps_unresolvable_relative_paths() {
        let path = Path::new("no-such-ancestor/out");
        assert_eq!(normalize_root(path), PathBuf::from("no-such-ancestor/out"));
    }
}
