//! Per-target layout descriptors and path resolution
//!
//! A [`TargetLayout`] carries everything the generic writer engine needs to
//! know about one target: its dot-directory, config file name, which config
//! sub-keys merge instead of replace, and where server maps land.

use std::path::{Path, PathBuf};

use crate::error::{ReplugError, Result};

/// Static description of one target's on-disk layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetLayout {
    /// Target id as used on the command line (`opencode`, `gemini`, ...)
    pub id: &'static str,

    /// Human-readable name for listings
    pub display_name: &'static str,

    /// Canonical dot-directory (`.opencode`, `.gemini`, `.factory`, ...)
    pub dot_dir: &'static str,

    /// Config file name at the target home; `None` for targets whose config
    /// is not JSON-managed (Codex keeps a TOML config this tool never edits)
    pub config_file: Option<&'static str>,

    /// Top-level config keys merged one level deep, with on-disk values
    /// winning per field
    pub mergeable_keys: &'static [&'static str],

    /// Config sub-key that receives the bundle's server map
    pub server_key: Option<&'static str>,
}

impl TargetLayout {
    /// Resolve the target home under an output root.
    ///
    /// Pure basename inspection: a root already named like the target
    /// directory, with or without the leading dot, is itself the home
    /// (prevents `root/.opencode/.opencode` double nesting). Anything else
    /// gets the dot-directory nested under it. No filesystem access.
    pub fn resolve_home(&self, root: &Path) -> PathBuf {
        let bare = self.dot_dir.trim_start_matches('.');
        match root.file_name().and_then(|n| n.to_str()) {
            Some(name) if name == self.dot_dir || name == bare => root.to_path_buf(),
            _ => root.join(self.dot_dir),
        }
    }

    /// Default install home for this target.
    ///
    /// OpenCode keeps its global config under `~/.config/opencode`; every
    /// other target uses `~/<dot-dir>`. Only called by the command layer
    /// when building [`super::Destinations`]; the writer itself never asks.
    pub fn default_home(&self) -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ReplugError::HomeDirUnavailable)?;
        if self.id == "opencode" {
            Ok(home.join(".config").join("opencode"))
        } else {
            Ok(home.join(self.dot_dir))
        }
    }
}
