//! Target bundle model
//!
//! A [`Bundle`] is plain data describing what to write for one target:
//! an optional config object, an optional server map destined for a config
//! sub-key, named text files, and directory pass-throughs. Converters build
//! bundles; the writer consumes them exactly once.

use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::report::Advisory;

/// Everything one target receives from one plugin
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    /// Top-level config object destined for the target's single JSON file
    pub config: Option<Map<String, Value>>,

    /// Server map, merged under the target's server sub-key rather than
    /// replacing it
    pub servers: Option<Map<String, Value>>,

    /// Named text files, each destined for `<subdir>/<name>.<ext>`
    pub files: Vec<BundleFile>,

    /// Directories copied recursively to `<subdir>/<name>/`
    pub trees: Vec<BundleTree>,

    /// Warnings produced during conversion (features the target cannot
    /// represent)
    pub advisories: Vec<Advisory>,
}

/// A named text file inside a bundle
///
/// `name` may contain `/` separators (namespaced commands); the writer
/// creates intermediate directories. Uniqueness of names within a subdir is
/// the converter's responsibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFile {
    pub subdir: &'static str,
    pub name: String,
    pub ext: &'static str,
    pub content: String,
}

/// A directory pass-through inside a bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleTree {
    pub subdir: &'static str,
    pub name: String,
    /// Source directory whose contents are copied
    pub source: PathBuf,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the bundle would write nothing
    pub fn is_empty(&self) -> bool {
        self.config.is_none() && self.servers.is_none() && self.files.is_empty() && self.trees.is_empty()
    }

    pub fn push_file(
        &mut self,
        subdir: &'static str,
        name: impl Into<String>,
        ext: &'static str,
        content: impl Into<String>,
    ) {
        self.files.push(BundleFile {
            subdir,
            name: name.into(),
            ext,
            content: content.into(),
        });
    }

    pub fn push_tree(&mut self, subdir: &'static str, name: impl Into<String>, source: PathBuf) {
        self.trees.push(BundleTree {
            subdir,
            name: name.into(),
            source,
        });
    }

    pub fn warn(&mut self, target: &str, detail: impl Into<String>) {
        self.advisories.push(Advisory::unsupported(target, detail));
    }
}
