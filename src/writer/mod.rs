//! Generic bundle writer
//!
//! One engine writes every target's bundle, parameterized by a
//! [`TargetLayout`] descriptor. The sequence is fixed: resolve the home
//! directory, ensure it exists, merge-and-write the config file, write named
//! text files (backing up anything overwritten), copy pass-through
//! directories. The writer takes its destination root as an explicit
//! argument and reports through the returned [`WriteReport`]; it never reads
//! the environment and never prints.
//!
//! There is no rollback: a failure partway leaves earlier writes in place.

pub mod backup;
pub mod fsops;
pub mod layout;
pub mod merge;

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::bundle::Bundle;
use crate::error::Result;
use crate::report::{Advisory, WriteReport};

pub use layout::TargetLayout;

/// Destination roots for bundle writes, built by the command layer
#[derive(Debug, Clone)]
pub struct Destinations {
    root_override: Option<PathBuf>,
}

impl Destinations {
    /// Every target writes under the given root (the `convert` command and
    /// `install --root`)
    pub fn explicit(root: impl Into<PathBuf>) -> Self {
        Self {
            root_override: Some(root.into()),
        }
    }

    /// Each target writes to its default home directory (plain `install`)
    pub fn home_defaults() -> Self {
        Self {
            root_override: None,
        }
    }

    /// The output root for one target
    pub fn root_for(&self, layout: &TargetLayout) -> Result<PathBuf> {
        match &self.root_override {
            Some(root) => Ok(root.clone()),
            None => layout.default_home(),
        }
    }
}

/// Write one bundle under an output root.
///
/// Returns the files written and the advisory events collected along the
/// way, converter advisories included. The first filesystem error aborts
/// the remaining steps.
pub fn write_bundle(layout: &TargetLayout, bundle: &Bundle, root: &Path) -> Result<WriteReport> {
    let home = layout.resolve_home(root);
    let mut report = WriteReport::new();
    report.advisories.extend(bundle.advisories.iter().cloned());

    fsops::ensure_dir(&home)?;

    if let Some(config_file) = layout.config_file {
        if let Some(incoming) = compose_config(layout, bundle) {
            merge::write_config(
                &home.join(config_file),
                incoming,
                layout.mergeable_keys,
                &mut report,
            )?;
        }
    }

    for file in &bundle.files {
        let dest = home
            .join(file.subdir)
            .join(format!("{}.{}", file.name, file.ext));
        if let Some(backup_path) = backup::backup_if_exists(&dest)? {
            report.advise(Advisory::BackupCreated {
                original: dest.clone(),
                backup: backup_path,
            });
        }
        fsops::write_text(&dest, &file.content)?;
        report.record(dest);
    }

    for tree in &bundle.trees {
        let dest = home.join(tree.subdir).join(&tree.name);
        fsops::copy_dir(&tree.source, &dest)?;
        report.record(dest);
    }

    Ok(report)
}

/// Combine the bundle's config object and server map into the single
/// incoming config value. Returns `None` when there is nothing to write.
fn compose_config(layout: &TargetLayout, bundle: &Bundle) -> Option<Map<String, Value>> {
    if bundle.config.is_none() && bundle.servers.is_none() {
        return None;
    }

    let mut config = bundle.config.clone().unwrap_or_default();
    if let (Some(servers), Some(server_key)) = (&bundle.servers, layout.server_key) {
        if !servers.is_empty() {
            config.insert(server_key.to_string(), Value::Object(servers.clone()));
        }
    }

    if config.is_empty() { None } else { Some(config) }
}
