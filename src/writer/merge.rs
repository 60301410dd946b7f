//! Config merge policy
//!
//! One safety principle drives this module: plugin-provided defaults must
//! never silently overwrite a value the user has already set. For the
//! target's designated mergeable sub-keys the merge goes one level deep with
//! on-disk fields winning; every other top-level key is taken from the
//! incoming config; top-level keys only the user has are preserved.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{ReplugError, Result};
use crate::report::{Advisory, WriteReport};
use crate::writer::{backup, fsops};

/// Merge an incoming config object with the existing on-disk one.
///
/// Pure: both inputs are maps, the result is a new map. A mergeable sub-key
/// missing on either side is treated as an empty object; a non-object value
/// under a mergeable key is treated the same way.
pub fn merge_config(
    existing: &Map<String, Value>,
    incoming: &Map<String, Value>,
    mergeable_keys: &[&str],
) -> Map<String, Value> {
    let mut result = existing.clone();

    for (key, value) in incoming {
        if mergeable_keys.contains(&key.as_str()) {
            result.insert(key.clone(), merge_sub_object(existing.get(key), value));
        } else {
            result.insert(key.clone(), value.clone());
        }
    }

    result
}

/// One-level merge of a mergeable sub-key: incoming fields first, then
/// existing fields overlaid so the on-disk value wins every collision
fn merge_sub_object(existing: Option<&Value>, incoming: &Value) -> Value {
    let mut merged = incoming.as_object().cloned().unwrap_or_default();
    if let Some(Value::Object(existing_fields)) = existing {
        for (field, value) in existing_fields {
            merged.insert(field.clone(), value.clone());
        }
    }
    Value::Object(merged)
}

/// Write a config file, merging with any existing content.
///
/// Existing content that does not parse as a JSON object is reported as an
/// advisory, backed up, and replaced verbatim; the call never fails on a
/// malformed existing file. The backup completes before the new content is
/// written.
pub fn write_config(
    path: &Path,
    incoming: Map<String, Value>,
    mergeable_keys: &[&str],
    report: &mut WriteReport,
) -> Result<()> {
    let merged = match read_existing(path, report)? {
        Some(existing) => merge_config(&existing, &incoming, mergeable_keys),
        None => incoming,
    };

    if let Some(backup_path) = backup::backup_if_exists(path)? {
        report.advise(Advisory::BackupCreated {
            original: path.to_path_buf(),
            backup: backup_path,
        });
    }

    fsops::write_json(path, &Value::Object(merged))?;
    report.record(path);
    Ok(())
}

/// Read the existing config, downgrading parse failures to an advisory.
/// I/O failures still propagate.
fn read_existing(path: &Path, report: &mut WriteReport) -> Result<Option<Map<String, Value>>> {
    if !path.exists() {
        return Ok(None);
    }

    match fsops::read_json(path) {
        Ok(Value::Object(map)) => Ok(Some(map)),
        Ok(_) => {
            report.advise(Advisory::ConfigParseFallback {
                path: path.to_path_buf(),
                reason: "not a JSON object".to_string(),
            });
            Ok(None)
        }
        Err(ReplugError::ConfigParseFailed { reason, .. }) => {
            report.advise(Advisory::ConfigParseFallback {
                path: path.to_path_buf(),
                reason,
            });
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
