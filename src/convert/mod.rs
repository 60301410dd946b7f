//! Per-target converters and the target registry
//!
//! Each converter is a pure function from a loaded [`Plugin`] to a
//! [`Bundle`]; all I/O stays in the writer. The registry pairs every
//! converter with its [`TargetLayout`] descriptor.

pub mod rewrite;

mod codex;
mod cursor;
mod droid;
mod gemini;
mod opencode;
mod pi;

use serde_json::{Map, Value};
use serde_yaml::Mapping;

use crate::bundle::Bundle;
use crate::error::{ReplugError, Result};
use crate::plugin::{Plugin, frontmatter};

/// A pure conversion function: plugin in, bundle out
pub type ConvertFn = fn(&Plugin) -> Bundle;

/// One supported target: layout descriptor plus converter
#[derive(Debug)]
pub struct Target {
    pub layout: crate::writer::TargetLayout,
    pub convert: ConvertFn,
}

/// All supported targets, in listing order
pub const TARGETS: &[Target] = &[
    Target {
        layout: opencode::LAYOUT,
        convert: opencode::convert,
    },
    Target {
        layout: gemini::LAYOUT,
        convert: gemini::convert,
    },
    Target {
        layout: codex::LAYOUT,
        convert: codex::convert,
    },
    Target {
        layout: droid::LAYOUT,
        convert: droid::convert,
    },
    Target {
        layout: cursor::LAYOUT,
        convert: cursor::convert,
    },
    Target {
        layout: pi::LAYOUT,
        convert: pi::convert,
    },
];

/// Look up a target by id, case-insensitively
pub fn find_target(name: &str) -> Result<&'static Target> {
    let lower = name.to_lowercase();
    TARGETS
        .iter()
        .find(|t| t.layout.id == lower)
        .ok_or_else(|| ReplugError::UnknownTarget {
            name: name.to_string(),
        })
}

/// Serialize the plugin's MCP servers verbatim, preserving unknown fields.
/// Returns `None` when the plugin declares no servers.
pub(crate) fn servers_passthrough(plugin: &Plugin) -> Option<Map<String, Value>> {
    if plugin.mcp_servers.is_empty() {
        return None;
    }

    let mut servers = Map::new();
    for (name, server) in &plugin.mcp_servers {
        servers.insert(
            name.clone(),
            serde_json::to_value(server).unwrap_or(Value::Null),
        );
    }
    Some(servers)
}

/// Compose markdown with a description-only frontmatter block, the common
/// minimal shape for command and agent files
pub(crate) fn described_markdown(description: Option<&str>, body: &str) -> String {
    let mut fm = Mapping::new();
    if let Some(desc) = description {
        fm.insert(
            serde_yaml::Value::String("description".to_string()),
            serde_yaml::Value::String(desc.to_string()),
        );
    }
    frontmatter::compose(&fm, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup_case_insensitive() {
        assert_eq!(find_target("opencode").unwrap().layout.id, "opencode");
        assert_eq!(find_target("OpenCode").unwrap().layout.id, "opencode");
        assert_eq!(find_target("GEMINI").unwrap().layout.id, "gemini");
    }

    #[test]
    fn test_registry_rejects_unknown() {
        let err = find_target("zed").unwrap_err();
        assert!(err.to_string().contains("zed"));
    }

    #[test]
    fn test_registry_ids_are_unique() {
        let mut ids: Vec<&str> = TARGETS.iter().map(|t| t.layout.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), TARGETS.len());
    }

    #[test]
    fn test_registry_order_is_stable() {
        // `targets` lists in registry order; pin it so additions are deliberate
        let ids: Vec<&str> = TARGETS.iter().map(|t| t.layout.id).collect();
        assert_eq!(ids, vec!["opencode", "gemini", "codex", "droid", "cursor", "pi"]);
    }

    #[test]
    fn test_described_markdown() {
        let doc = described_markdown(Some("Deploy the app"), "Run it");
        assert_eq!(doc, "---\ndescription: Deploy the app\n---\n\nRun it\n");

        let plain = described_markdown(None, "Run it");
        assert_eq!(plain, "Run it\n");
    }
}
