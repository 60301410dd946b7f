//! Cursor converter
//!
//! Agents become `.mdc` rules that are attached on demand (`alwaysApply:
//! false`), commands keep a description-only title block, and MCP servers go
//! to `~/.cursor/mcp.json`. Cursor has no skill runtime, so skills produce
//! an advisory.

use serde_yaml::{Mapping, Value as Yaml};

use crate::bundle::Bundle;
use crate::plugin::{MarkdownArtifact, Plugin, frontmatter};
use crate::writer::TargetLayout;

use super::rewrite;

pub const LAYOUT: TargetLayout = TargetLayout {
    id: "cursor",
    display_name: "Cursor",
    dot_dir: ".cursor",
    config_file: Some("mcp.json"),
    mergeable_keys: &["mcpServers"],
    server_key: Some("mcpServers"),
};

pub fn convert(plugin: &Plugin) -> Bundle {
    let mut bundle = Bundle::new();

    for agent in &plugin.agents {
        bundle.push_file("rules", agent.name.clone(), "mdc", rule_markdown(agent));
    }

    for command in &plugin.commands {
        bundle.push_file(
            "commands",
            rewrite::namespace_to_path(&command.name),
            "md",
            super::described_markdown(
                frontmatter::get_str(&command.frontmatter, "description").as_deref(),
                &rewrite::expand_plugin_root(&command.body, LAYOUT.dot_dir),
            ),
        );
    }

    if !plugin.skills.is_empty() {
        bundle.warn(
            LAYOUT.id,
            format!(
                "skills are not supported; skipped {} skill(s)",
                plugin.skills.len()
            ),
        );
    }

    bundle.servers = super::servers_passthrough(plugin);

    if plugin.hooks.is_some() {
        bundle.warn(LAYOUT.id, "hooks are not supported; skipped hooks.json");
    }

    bundle
}

/// Cursor rule frontmatter: the description drives when the rule attaches,
/// and `alwaysApply: false` keeps it out of every context
fn rule_markdown(agent: &MarkdownArtifact) -> String {
    let mut fm = Mapping::new();
    if let Some(desc) = frontmatter::get_str(&agent.frontmatter, "description") {
        fm.insert(Yaml::String("description".to_string()), Yaml::String(desc));
    }
    fm.insert(
        Yaml::String("alwaysApply".to_string()),
        Yaml::Bool(false),
    );
    frontmatter::compose(&fm, &rewrite::expand_plugin_root(&agent.body, LAYOUT.dot_dir))
}
