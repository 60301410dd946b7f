//! Factory Droid converter
//!
//! Droid keeps custom droids and commands as markdown with a description-only
//! title block, skills in Claude's layout, and MCP servers in
//! `~/.factory/mcp.json` under `mcpServers`.

use crate::bundle::Bundle;
use crate::plugin::{MarkdownArtifact, Plugin, frontmatter};
use crate::writer::TargetLayout;

use super::rewrite;

pub const LAYOUT: TargetLayout = TargetLayout {
    id: "droid",
    display_name: "Factory Droid",
    dot_dir: ".factory",
    config_file: Some("mcp.json"),
    mergeable_keys: &["mcpServers"],
    server_key: Some("mcpServers"),
};

pub fn convert(plugin: &Plugin) -> Bundle {
    let mut bundle = Bundle::new();

    for agent in &plugin.agents {
        bundle.push_file("droids", agent.name.clone(), "md", described(agent));
    }

    for command in &plugin.commands {
        bundle.push_file(
            "commands",
            rewrite::namespace_to_path(&command.name),
            "md",
            described(command),
        );
    }

    for skill in &plugin.skills {
        bundle.push_tree("skills", skill.name.clone(), skill.dir.clone());
    }

    bundle.servers = super::servers_passthrough(plugin);

    if plugin.hooks.is_some() {
        bundle.warn(LAYOUT.id, "hooks are not supported; skipped hooks.json");
    }

    bundle
}

fn described(artifact: &MarkdownArtifact) -> String {
    super::described_markdown(
        frontmatter::get_str(&artifact.frontmatter, "description").as_deref(),
        &rewrite::expand_plugin_root(&artifact.body, LAYOUT.dot_dir),
    )
}
