//! Codex CLI converter
//!
//! Codex reads plain markdown prompts without frontmatter, so commands and
//! agents are flattened to prompt files with a heading. There is no managed
//! config file: Codex keeps MCP servers in `config.toml`, which we refuse to
//! touch, so servers surface as an advisory instead.

use crate::bundle::Bundle;
use crate::plugin::{MarkdownArtifact, Plugin, frontmatter};
use crate::writer::TargetLayout;

use super::rewrite;

pub const LAYOUT: TargetLayout = TargetLayout {
    id: "codex",
    display_name: "Codex CLI",
    dot_dir: ".codex",
    config_file: None,
    mergeable_keys: &[],
    server_key: None,
};

pub fn convert(plugin: &Plugin) -> Bundle {
    let mut bundle = Bundle::new();

    for agent in &plugin.agents {
        bundle.push_file("agents", agent.name.clone(), "md", prompt_markdown(agent));
    }

    for command in &plugin.commands {
        bundle.push_file(
            "prompts",
            rewrite::namespace_to_path(&command.name),
            "md",
            prompt_markdown(command),
        );
    }

    for skill in &plugin.skills {
        bundle.push_tree("skills", skill.name.clone(), skill.dir.clone());
    }

    if !plugin.mcp_servers.is_empty() {
        bundle.warn(
            LAYOUT.id,
            format!(
                "MCP servers must be added to ~/.codex/config.toml manually; skipped {} server(s)",
                plugin.mcp_servers.len()
            ),
        );
    }

    if plugin.hooks.is_some() {
        bundle.warn(LAYOUT.id, "hooks are not supported; skipped hooks.json");
    }

    bundle
}

/// Strip the frontmatter down to a heading plus the description, then the body
fn prompt_markdown(artifact: &MarkdownArtifact) -> String {
    let mut out = format!("# {}\n\n", artifact.name);
    if let Some(desc) = frontmatter::get_str(&artifact.frontmatter, "description") {
        out.push_str(&desc);
        out.push_str("\n\n");
    }
    out.push_str(&rewrite::expand_plugin_root(&artifact.body, LAYOUT.dot_dir));
    out
}
