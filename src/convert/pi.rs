//! Pi converter
//!
//! Pi mirrors Claude's layout closely: markdown agents and commands with a
//! description-only title block, skills copied as-is, and MCP servers under
//! `mcpServers` in `~/.pi/settings.json`.

use crate::bundle::Bundle;
use crate::plugin::{MarkdownArtifact, Plugin, frontmatter};
use crate::writer::TargetLayout;

use super::rewrite;

pub const LAYOUT: TargetLayout = TargetLayout {
    id: "pi",
    display_name: "Pi",
    dot_dir: ".pi",
    config_file: Some("settings.json"),
    mergeable_keys: &["mcpServers"],
    server_key: Some("mcpServers"),
};

pub fn convert(plugin: &Plugin) -> Bundle {
    let mut bundle = Bundle::new();

    for agent in &plugin.agents {
        bundle.push_file("agents", agent.name.clone(), "md", described(agent));
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn artifact(name: &str, content: &str) -> MarkdownArtifact {
        let (frontmatter, body) = frontmatter::split_or_body(content);
        MarkdownArtifact {
            name: name.to_string(),
            frontmatter,
            body,
        }
    }

    #[test]
    fn test_full_surface() {
        let mut servers = BTreeMap::new();
        servers.insert(
            "github".to_string(),
            crate::plugin::McpServer {
                command: Some("gh-mcp".to_string()),
                ..Default::default()
            },
        );

        let plugin = Plugin {
            manifest: crate::plugin::PluginManifest::synthetic("demo"),
            root: PathBuf::from("/tmp/demo"),
            agents: vec![artifact("helper", "---\ndescription: Helps\n---\nHelp out.")],
            commands: vec![artifact("ops:deploy", "Deploy things.")],
            skills: vec![crate::plugin::Skill {
                name: "notes".to_string(),
                frontmatter: serde_yaml::Mapping::new(),
                body: String::new(),
                dir: PathBuf::from("/tmp/demo/skills/notes"),
            }],
            mcp_servers: servers,
            hooks: None,
        };

        let bundle = convert(&plugin);
        assert_eq!(bundle.files.len(), 2);
        assert_eq!(bundle.files[0].subdir, "agents");
        assert_eq!(bundle.files[1].name, "ops/deploy");
        assert_eq!(bundle.trees.len(), 1);
        assert!(bundle.servers.is_some());
        assert!(bundle.advisories.is_empty());
    }

    #[test]
    fn test_described_keeps_only_description() {
        let agent = artifact(
            "helper",
            "---\ndescription: Helps\nmodel: opus\ncolor: blue\n---\nHelp out.",
        );
        assert_eq!(described(&agent), "---\ndescription: Helps\n---\n\nHelp out.\n");
    }
}
