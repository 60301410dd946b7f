//! Gemini CLI converter
//!
//! Commands become TOML files (`description` + `prompt` keys) with Gemini's
//! `{{args}}` placeholder; skills become generated markdown since Gemini has
//! no skill directories; agents and hooks have no representation and produce
//! advisories. MCP servers pass through verbatim under `mcpServers`.

use serde_yaml::{Mapping, Value as Yaml};

use crate::bundle::Bundle;
use crate::plugin::{MarkdownArtifact, Plugin, Skill, frontmatter};
use crate::writer::TargetLayout;

use super::rewrite;

pub const LAYOUT: TargetLayout = TargetLayout {
    id: "gemini",
    display_name: "Gemini CLI",
    dot_dir: ".gemini",
    config_file: Some("settings.json"),
    mergeable_keys: &["mcpServers"],
    server_key: Some("mcpServers"),
};

/// Gemini's placeholder for the command arguments
const ARGS_PLACEHOLDER: &str = "{{args}}";

pub fn convert(plugin: &Plugin) -> Bundle {
    let mut bundle = Bundle::new();

    if !plugin.agents.is_empty() {
        bundle.warn(
            LAYOUT.id,
            format!(
                "agents are not supported; skipped {} agent(s)",
                plugin.agents.len()
            ),
        );
    }

    for command in &plugin.commands {
        bundle.push_file(
            "commands",
            rewrite::namespace_to_path(&command.name),
            "toml",
            command_toml(command),
        );
    }

    for skill in &plugin.skills {
        bundle.push_file("skills", skill.name.clone(), "md", skill_markdown(skill));
    }

    bundle.servers = super::servers_passthrough(plugin);

    if plugin.hooks.is_some() {
        bundle.warn(LAYOUT.id, "hooks are not supported; skipped hooks.json");
    }

    bundle
}

fn command_toml(command: &MarkdownArtifact) -> String {
    let description = frontmatter::get_str(&command.frontmatter, "description");
    let prompt = rewrite::rewrite_arguments(
        &rewrite::expand_plugin_root(&command.body, LAYOUT.dot_dir),
        ARGS_PLACEHOLDER,
    );
    build_toml(description.as_deref(), &prompt)
}

/// Serialize the two-key command file. The output is simple enough that a
/// dedicated formatter beats pulling in a TOML crate.
fn build_toml(description: Option<&str>, prompt: &str) -> String {
    let mut out = String::new();
    if let Some(desc) = description {
        out.push_str(&format!("description = {}\n", toml_string(desc)));
    }

    // Multi-line basic strings read better, but only when the content
    // cannot collide with the delimiter
    if prompt.contains('\n') && !prompt.contains("\"\"\"") && !prompt.ends_with('"') {
        let mut prompt = prompt.to_string();
        if !prompt.ends_with('\n') {
            prompt.push('\n');
        }
        out.push_str(&format!("prompt = \"\"\"\n{prompt}\"\"\"\n"));
    } else {
        out.push_str(&format!("prompt = {}\n", toml_string(prompt)));
    }
    out
}

/// Escape into a TOML basic string, quotes included
fn toml_string(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len() + 2);
    escaped.push('"');
    for c in s.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            '\x00'..='\x08' | '\x0B' | '\x0C' | '\x0E'..='\x1F' => {
                escaped.push_str(&format!("\\u{:04X}", c as u32));
            }
            _ => escaped.push(c),
        }
    }
    escaped.push('"');
    escaped
}

/// Skills have no Gemini equivalent; emit their content as plain markdown
/// reference material with a title block
fn skill_markdown(skill: &Skill) -> String {
    let mut fm = Mapping::new();
    fm.insert(
        Yaml::String("name".to_string()),
        Yaml::String(skill.name.clone()),
    );
    if let Some(desc) = frontmatter::get_str(&skill.frontmatter, "description") {
        fm.insert(
            Yaml::String("description".to_string()),
            Yaml::String(desc),
        );
    }
    frontmatter::compose(&fm, &rewrite::expand_plugin_root(&skill.body, LAYOUT.dot_dir))
}
