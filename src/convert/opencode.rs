//! OpenCode converter
//!
//! Agents and commands become markdown with OpenCode frontmatter, skills
//! pass through as directories, MCP servers are translated to OpenCode's
//! `mcp` schema, and hook configuration becomes a plugin stub under
//! `plugins/` for the events OpenCode can express.

use serde_json::{Map, Value};
use serde_yaml::{Mapping, Value as Yaml};

use crate::bundle::Bundle;
use crate::plugin::{MarkdownArtifact, McpServer, Plugin, frontmatter};
use crate::writer::TargetLayout;

use super::rewrite;

pub const LAYOUT: TargetLayout = TargetLayout {
    id: "opencode",
    display_name: "OpenCode",
    dot_dir: ".opencode",
    config_file: Some("opencode.json"),
    mergeable_keys: &["mcp", "permission", "tools"],
    server_key: Some("mcp"),
};

/// Claude hook events with an OpenCode plugin equivalent
const HOOK_EVENT_MAP: &[(&str, &str)] = &[
    ("PreToolUse", "tool.execute.before"),
    ("PostToolUse", "tool.execute.after"),
];

pub fn convert(plugin: &Plugin) -> Bundle {
    let mut bundle = Bundle::new();

    for agent in &plugin.agents {
        bundle.push_file("agents", agent.name.clone(), "md", agent_markdown(agent));
    }

    for command in &plugin.commands {
        bundle.push_file(
            "commands",
            rewrite::namespace_to_path(&command.name),
            "md",
            command_markdown(command),
        );
    }

    for skill in &plugin.skills {
        bundle.push_tree("skills", skill.name.clone(), skill.dir.clone());
    }

    bundle.servers = opencode_servers(plugin);

    if let Some(hooks) = &plugin.hooks {
        convert_hooks(plugin.name(), hooks, &mut bundle);
    }

    bundle
}

fn yaml_str(s: &str) -> Yaml {
    Yaml::String(s.to_string())
}

/// Agent markdown: `description`, `mode: subagent`, `model` when present,
/// and a `tools` map derived from the allowed-tools pseudo-calls
fn agent_markdown(agent: &MarkdownArtifact) -> String {
    let mut fm = Mapping::new();

    if let Some(desc) = frontmatter::get_str(&agent.frontmatter, "description") {
        fm.insert(yaml_str("description"), yaml_str(&desc));
    }
    fm.insert(yaml_str("mode"), yaml_str("subagent"));
    if let Some(model) = frontmatter::get_str(&agent.frontmatter, "model") {
        fm.insert(yaml_str("model"), yaml_str(&model));
    }

    let tools = frontmatter::get_string_list(&agent.frontmatter, "tools")
        .or_else(|| frontmatter::get_string_list(&agent.frontmatter, "allowed-tools"));
    if let Some(entries) = tools {
        let mut tool_map = Mapping::new();
        for entry in entries {
            // OpenCode keys tools by lowercased name; specifiers are dropped
            let (tool, _specifier) = rewrite::parse_tool_call(&entry);
            tool_map.insert(yaml_str(&tool.to_lowercase()), Yaml::Bool(true));
        }
        if !tool_map.is_empty() {
            fm.insert(yaml_str("tools"), Yaml::Mapping(tool_map));
        }
    }

    frontmatter::compose(&fm, &rewrite::expand_plugin_root(&agent.body, LAYOUT.dot_dir))
}

/// Command markdown: description plus `agent`/`model` pass-through;
/// `$ARGUMENTS` is OpenCode's own placeholder and stays untouched
fn command_markdown(command: &MarkdownArtifact) -> String {
    let mut fm = Mapping::new();
    for key in ["description", "agent", "model"] {
        if let Some(value) = frontmatter::get_str(&command.frontmatter, key) {
            fm.insert(yaml_str(key), yaml_str(&value));
        }
    }
    frontmatter::compose(&fm, &rewrite::expand_plugin_root(&command.body, LAYOUT.dot_dir))
}

/// Translate MCP servers into OpenCode's `mcp` entry schema
fn opencode_servers(plugin: &Plugin) -> Option<Map<String, Value>> {
    if plugin.mcp_servers.is_empty() {
        return None;
    }

    let mut servers = Map::new();
    for (name, server) in &plugin.mcp_servers {
        servers.insert(name.clone(), opencode_server_value(server));
    }
    Some(servers)
}

fn opencode_server_value(server: &McpServer) -> Value {
    let mut out = Map::new();

    if server.is_remote() {
        out.insert("type".to_string(), Value::String("remote".to_string()));
        if let Some(url) = &server.url {
            out.insert("url".to_string(), Value::String(url.clone()));
        }
    } else {
        out.insert("type".to_string(), Value::String("local".to_string()));
        let mut command = Vec::new();
        if let Some(cmd) = &server.command {
            command.push(Value::String(cmd.clone()));
        }
        command.extend(server.args.iter().cloned().map(Value::String));
        out.insert("command".to_string(), Value::Array(command));
        if !server.env.is_empty() {
            out.insert("environment".to_string(), Value::Object(server.env.clone()));
        }
    }

    out.insert("enabled".to_string(), Value::Bool(true));
    Value::Object(out)
}

/// One (event, matcher, command) triple from hooks.json
struct HookEntry {
    event: String,
    matcher: String,
    command: String,
}

fn convert_hooks(plugin_name: &str, hooks: &Value, bundle: &mut Bundle) {
    let entries = hook_entries(hooks);
    if entries.is_empty() {
        bundle.warn(
            LAYOUT.id,
            "hooks.json declares no command hooks; nothing to convert",
        );
        return;
    }

    let mapped: Vec<&HookEntry> = entries
        .iter()
        .filter(|e| HOOK_EVENT_MAP.iter().any(|(claude, _)| *claude == e.event))
        .collect();

    let mut unmapped: Vec<&str> = entries
        .iter()
        .filter(|e| HOOK_EVENT_MAP.iter().all(|(claude, _)| *claude != e.event))
        .map(|e| e.event.as_str())
        .collect();
    unmapped.sort_unstable();
    unmapped.dedup();

    if !unmapped.is_empty() {
        bundle.warn(
            LAYOUT.id,
            format!(
                "hook event(s) {} have no OpenCode plugin equivalent; skipped",
                unmapped.join(", ")
            ),
        );
    }

    if mapped.is_empty() {
        return;
    }

    bundle.push_file(
        "plugins",
        format!("{}-hooks", crate::path_utils::make_path_safe(plugin_name)),
        "js",
        hook_plugin_stub(plugin_name, &mapped),
    );
}

/// Generate the OpenCode plugin stub listing the original hook commands as
/// comments inside each mapped handler
fn hook_plugin_stub(plugin_name: &str, mapped: &[&HookEntry]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "// Generated from the {plugin_name} plugin's hooks.json.\n\
         // Each handler lists the original hook commands; wire them up as needed.\n\n"
    ));
    out.push_str(&format!(
        "export const {} = async ({{ $, directory }}) => {{\n  return {{\n",
        js_ident(plugin_name)
    ));

    for (claude_event, opencode_event) in HOOK_EVENT_MAP {
        let commands: Vec<&&HookEntry> =
            mapped.iter().filter(|e| e.event == *claude_event).collect();
        if commands.is_empty() {
            continue;
        }

        out.push_str(&format!(
            "    \"{opencode_event}\": async (input, output) => {{\n"
        ));
        for entry in commands {
            out.push_str(&format!(
                "      // {}: [{}] {}\n",
                claude_event, entry.matcher, entry.command
            ));
        }
        out.push_str("    },\n");
    }

    out.push_str("  };\n};\n");
    out
}

/// Flatten hooks.json into (event, matcher, command) triples, tolerating
/// both the `{"hooks": {...}}` wrapper and a bare event map
fn hook_entries(hooks: &Value) -> Vec<HookEntry> {
    let events = match hooks.get("hooks") {
        Some(Value::Object(inner)) => inner,
        _ => match hooks.as_object() {
            Some(obj) => obj,
            None => return Vec::new(),
        },
    };

    let mut entries = Vec::new();
    for (event, groups) in events {
        let Some(groups) = groups.as_array() else {
            continue;
        };
        for group in groups {
            let matcher = group
                .get("matcher")
                .and_then(Value::as_str)
                .unwrap_or("*")
                .to_string();
            let Some(hook_list) = group.get("hooks").and_then(Value::as_array) else {
                continue;
            };
            for hook in hook_list {
                if let Some(command) = hook.get("command").and_then(Value::as_str) {
                    entries.push(HookEntry {
                        event: event.clone(),
                        matcher: matcher.clone(),
                        command: command.to_string(),
                    });
                }
            }
        }
    }
    entries
}

/// Derive a camelCase JS identifier ending in `Hooks` from a plugin name
fn js_ident(plugin_name: &str) -> String {
    let mut ident = String::new();
    let mut upper_next = false;
    for c in plugin_name.chars() {
        if c.is_ascii_alphanumeric() {
            if ident.is_empty() && c.is_ascii_digit() {
                ident.push('_');
            }
            if upper_next {
                ident.extend(c.to_uppercase());
                upper_next = false;
            } else {
                ident.extend(c.to_lowercase());
            }
        } else {
            upper_next = !ident.is_empty();
        }
    }
    if ident.is_empty() {
        ident.push_str("plugin");
    }
    ident.push_str("Hooks");
    ident
}
