//! YAML frontmatter handling for plugin markdown artifacts.
//!
//! Agents, commands, and skills all carry optional YAML frontmatter between
//! `---` delimiters. Converters read metadata from it and compose new
//! frontmatter for the target platform's dialect.

use serde_yaml::{Mapping, Value};

/// Split markdown content into a YAML frontmatter mapping and the body.
///
/// Returns `None` when there is no frontmatter block (missing delimiters) or
/// the block does not parse as a YAML mapping; callers then treat the whole
/// content as body.
pub fn split(content: &str) -> Option<(Mapping, String)> {
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() < 3 || lines[0].trim() != "---" {
        return None;
    }
    let end_idx = lines[1..].iter().position(|l| l.trim() == "---")? + 1;
    let frontmatter_str = lines[1..end_idx].join("\n");

    let value: Value = serde_yaml::from_str(&frontmatter_str).ok()?;
    let mapping = match value {
        Value::Mapping(m) => m,
        Value::Null => Mapping::new(),
        _ => return None,
    };

    // Skip blank lines between the closing delimiter and the body
    let body = lines[end_idx + 1..]
        .iter()
        .skip_while(|l| l.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n");

    Some((mapping, body))
}

/// Split content, falling back to an empty mapping and the full content as
/// body when no frontmatter is present.
pub fn split_or_body(content: &str) -> (Mapping, String) {
    split(content).unwrap_or_else(|| (Mapping::new(), content.to_string()))
}

/// Compose a markdown document from a frontmatter mapping and body.
///
/// An empty mapping produces the body alone. The result always ends with a
/// single trailing newline.
pub fn compose(frontmatter: &Mapping, body: &str) -> String {
    let body = body.trim_end();
    if frontmatter.is_empty() {
        if body.is_empty() {
            return String::new();
        }
        return format!("{body}\n");
    }
    let yaml = serde_yaml::to_string(&Value::Mapping(frontmatter.clone()))
        .unwrap_or_else(|_| String::new());
    if body.is_empty() {
        format!("---\n{yaml}---\n")
    } else {
        format!("---\n{yaml}---\n\n{body}\n")
    }
}

/// Get a string value by top-level key. Numbers and booleans are stringified.
pub fn get_str(frontmatter: &Mapping, key: &str) -> Option<String> {
    match frontmatter.get(Value::String(key.to_string()))? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Get a list of strings by top-level key.
///
/// Accepts either a YAML sequence or a comma-separated scalar, which is how
/// `allowed-tools` appears in the wild.
pub fn get_string_list(frontmatter: &Mapping, key: &str) -> Option<Vec<String>> {
    match frontmatter.get(Value::String(key.to_string()))? {
        Value::Sequence(seq) => Some(
            seq.iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        ),
        Value::String(s) => Some(
            s.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        ),
        _ => None,
    }
}
