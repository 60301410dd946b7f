//! Claude plugin directory loading
//!
//! Scans a plugin directory into a [`Plugin`] value: manifest, agents,
//! commands (colon-namespaced for subdirectories), skills, MCP servers,
//! and raw hook configuration. All artifact content is read up front so
//! converters stay pure.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use serde_yaml::Mapping;
use walkdir::WalkDir;

use crate::error::{ReplugError, Result};
use crate::plugin::frontmatter;
use crate::plugin::manifest::{self, MarketplaceCatalog, McpServer, PluginManifest};

/// Manifest directory inside a plugin or marketplace repository
pub const MANIFEST_DIR: &str = ".claude-plugin";
/// Manifest file name
pub const MANIFEST_FILE: &str = "plugin.json";
/// Marketplace catalog file name
pub const MARKETPLACE_FILE: &str = "marketplace.json";

const MCP_FILE: &str = ".mcp.json";
const AGENTS_DIR: &str = "agents";
const COMMANDS_DIR: &str = "commands";
const SKILLS_DIR: &str = "skills";
const HOOKS_DIR: &str = "hooks";
const HOOKS_FILE: &str = "hooks.json";
const SKILL_MD: &str = "SKILL.md";

/// A markdown artifact (agent or command) loaded from a plugin
#[derive(Debug, Clone)]
pub struct MarkdownArtifact {
    /// Artifact name. Commands in subdirectories get colon-namespaced names
    /// (`commands/git/commit.md` loads as `git:commit`).
    pub name: String,
    pub frontmatter: Mapping,
    pub body: String,
}

/// A skill: `skills/<name>/SKILL.md` plus its sibling support files
#[derive(Debug, Clone)]
pub struct Skill {
    pub name: String,
    pub frontmatter: Mapping,
    pub body: String,
    /// Absolute path to the skill directory, for pass-through copies
    pub dir: PathBuf,
}

/// A fully loaded Claude plugin
#[derive(Debug, Clone)]
pub struct Plugin {
    pub manifest: PluginManifest,
    /// Plugin root directory on disk
    pub root: PathBuf,
    pub agents: Vec<MarkdownArtifact>,
    pub commands: Vec<MarkdownArtifact>,
    pub skills: Vec<Skill>,
    pub mcp_servers: BTreeMap<String, McpServer>,
    /// Raw hooks/hooks.json content, if present
    pub hooks: Option<Value>,
}

impl Plugin {
    /// Load a plugin from a directory.
    ///
    /// The manifest is required unless the directory carries at least one
    /// artifact directory, in which case a synthetic manifest named after
    /// the directory is used. Artifacts are sorted by name; on a name
    /// collision within a kind, the first occurrence wins.
    pub fn load(dir: &Path) -> Result<Self> {
        let manifest_path = dir.join(MANIFEST_DIR).join(MANIFEST_FILE);
        let manifest = if manifest_path.is_file() {
            PluginManifest::from_file(&manifest_path)?
        } else if has_artifacts(dir) {
            PluginManifest::synthetic(&dir_basename(dir))
        } else {
            return Err(ReplugError::PluginNotFound {
                path: dir.display().to_string(),
            });
        };

        let agents = scan_markdown_dir(&dir.join(AGENTS_DIR), NameStyle::Stem)?;
        let commands = scan_markdown_dir(&dir.join(COMMANDS_DIR), NameStyle::Namespaced)?;
        let skills = scan_skills(&dir.join(SKILLS_DIR))?;

        let mcp_path = dir.join(MCP_FILE);
        let mcp_servers = if mcp_path.is_file() {
            manifest::load_mcp_servers(&mcp_path)?
        } else {
            BTreeMap::new()
        };

        let hooks = load_hooks(dir)?;

        Ok(Self {
            manifest,
            root: dir.to_path_buf(),
            agents,
            commands,
            skills,
            mcp_servers,
            hooks,
        })
    }

    pub fn name(&self) -> &str {
        &self.manifest.name
    }

    /// True when the plugin carries nothing to convert
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
            && self.commands.is_empty()
            && self.skills.is_empty()
            && self.mcp_servers.is_empty()
            && self.hooks.is_none()
    }
}

/// Load the marketplace catalog if the directory carries one
pub fn load_marketplace(dir: &Path) -> Result<Option<MarketplaceCatalog>> {
    let path = dir.join(MANIFEST_DIR).join(MARKETPLACE_FILE);
    if !path.is_file() {
        return Ok(None);
    }
    MarketplaceCatalog::from_file(&path).map(Some)
}

fn has_artifacts(dir: &Path) -> bool {
    [AGENTS_DIR, COMMANDS_DIR, SKILLS_DIR, HOOKS_DIR]
        .iter()
        .any(|d| dir.join(d).is_dir())
        || dir.join(MCP_FILE).is_file()
}

fn dir_basename(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "plugin".to_string())
}

fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.depth() > 0
        && entry
            .file_name()
            .to_str()
            .is_some_and(|s| s.starts_with('.'))
}

#[derive(Clone, Copy)]
enum NameStyle {
    /// Frontmatter `name`, falling back to the file stem (agents)
    Stem,
    /// Subdirectory components joined with `:` (commands)
    Namespaced,
}

fn scan_markdown_dir(dir: &Path, style: NameStyle) -> Result<Vec<MarkdownArtifact>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut artifacts = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
    {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("md") {
            continue;
        }

        let content = fs::read_to_string(path).map_err(|e| ReplugError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let (frontmatter, body) = frontmatter::split_or_body(&content);

        let rel = path.strip_prefix(dir).unwrap_or(path);
        let name = match style {
            NameStyle::Stem => frontmatter::get_str(&frontmatter, "name")
                .unwrap_or_else(|| file_stem(rel)),
            NameStyle::Namespaced => namespaced_name(rel),
        };

        artifacts.push(MarkdownArtifact {
            name,
            frontmatter,
            body,
        });
    }

    artifacts.sort_by(|a, b| a.name.cmp(&b.name));
    artifacts.dedup_by(|a, b| a.name == b.name);
    Ok(artifacts)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Build a colon-namespaced command name from a path relative to commands/
fn namespaced_name(rel: &Path) -> String {
    let mut parts: Vec<String> = rel
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    parts.push(file_stem(rel));
    parts.join(":")
}

fn scan_skills(dir: &Path) -> Result<Vec<Skill>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut skills = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let skill_dir = entry.path();
        if !skill_dir.is_dir() {
            // Standalone files directly under skills/ are not skills
            continue;
        }
        let dir_name = dir_basename(&skill_dir);
        if dir_name.starts_with('.') {
            continue;
        }

        let skill_md = skill_dir.join(SKILL_MD);
        if !skill_md.is_file() {
            continue;
        }

        let content = fs::read_to_string(&skill_md).map_err(|e| ReplugError::FileReadFailed {
            path: skill_md.display().to_string(),
            reason: e.to_string(),
        })?;
        let (frontmatter, body) = frontmatter::split_or_body(&content);
        let name = frontmatter::get_str(&frontmatter, "name").unwrap_or(dir_name);

        skills.push(Skill {
            name,
            frontmatter,
            body,
            dir: skill_dir,
        });
    }

    skills.sort_by(|a, b| a.name.cmp(&b.name));
    skills.dedup_by(|a, b| a.name == b.name);
    Ok(skills)
}

fn load_hooks(dir: &Path) -> Result<Option<Value>> {
    let path = dir.join(HOOKS_DIR).join(HOOKS_FILE);
    if !path.is_file() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|e| ReplugError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let value = serde_json::from_str(&content).map_err(|e| ReplugError::ManifestParseFailed {
        path: path.display().to_string(),
        reason: format!("Invalid JSON: {e}"),
    })?;
    Ok(Some(value))
}
