//! Plugin manifest and catalog files
//!
//! Parsing for the JSON sidecars of a Claude plugin directory:
//! `.claude-plugin/plugin.json`, `.mcp.json`, and the optional
//! `.claude-plugin/marketplace.json` catalog.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ReplugError, Result};

/// Plugin manifest (.claude-plugin/plugin.json)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Plugin name (the only required field)
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Author as either a plain string or a `{name, email, url}` object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<Author>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
}

impl PluginManifest {
    /// Parse plugin.json from a file path
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ReplugError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ReplugError::ManifestParseFailed {
            path: path.display().to_string(),
            reason: format!("Invalid JSON: {e}"),
        })
    }

    /// Synthetic manifest for plugin directories that carry artifacts but no
    /// `.claude-plugin/plugin.json`
    pub fn synthetic(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// Plugin author, written either as `"Jane <jane@example.com>"` or as an
/// object with optional `name`, `email`, and `url` fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Author {
    Name(String),
    Detailed {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        email: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
}

impl Author {
    /// Displayable author name, if one was given
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Author::Name(s) => Some(s.as_str()),
            Author::Detailed { name, .. } => name.as_deref(),
        }
    }
}

/// A single MCP server definition from .mcp.json
///
/// Known fields are typed; everything else (transport type, headers, ...)
/// is kept in `extra` so targets that take servers verbatim lose nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct McpServer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub env: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl McpServer {
    /// Whether this server is reached over a URL rather than spawned locally
    pub fn is_remote(&self) -> bool {
        self.command.is_none() && self.url.is_some()
    }
}

/// Load `.mcp.json`. Accepts both the `{"mcpServers": {...}}` wrapper and a
/// bare top-level map of server definitions.
pub fn load_mcp_servers(path: &Path) -> Result<BTreeMap<String, McpServer>> {
    let content = fs::read_to_string(path).map_err(|e| ReplugError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    parse_mcp_servers(&content).map_err(|reason| ReplugError::ManifestParseFailed {
        path: path.display().to_string(),
        reason,
    })
}

fn parse_mcp_servers(content: &str) -> std::result::Result<BTreeMap<String, McpServer>, String> {
    let value: Value = serde_json::from_str(content).map_err(|e| format!("Invalid JSON: {e}"))?;
    let Value::Object(mut obj) = value else {
        return Err("Expected a JSON object".to_string());
    };

    let server_map = match obj.remove("mcpServers") {
        Some(Value::Object(inner)) => inner,
        Some(_) => return Err("\"mcpServers\" must be an object".to_string()),
        None => obj,
    };

    server_map
        .into_iter()
        .map(|(name, v)| {
            serde_json::from_value::<McpServer>(v)
                .map(|server| (name.clone(), server))
                .map_err(|e| format!("Server '{name}': {e}"))
        })
        .collect()
}

/// Marketplace catalog (.claude-plugin/marketplace.json)
///
/// A repository-level index of plugins whose sources live in subdirectories
/// of the same repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceCatalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Owner as a string or an object; never interpreted, only displayed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<Value>,

    #[serde(default)]
    pub plugins: Vec<MarketplaceEntry>,
}

/// A plugin entry in marketplace.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketplaceEntry {
    pub name: String,

    /// Source as a path string relative to the repository root, or an object
    /// for externally-hosted plugins (which cannot be converted in place)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl MarketplaceEntry {
    /// Relative source directory for entries that live inside this repository
    pub fn source_dir(&self) -> Option<&str> {
        match &self.source {
            Some(Value::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl MarketplaceCatalog {
    /// Parse marketplace.json from a file path
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ReplugError::FileReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| ReplugError::ManifestParseFailed {
            path: path.display().to_string(),
            reason: format!("Invalid JSON: {e}"),
        })
    }

    /// Find an entry by name
    pub fn find(&self, name: &str) -> Result<&MarketplaceEntry> {
        self.plugins
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ReplugError::PluginNotInMarketplace {
                name: name.to_string(),
            })
    }
}
