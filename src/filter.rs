//! Artifact filtering for `--only`
//!
//! Patterns match the `kind/name` path of an artifact, always written with
//! forward slashes: `commands/*`, `agents/review*`, `skills/pdf-tools`.
//! MCP servers and hooks are not artifacts and pass through unfiltered.

use wax::{CandidatePath, Glob, Pattern};

use crate::error::{ReplugError, Result};
use crate::plugin::Plugin;

/// Compiled `--only` filter
#[derive(Debug)]
pub struct ArtifactFilter {
    glob: Glob<'static>,
}

impl ArtifactFilter {
    pub fn parse(pattern: &str) -> Result<Self> {
        let glob = Glob::new(pattern)
            .map_err(|e| ReplugError::InvalidFilterPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?
            .into_owned();
        Ok(Self { glob })
    }

    pub fn matches(&self, kind: &str, name: &str) -> bool {
        let path = format!("{kind}/{name}");
        let candidate = CandidatePath::from(path.as_str());
        self.glob.matched(&candidate).is_some()
    }

    /// Drop every artifact the filter does not match
    pub fn apply(&self, plugin: &mut Plugin) {
        plugin.agents.retain(|a| self.matches("agents", &a.name));
        plugin
            .commands
            .retain(|c| self.matches("commands", &c.name));
        plugin.skills.retain(|s| self.matches("skills", &s.name));
    }
}
