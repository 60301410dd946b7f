//! Claude plugin model: manifests, frontmatter, and directory loading

pub mod frontmatter;
pub mod loader;
pub mod manifest;

pub use loader::{MarkdownArtifact, Plugin, Skill, load_marketplace};
pub use manifest::{Author, MarketplaceCatalog, MarketplaceEntry, McpServer, PluginManifest};
