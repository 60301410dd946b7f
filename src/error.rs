//! Error types and handling for Replug
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Replug operations
#[derive(Error, Diagnostic, Debug)]
pub enum ReplugError {
    // Plugin errors
    #[error("No Claude plugin found at: {path}")]
    #[diagnostic(
        code(replug::plugin::not_found),
        help(
            "A plugin directory contains .claude-plugin/plugin.json or at least one of agents/, commands/, skills/"
        )
    )]
    PluginNotFound { path: String },

    #[error("Failed to parse plugin manifest: {path}")]
    #[diagnostic(code(replug::plugin::manifest_parse_failed))]
    ManifestParseFailed { path: String, reason: String },

    #[error("Plugin '{name}' not found in marketplace")]
    #[diagnostic(
        code(replug::plugin::unknown_plugin),
        help("Run without --plugin to pick interactively, or use --all")
    )]
    PluginNotInMarketplace { name: String },

    // Target errors
    #[error("Unknown target: {name}")]
    #[diagnostic(
        code(replug::target::unknown),
        help("Supported targets: opencode, gemini, codex, droid, cursor, pi")
    )]
    UnknownTarget { name: String },

    // Source errors
    #[error("Invalid source: {url}")]
    #[diagnostic(
        code(replug::source::invalid_url),
        help("Valid formats: ./path, github:owner/repo, owner/repo, https://github.com/owner/repo.git")
    )]
    InvalidSourceUrl { url: String },

    // Git errors
    #[error("Git operation failed: {message}")]
    #[diagnostic(code(replug::git::operation_failed))]
    GitOperationFailed { message: String },

    #[error("Failed to clone repository: {url}: {reason}")]
    #[diagnostic(
        code(replug::git::clone_failed),
        help("Check that the URL is correct and you have access to the repository")
    )]
    GitCloneFailed { url: String, reason: String },

    #[error("Failed to resolve git ref '{git_ref}': {reason}")]
    #[diagnostic(code(replug::git::ref_resolve_failed))]
    GitRefResolveFailed { git_ref: String, reason: String },

    // Artifact filter errors
    #[error("Invalid filter pattern: {pattern}")]
    #[diagnostic(
        code(replug::filter::invalid_pattern),
        help("Patterns match kind/name paths, e.g. 'commands/*' or 'agents/review*'")
    )]
    InvalidFilterPattern { pattern: String, reason: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(replug::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(replug::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("Failed to back up file before overwrite: {path}")]
    #[diagnostic(
        code(replug::fs::backup_failed),
        help("The destination was left untouched; nothing was overwritten")
    )]
    BackupFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}")]
    #[diagnostic(code(replug::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(replug::fs::io_error))]
    IoError { message: String },

    #[error("Could not determine home directory")]
    #[diagnostic(
        code(replug::fs::home_unavailable),
        help("Pass --root to choose the destination explicitly")
    )]
    HomeDirUnavailable,

    // Cache errors
    #[error("Cache operation failed: {message}")]
    #[diagnostic(code(replug::cache::operation_failed))]
    CacheOperationFailed { message: String },
}

impl From<std::io::Error> for ReplugError {
    fn from(err: std::io::Error) -> Self {
        ReplugError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for ReplugError {
    fn from(err: serde_yaml::Error) -> Self {
        ReplugError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ReplugError {
    fn from(err: serde_json::Error) -> Self {
        ReplugError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<git2::Error> for ReplugError {
    fn from(err: git2::Error) -> Self {
        ReplugError::GitOperationFailed {
            message: err.to_string(),
        }
    }
}

impl From<inquire::InquireError> for ReplugError {
    fn from(err: inquire::InquireError) -> Self {
        ReplugError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ReplugError>;
