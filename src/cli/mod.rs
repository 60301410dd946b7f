//! CLI definitions using clap derive API
//!
//! Argument types live in one submodule per command:
//! - convert: Convert command arguments
//! - install: Install command arguments
//! - cache: Cache command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod cache;
pub mod completions;
pub mod convert;
pub mod install;

pub use cache::CacheArgs;
pub use completions::CompletionsArgs;
pub use convert::ConvertArgs;
pub use install::InstallArgs;

/// Replug - Claude plugin converter
#[derive(Parser, Debug)]
#[command(
    name = "replug",
    author,
    version,
    color = clap::ColorChoice::Always,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Convert Claude Code plugins for other AI coding agents",
    long_about = "Replug converts Claude Code plugin bundles (agents, commands, skills, MCP \
                  servers, hooks) into the native configuration layout of OpenCode, Gemini CLI, \
                  Codex CLI, Factory Droid, Cursor, and Pi.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  replug convert ./plugin --to opencode        \x1b[90m# Write .opencode/ under the current directory\x1b[0m\n   \
                  replug convert owner/repo --to gemini codex  \x1b[90m# Fetch from GitHub, convert for two targets\x1b[0m\n   \
                  replug install ./plugin --to cursor          \x1b[90m# Install into ~/.cursor\x1b[0m\n   \
                  replug install owner/repo#v1.0 --to pi       \x1b[90m# Install a tagged release\x1b[0m\n   \
                  replug targets                               \x1b[90m# List supported targets\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a plugin and write the result under an output directory
    Convert(ConvertArgs),

    /// Convert a plugin and install it into the target's home directory
    Install(InstallArgs),

    /// List supported targets
    Targets,

    /// Manage the repository cache
    #[command(name = "cache")]
    Cache(CacheArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
