//! Replug - Claude plugin converter
//!
//! A command line tool that converts Claude Code plugins (agents, commands,
//! skills, MCP servers) into the native configuration layout of other AI
//! coding agents: OpenCode, Gemini CLI, Codex CLI, Factory Droid, Cursor,
//! and Pi.

use clap::Parser;

mod bundle;
mod cache;
mod cli;
mod commands;
mod convert;
mod error;
mod filter;
mod path_utils;
mod plugin;
mod progress;
mod report;
mod source;
mod writer;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert(args) => commands::convert::run(args, cli.verbose),
        Commands::Install(args) => commands::install::run(args, cli.verbose),
        Commands::Targets => commands::targets::run(),
        Commands::Cache(args) => commands::cache::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
