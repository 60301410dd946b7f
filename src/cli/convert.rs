use std::path::PathBuf;

use clap::Parser;

/// Arguments for the convert command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Convert a local plugin:\n    replug convert ./my-plugin --to opencode\n\n\
                   Convert from GitHub:\n    replug convert owner/repo --to gemini\n    \
                   replug convert github:owner/repo#v2.0 --to codex\n\n\
                   Convert for several targets at once:\n    replug convert ./plugin --to opencode cursor droid\n\n\
                   Convert only commands:\n    replug convert ./plugin --to gemini --only 'commands/*'")]
pub struct ConvertArgs {
    /// Plugin source: local directory, owner/repo, github:owner/repo, or git URL (#ref optional)
    pub source: String,

    /// Targets to convert for (e.g. --to opencode gemini)
    #[arg(long = "to", short = 't', value_name = "TARGET", num_args = 1.., required = true)]
    pub targets: Vec<String>,

    /// Output directory to write bundles under (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    /// Pick a plugin by name from a marketplace repository
    #[arg(long, value_name = "NAME")]
    pub plugin: Option<String>,

    /// Convert every plugin in a marketplace repository
    #[arg(long)]
    pub all: bool,

    /// Convert only artifacts whose kind/name matches this glob
    #[arg(long, value_name = "GLOB")]
    pub only: Option<String>,
}
