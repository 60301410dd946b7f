use std::path::PathBuf;

use clap::Parser;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install into the targets' home directories:\n    replug install ./my-plugin --to opencode cursor\n\n\
                   Install from GitHub:\n    replug install owner/repo --to gemini\n\n\
                   Install under a different root (writes <DIR>/<dot-dir>):\n    replug install ./plugin --to droid --root /srv/agents\n\n\
                   Pick plugins from a marketplace repository:\n    replug install owner/marketplace --to opencode --all")]
pub struct InstallArgs {
    /// Plugin source: local directory, owner/repo, github:owner/repo, or git URL (#ref optional)
    pub source: String,

    /// Targets to install for (e.g. --to opencode gemini)
    #[arg(long = "to", short = 't', value_name = "TARGET", num_args = 1.., required = true)]
    pub targets: Vec<String>,

    /// Root directory to install under instead of each target's home
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Pick a plugin by name from a marketplace repository
    #[arg(long, value_name = "NAME")]
    pub plugin: Option<String>,

    /// Install every plugin in a marketplace repository
    #[arg(long)]
    pub all: bool,

    /// Install only artifacts whose kind/name matches this glob
    #[arg(long, value_name = "GLOB")]
    pub only: Option<String>,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    #[test]
    fn test_cli_parsing_install() {
        let cli =
            super::super::Cli::try_parse_from(["replug", "install", "owner/repo", "-t", "cursor"])
                .unwrap();
        match cli.command {
            super::super::Commands::Install(args) => {
                assert_eq!(args.source, "owner/repo");
                assert_eq!(args.targets, vec!["cursor"]);
                assert_eq!(args.root, None);
            }
            _ => panic!("Expected Install command"),
        }
    }

    #[test]
    fn test_cli_parsing_install_with_root() {
        let cli = super::super::Cli::try_parse_from([
            "replug", "install", "./plugin", "--to", "droid", "--root", "/srv/agents",
        ])
        .unwrap();
        match cli.command {
            super::super::Commands::Install(args) => {
                assert_eq!(args.root, Some(std::path::PathBuf::from("/srv/agents")));
            }
            _ => panic!("Expected Install command"),
        }
    }
}
