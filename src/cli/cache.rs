use clap::Parser;

/// Arguments for the cache command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Show cache statistics:\n    replug cache\n\n\
                  Include total size on disk:\n    replug cache --show-size\n\n\
                  Remove all cached repositories:\n    replug cache --clear")]
pub struct CacheArgs {
    /// Include total size on disk (walks every cached file)
    #[arg(long)]
    pub show_size: bool,

    /// Remove all cached repositories
    #[arg(long)]
    pub clear: bool,
}
