use clap::Parser;

/// Arguments for the completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    replug completions --shell bash > ~/.bash_completion.d/replug\n\n\
                  Generate zsh completions:\n    replug completions --shell zsh > ~/.zfunc/_replug\n\n\
                  Generate fish completions:\n    replug completions --shell fish > ~/.config/fish/completions/replug.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(long, value_name = "SHELL")]
    pub shell: String,
}
