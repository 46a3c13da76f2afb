//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// wsbundle - deployment bundle processor
///
/// Loads a bundle of workspace jobs and pipelines and prepares it for deployment.
#[derive(Parser, Debug)]
#[command(
    name = "wsbundle",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Deployment bundle processor for workspace jobs and pipelines",
    long_about = "wsbundle loads a bundle.yml describing workspace jobs and pipelines, \
                  selects an environment, and rewrites references to local notebooks and \
                  files into the workspace paths they are deployed to.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  wsbundle validate\n    \
                  wsbundle validate --path ./my-bundle --environment prod\n    \
                  wsbundle validate --output json"
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
    /// Load a bundle, run all mutators and print the result
    Validate(ValidateArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Output format of the validate command
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Validate the bundle in the current directory:\n    wsbundle validate\n\n\
                  Validate a bundle for a specific environment:\n    wsbundle validate --path ./my-bundle --environment prod\n\n\
                  Print the result as JSON:\n    wsbundle validate --output json")]
pub struct ValidateArgs {
    /// Bundle root directory (defaults to current directory)
    #[arg(long, short = 'p')]
    pub path: Option<PathBuf>,

    /// Environment to select (defaults to the environment marked default)
    #[arg(long, short = 'e', env = "WSBUNDLE_ENVIRONMENT")]
    pub environment: Option<String>,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value_t = OutputFormat::Yaml)]
    pub output: OutputFormat,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    wsbundle completions --shell bash > ~/.bash_completion.d/wsbundle\n\n\
                  Generate zsh completions:\n    wsbundle completions --shell zsh > ~/.zfunc/_wsbundle")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(long, value_enum)]
    pub shell: clap_complete::Shell,
}
