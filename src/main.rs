//! wsbundle - deployment bundle processor
//!
//! Command line entry point: parses arguments, sets up logging and dispatches
//! to the command implementations.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use wsbundle::cli::{Cli, Commands};
use wsbundle::commands;

/// Log to stderr, honoring `RUST_LOG` when set
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "wsbundle=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Validate(args) => commands::validate::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
