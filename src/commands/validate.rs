//! Validate command implementation
//!
//! Loads the bundle, runs the default mutators and prints the resulting
//! configuration. The configuration goes to stdout, the summary to stderr.

use std::path::{Path, PathBuf};

use console::Style;
use tracing::info;

use crate::bundle::Bundle;
use crate::cli::{OutputFormat, ValidateArgs};
use crate::error::{Result, io_error};
use crate::mutator;

pub fn run(args: ValidateArgs) -> Result<()> {
    let root = resolve_bundle_path(args.path)?;
    let bundle = prepare(&root, args.environment.as_deref())?;

    let rendered = match args.output {
        OutputFormat::Yaml => bundle.config.to_yaml()?,
        OutputFormat::Json => bundle.config.to_json()?,
    };
    println!("{}", rendered.trim_end());

    let green = Style::new().green().bold();
    eprintln!(
        "{} bundle '{}' (environment: {})",
        green.apply_to("Validated"),
        bundle.config.bundle.name,
        bundle.config.environment.as_deref().unwrap_or("-")
    );
    Ok(())
}

/// Load the bundle at `root` and run the default mutators on it
pub fn prepare(root: &Path, environment: Option<&str>) -> Result<Bundle> {
    let mut bundle = Bundle::load(root)?;
    info!(
        bundle = %bundle.config.bundle.name,
        root = %bundle.local_root.display(),
        "Loaded bundle"
    );

    mutator::apply(&mut bundle, &mutator::default_mutators(environment))?;
    Ok(bundle)
}

/// Use the given path, or the current directory when none is given
fn resolve_bundle_path(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => std::env::current_dir().map_err(|e| io_error("current directory", e)),
    }
}
