//! Version command implementation

use crate::bundle::CONFIG_FILE_NAMES;
use crate::error::Result;
use crate::mutator;

pub fn run() -> Result<()> {
    println!("{}", version_text());
    Ok(())
}

/// Version plus what a `validate` run will look for and apply
fn version_text() -> String {
    let stages: Vec<String> = mutator::default_mutators(None)
        .iter()
        .map(|m| m.name().to_string())
        .collect();
    let profile = if cfg!(debug_assertions) { "debug" } else { "release" };

    format!(
        "wsbundle {} ({profile})\n\nConfiguration files: {}\nDefault mutators: {}",
        env!("CARGO_PKG_VERSION"),
        CONFIG_FILE_NAMES.join(", "),
        stages.join(" -> ")
    )
}
