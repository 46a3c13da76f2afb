//! Expansion of `include` glob patterns
//!
//! Patterns are matched against bundle-relative paths with forward slashes, so
//! `resources/*.yml` behaves the same on every platform.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use crate::error::{Result, glob_invalid, io_error};
use crate::paths::to_forward_slashes;

/// Resolve include patterns to the files they match
///
/// Returns bundle-relative paths, sorted and without duplicates. `exclude` is
/// never returned, so a pattern matching the root configuration file does not
/// include it twice. Directories that cannot be walked fail the expansion
/// instead of being skipped.
pub fn expand_includes(
    local_root: &Path,
    patterns: &[String],
    exclude: &Path,
) -> Result<Vec<PathBuf>> {
    if patterns.is_empty() {
        return Ok(Vec::new());
    }

    let globs = patterns
        .iter()
        .map(|pattern| {
            let pattern = pattern.trim_start_matches("./");
            Glob::new(pattern).map_err(|e| glob_invalid(pattern, e.to_string()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut matched = BTreeSet::new();
    for entry in WalkDir::new(local_root).follow_links(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(local_root).display().to_string();
            io_error(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(relative) = entry.path().strip_prefix(local_root) else {
            continue;
        };
        if relative == exclude {
            continue;
        }

        let relative_str = to_forward_slashes(relative);
        let candidate = CandidatePath::from(relative_str.as_str());
        if globs.iter().any(|glob| glob.matched(&candidate).is_some()) {
            debug!(path = %relative_str, "Including configuration file");
            matched.insert(relative.to_path_buf());
        }
    }

    Ok(matched.into_iter().collect())
}
