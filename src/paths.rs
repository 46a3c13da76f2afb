//! Path resolution for local file references
//!
//! A path in a bundle configuration is either:
//! - workspace-absolute: it starts with `/` and already names a location in the
//!   remote workspace, so it is passed through untouched;
//! - project-relative: anything else (`./nb.py`, `nb.py`, `src/nb.py`). It is
//!   resolved against the bundle root, must name an existing file, and is
//!   rewritten to its deployed artifact path under the remote root.
//!
//! Resolution never consults the process working directory; the bundle root is
//! always passed in explicitly.

use std::collections::HashMap;
use std::fmt;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Result, artifact_not_found, io_error, path_outside_root};

/// Kind of artifact a local file is deployed as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Notebooks are imported without their file extension
    Notebook,
    /// Plain files keep their name as is
    File,
}

impl ArtifactKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ArtifactKind::Notebook => "notebook",
            ArtifactKind::File => "file",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether a path is already expressed in the workspace namespace
///
/// Workspace paths are always slash separated and rooted, so a leading `/` is
/// the whole test. Paths without a leading `./` are still project-relative.
pub fn is_workspace_absolute(path: &str) -> bool {
    path.starts_with('/')
}

/// Convert a path to a string with forward slashes
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use wsbundle::paths::to_forward_slashes;
///
/// assert_eq!(to_forward_slashes(Path::new("src/nb.py")), "src/nb.py");
/// ```
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Lexically normalize a project-relative path
///
/// Drops `.` components and applies `..`. Returns `None` when the path climbs
/// above the bundle root or carries a root or drive prefix of its own.
pub fn normalize_relative(raw: &str) -> Option<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in Path::new(raw).components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    return None;
                }
            }
            Component::Normal(part) => normalized.push(part),
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(normalized)
}

/// Build the remote artifact path for a root-relative local path
///
/// Artifacts land directly under the remote root by file name. Notebooks lose
/// the extension of their file name; files keep it.
pub fn remote_path(remote_root: &str, relative: &Path, kind: ArtifactKind) -> String {
    let name = match kind {
        ArtifactKind::Notebook => relative.file_stem(),
        ArtifactKind::File => relative.file_name(),
    };
    format!(
        "{}/{}",
        remote_root.trim_end_matches('/'),
        name.map(|n| n.to_string_lossy()).unwrap_or_default()
    )
}

/// Verify that a regular file exists at `local_path`
///
/// Only a missing entry is reported as not found; any other failure keeps its
/// I/O cause.
fn ensure_file(local_path: &Path, raw_path: &str, kind: ArtifactKind) -> Result<()> {
    match std::fs::metadata(local_path) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(artifact_not_found(kind, raw_path)),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            Err(artifact_not_found(kind, raw_path))
        }
        Err(e) => Err(io_error(local_path.display().to_string(), e)),
    }
}

/// Resolve a single path reference to its remote location
///
/// Workspace-absolute paths come back unchanged without touching the file
/// system. Relative paths must exist under `local_root`.
///
/// # Errors
///
/// - `NotFound` when the referenced file does not exist
/// - `PathOutsideRoot` when the path escapes `local_root`
/// - `Io` for any other file system failure
pub fn resolve(
    local_root: &Path,
    remote_root: &str,
    raw_path: &str,
    kind: ArtifactKind,
) -> Result<String> {
    if is_workspace_absolute(raw_path) {
        return Ok(raw_path.to_string());
    }

    let relative = normalize_relative(raw_path).ok_or_else(|| path_outside_root(raw_path))?;
    ensure_file(&local_root.join(&relative), raw_path, kind)?;
    Ok(remote_path(remote_root, &relative, kind))
}

/// Resolver that remembers what it has already resolved
///
/// The same local file referenced twice translates to the same remote path and
/// is only checked on disk once.
pub struct PathResolver<'a> {
    local_root: &'a Path,
    remote_root: &'a str,
    seen: HashMap<(ArtifactKind, PathBuf), String>,
}

impl<'a> PathResolver<'a> {
    pub fn new(local_root: &'a Path, remote_root: &'a str) -> Self {
        Self {
            local_root,
            remote_root,
            seen: HashMap::new(),
        }
    }

    /// Resolve `raw_path`, reusing an earlier result for the same local file
    pub fn resolve(&mut self, raw_path: &str, kind: ArtifactKind) -> Result<String> {
        if is_workspace_absolute(raw_path) {
            trace!(path = raw_path, "Leaving workspace path as is");
            return Ok(raw_path.to_string());
        }

        let relative = normalize_relative(raw_path).ok_or_else(|| path_outside_root(raw_path))?;
        let key = (kind, relative);
        if let Some(remote) = self.seen.get(&key) {
            return Ok(remote.clone());
        }

        ensure_file(&self.local_root.join(&key.1), raw_path, kind)?;
        let remote = remote_path(self.remote_root, &key.1, kind);
        self.seen.insert(key, remote.clone());
        Ok(remote)
    }
}
