//! Path resolution errors

use super::BundleError;
use crate::paths::ArtifactKind;

/// Creates a missing artifact error for the path as written in the configuration
pub fn not_found(kind: ArtifactKind, path: impl Into<String>) -> BundleError {
    BundleError::NotFound {
        kind,
        path: path.into(),
    }
}

/// Creates an error for a relative path that escapes the bundle root
pub fn outside_root(path: impl Into<String>) -> BundleError {
    BundleError::PathOutsideRoot { path: path.into() }
}
