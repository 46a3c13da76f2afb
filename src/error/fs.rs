//! File system errors

use super::BundleError;

/// Creates an IO error that keeps the underlying cause
pub fn io_error(path: impl Into<String>, source: std::io::Error) -> BundleError {
    BundleError::Io {
        path: path.into(),
        source,
    }
}
