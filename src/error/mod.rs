//! Error types and handling for wsbundle
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`paths`]: Path resolution errors
//! - [`config`]: Configuration errors
//! - [`fs`]: File system errors

pub mod config;
pub mod fs;
pub mod paths;

pub use config::{
    environment_not_found, glob_invalid, invalid as config_invalid, not_found as config_not_found,
    parse_failed as config_parse_failed, read_failed as config_read_failed,
};
pub use fs::io_error;
pub use paths::{not_found as artifact_not_found, outside_root as path_outside_root};

use miette::Diagnostic;
use thiserror::Error;

use crate::paths::ArtifactKind;

/// Main error type for bundle operations
#[derive(Error, Diagnostic, Debug)]
pub enum BundleError {
    // Path resolution errors
    #[error("{kind} {path} not found")]
    #[diagnostic(
        code(wsbundle::paths::not_found),
        help("Relative paths are resolved against the bundle root directory")
    )]
    NotFound { kind: ArtifactKind, path: String },

    #[error("path {path} is not contained in bundle root path")]
    #[diagnostic(
        code(wsbundle::paths::outside_root),
        help("Move the file into the bundle directory or reference it by its workspace path")
    )]
    PathOutsideRoot { path: String },

    // File system errors
    #[error("Failed to access {path}")]
    #[diagnostic(code(wsbundle::fs::io_error))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // Configuration errors
    #[error("Configuration file not found in {path}")]
    #[diagnostic(
        code(wsbundle::config::not_found),
        help("Create a bundle.yml file at the root of the bundle")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file {path}: {reason}")]
    #[diagnostic(code(wsbundle::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file {path}: {reason}")]
    #[diagnostic(code(wsbundle::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("{message}")]
    #[diagnostic(code(wsbundle::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Invalid include pattern '{pattern}': {reason}")]
    #[diagnostic(code(wsbundle::config::glob_invalid))]
    GlobInvalid { pattern: String, reason: String },

    #[error("no such environment: {name}")]
    #[diagnostic(
        code(wsbundle::config::environment_not_found),
        help("Environments are declared under the 'environments' key of bundle.yml")
    )]
    EnvironmentNotFound { name: String },
}

impl From<serde_yaml::Error> for BundleError {
    fn from(err: serde_yaml::Error) -> Self {
        BundleError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for BundleError {
    fn from(err: serde_json::Error) -> Self {
        BundleError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, BundleError>;

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_error_contains {
        ($test_name:ident, $err:expr, $($contains:expr),+ $(,)?) => {
            #[test]
            fn $test_name() {
                let err = $err;
                let error_string = err.to_string();
                $(
                    assert!(error_string.contains($contains),
                        "Error message should contain '{}', got: {}",
                        $contains,
                        error_string
                    );
                )+
            }
        };
    }

    #[test]
    fn test_notebook_not_found_display() {
        let err = artifact_not_found(ArtifactKind::Notebook, "./doesnt_exist.py");
        assert_eq!(err.to_string(), "notebook ./doesnt_exist.py not found");
    }

    #[test]
    fn test_file_not_found_display() {
        let err = artifact_not_found(ArtifactKind::File, "./doesnt_exist.py");
        assert_eq!(err.to_string(), "file ./doesnt_exist.py not found");
    }

    #[test]
    fn test_error_code() {
        let err = artifact_not_found(ArtifactKind::File, "x");
        assert_eq!(
            err.code().map(|c| c.to_string()),
            Some("wsbundle::paths::not_found".to_string())
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = io_error("/tmp/x", io_err);
        let source = std::error::Error::source(&err).map(ToString::to_string);
        assert_eq!(source.as_deref(), Some("denied"));
    }

    test_error_contains!(
        test_path_outside_root_error,
        path_outside_root("../x.py"),
        "../x.py",
        "not contained in bundle root path"
    );

    test_error_contains!(
        test_environment_not_found_error,
        environment_not_found("prod"),
        "no such environment: prod"
    );

    test_error_contains!(
        test_config_not_found_error,
        config_not_found("/path/to/bundle"),
        "Configuration file not found"
    );

    test_error_contains!(
        test_glob_invalid_error,
        glob_invalid("[", "unclosed"),
        "Invalid include pattern '['"
    );

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: yaml: content: [unclosed";
        let parse_result: std::result::Result<serde_yaml::Value, _> =
            serde_yaml::from_str(yaml_str);
        let yaml_err = parse_result.unwrap_err();
        let err: BundleError = yaml_err.into();
        assert!(matches!(err, BundleError::ConfigParseFailed { .. }));
    }

    #[test]
    fn test_config_constructors() {
        assert!(matches!(
            config_read_failed("/a/bundle.yml", "denied"),
            BundleError::ConfigReadFailed { .. }
        ));
        assert!(matches!(
            config_parse_failed("/a/bundle.yml", "bad"),
            BundleError::ConfigParseFailed { .. }
        ));
        assert_eq!(config_invalid("boom").to_string(), "boom");
    }
}
