//! The deployment bundle: configuration plus the local directory it lives in

use std::path::{Path, PathBuf};

use normpath::PathExt;
use tracing::debug;

use crate::config::{IncludedConfig, Root, expand_includes};
use crate::error::{Result, config_not_found, io_error};

/// Configuration file names looked up at the bundle root, in order
pub const CONFIG_FILE_NAMES: &[&str] = &["bundle.yml", "bundle.yaml"];

/// A bundle being prepared for deployment
///
/// Owned by exactly one pipeline run; mutators change it in place.
#[derive(Debug, Clone)]
pub struct Bundle {
    /// Absolute path of the project directory
    pub local_root: PathBuf,

    pub config: Root,
}

impl Bundle {
    pub fn new(local_root: impl Into<PathBuf>, config: Root) -> Self {
        Self {
            local_root: local_root.into(),
            config,
        }
    }

    /// Remote directory that local files are deployed to
    pub fn remote_root(&self) -> Option<&str> {
        self.config.workspace.file_path.as_deref()
    }

    /// Find the configuration file at the root of `dir`
    pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Load a bundle from its root directory
    ///
    /// Reads `bundle.yml` and every file matched by its `include` patterns.
    pub fn load(dir: &Path) -> Result<Self> {
        let local_root = dir
            .normalize()
            .map_err(|e| io_error(dir.display().to_string(), e))?
            .into_path_buf();

        let config_path = Self::find_config_file(&local_root)
            .ok_or_else(|| config_not_found(local_root.display().to_string()))?;
        debug!(path = %config_path.display(), "Loading bundle configuration");

        let mut config = Root::load(&config_path)?;
        let config_name = config_path
            .strip_prefix(&local_root)
            .unwrap_or(&config_path)
            .to_path_buf();

        for relative in expand_includes(&local_root, &config.include, &config_name)? {
            let included = IncludedConfig::load(&local_root.join(&relative))?;
            config.resources.merge(included.resources)?;
        }

        Ok(Self::new(local_root, config))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::BundleError;
    use tempfile::TempDir;

    fn write(root: &Path, path: &str, content: &str) {
        let path = root.join(path);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();
        let result = Bundle::load(temp.path());
        assert!(matches!(result, Err(BundleError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_load_missing_directory() {
        let temp = TempDir::new().unwrap();
        let result = Bundle::load(&temp.path().join("nope"));
        assert!(matches!(result, Err(BundleError::Io { .. })));
    }

    #[test]
    fn test_load_accepts_yaml_extension() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "bundle.yaml", "bundle:\n  name: demo\n");
        let bundle = Bundle::load(temp.path()).unwrap();
        assert_eq!(bundle.config.bundle.name, "demo");
        assert!(bundle.local_root.is_absolute());
    }

    #[test]
    fn test_load_merges_includes() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "bundle.yml",
            "bundle:\n  name: demo\ninclude:\n  - resources/*.yml\n",
        );
        write(
            temp.path(),
            "resources/jobs.yml",
            "resources:\n  jobs:\n    etl:\n      tasks:\n        - notebook_task:\n            notebook_path: ./etl.py\n",
        );
        write(
            temp.path(),
            "resources/pipelines.yml",
            "resources:\n  pipelines:\n    dlt:\n      libraries:\n        - jar: foo\n",
        );

        let bundle = Bundle::load(temp.path()).unwrap();
        assert!(bundle.config.resources.jobs.contains_key("etl"));
        assert!(bundle.config.resources.pipelines.contains_key("dlt"));
    }

    #[test]
    fn test_load_rejects_duplicate_resources_across_files() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "bundle.yml",
            "bundle:\n  name: demo\ninclude:\n  - '*.jobs.yml'\nresources:\n  jobs:\n    etl: {}\n",
        );
        write(temp.path(), "more.jobs.yml", "resources:\n  jobs:\n    etl: {}\n");

        let err = Bundle::load(temp.path()).unwrap_err();
        assert_eq!(err.to_string(), "job etl is defined more than once");
    }

    #[test]
    fn test_remote_root() {
        let mut bundle = Bundle::new("/tmp/demo", Root::default());
        assert_eq!(bundle.remote_root(), None);
        bundle.config.workspace.file_path = Some("/bundle".to_string());
        assert_eq!(bundle.remote_root(), Some("/bundle"));
    }
}
