//! Root bundle configuration (bundle.yml)

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::{Environment, Resources, Workspace};
use crate::error::{BundleError, Result, config_invalid, config_parse_failed, config_read_failed};

/// Bundle identity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BundleInfo {
    pub name: String,
}

/// Full bundle configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Root {
    #[serde(default)]
    pub bundle: BundleInfo,

    /// Glob patterns of additional configuration files, relative to the bundle root
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<String>,

    #[serde(default)]
    pub workspace: Workspace,

    #[serde(default)]
    pub resources: Resources,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub environments: BTreeMap<String, Environment>,

    /// Name of the selected environment
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

/// Configuration file pulled in through `include`
///
/// Included files only contribute resources.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IncludedConfig {
    #[serde(default)]
    pub resources: Resources,
}

impl Root {
    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let root: Self = serde_yaml::from_str(yaml)?;
        Ok(root)
    }

    /// Serialize configuration to a YAML string
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Serialize configuration to pretty printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let root: Self = load_yaml(path)?;
        root.validate()?;
        Ok(root)
    }

    /// Validate fields the loader requires
    pub fn validate(&self) -> Result<()> {
        if self.bundle.name.trim().is_empty() {
            return Err(config_invalid("bundle name is not defined"));
        }
        Ok(())
    }
}

impl IncludedConfig {
    pub fn load(path: &Path) -> Result<Self> {
        load_yaml(path)
    }
}

/// Read and parse a YAML file, attributing failures to its path
fn load_yaml<T>(path: &Path) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content = fs::read_to_string(path)
        .map_err(|e| config_read_failed(path.display().to_string(), e.to_string()))?;

    serde_yaml::from_str(&content).map_err(|e| match BundleError::from(e) {
        BundleError::ConfigParseFailed { reason, .. } => {
            config_parse_failed(path.display().to_string(), reason)
        }
        other => other,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const BUNDLE_YAML: &str = r"
bundle:
  name: demo

workspace:
  root: /Users/jane.doe@example.com/.bundle/demo

resources:
  jobs:
    etl:
      tasks:
        - notebook_task:
            notebook_path: ./etl.py

environments:
  dev:
    default: true
  prod:
    workspace:
      root: /Shared/demo
";

    #[test]
    fn test_from_yaml() {
        let root = Root::from_yaml(BUNDLE_YAML).unwrap();
        assert_eq!(root.bundle.name, "demo");
        assert_eq!(
            root.workspace.root.as_deref(),
            Some("/Users/jane.doe@example.com/.bundle/demo")
        );
        assert_eq!(root.resources.jobs["etl"].tasks.len(), 1);
        assert!(root.environments["dev"].default);
        assert_eq!(root.environment, None);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = Root::from_yaml("bundle:\n  name: demo\nartifacts: {}\n");
        assert!(matches!(
            result,
            Err(BundleError::ConfigParseFailed { .. })
        ));
    }

    #[test]
    fn test_environment_is_not_read_from_yaml() {
        let root = Root::from_yaml("bundle:\n  name: demo\n").unwrap();
        assert_eq!(root.environment, None);
    }

    #[test]
    fn test_validate_requires_name() {
        let root = Root::default();
        let err = root.validate().unwrap_err();
        assert_eq!(err.to_string(), "bundle name is not defined");
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bundle.yml");
        std::fs::write(&path, "bundle: [unclosed").unwrap();

        match Root::load(&path).unwrap_err() {
            BundleError::ConfigParseFailed { path: reported, .. } => {
                assert_eq!(reported, path.display().to_string());
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = Root::load(&temp.path().join("bundle.yml"));
        assert!(matches!(result, Err(BundleError::ConfigReadFailed { .. })));
    }

    #[test]
    fn test_yaml_round_trip_keeps_selected_environment() {
        let mut root = Root::from_yaml(BUNDLE_YAML).unwrap();
        root.environment = Some("dev".to_string());
        let yaml = root.to_yaml().unwrap();
        assert!(yaml.contains("environment: dev"));
    }

    #[test]
    fn test_included_config_only_has_resources() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("jobs.yml");
        std::fs::write(&path, "include:\n  - other.yml\n").unwrap();
        assert!(IncludedConfig::load(&path).is_err());
    }
}
