//! Remote workspace settings
//!
//! `file_path` is the remote root that local file references are translated
//! into. `root` is the base from which default paths are derived.

use serde::{Deserialize, Serialize};

/// Workspace section of bundle.yml
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Workspace {
    /// Workspace host URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Base directory of the deployed bundle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    /// Where bundle files are deployed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    /// Where built artifacts are deployed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifact_path: Option<String>,
}

impl Workspace {
    /// Workspace whose files are deployed to `file_path`
    pub fn with_file_path(file_path: impl Into<String>) -> Self {
        Self {
            file_path: Some(file_path.into()),
            ..Self::default()
        }
    }

    /// Copy every field set in `other` over this workspace
    pub fn overlay(&mut self, other: &Workspace) {
        fn take(target: &mut Option<String>, value: &Option<String>) {
            if value.is_some() {
                target.clone_from(value);
            }
        }

        take(&mut self.host, &other.host);
        take(&mut self.root, &other.root);
        take(&mut self.file_path, &other.file_path);
        take(&mut self.artifact_path, &other.artifact_path);
    }
}
