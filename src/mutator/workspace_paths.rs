//! Derive workspace paths that were not configured explicitly

use tracing::debug;

use crate::bundle::Bundle;
use crate::error::Result;
use crate::mutator::Mutator;

/// Sets `file_path` and `artifact_path` below the workspace root when unset
///
/// Without a root there is nothing to derive from and the paths stay unset.
/// Stages that need them report the missing value themselves.
#[derive(Debug, Default)]
pub struct DefineDefaultWorkspacePaths;

impl Mutator for DefineDefaultWorkspacePaths {
    fn name(&self) -> &str {
        "DefineDefaultWorkspacePaths"
    }

    fn apply(&self, bundle: &mut Bundle) -> Result<()> {
        let workspace = &mut bundle.config.workspace;
        let Some(root) = workspace.root.as_deref() else {
            debug!("No workspace root, keeping workspace paths as configured");
            return Ok(());
        };
        let root = root.trim_end_matches('/');

        if workspace.file_path.is_none() {
            let file_path = format!("{root}/files");
            debug!(%file_path, "Defaulting workspace file path");
            workspace.file_path = Some(file_path);
        }
        if workspace.artifact_path.is_none() {
            let artifact_path = format!("{root}/artifacts");
            debug!(%artifact_path, "Defaulting workspace artifact path");
            workspace.artifact_path = Some(artifact_path);
        }
        Ok(())
    }
}
