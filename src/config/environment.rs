//! Named environments overriding the root configuration

use serde::{Deserialize, Serialize};

use crate::config::{Resources, Workspace};

/// One entry under `environments:` in bundle.yml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Environment {
    /// Selected when no environment is named explicitly
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub default: bool,

    /// Workspace fields that replace the root ones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<Workspace>,

    /// Resources added on top of the root ones
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Resources>,
}
