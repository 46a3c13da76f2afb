//! Environment definition and selection
//!
//! Selecting an environment folds its overrides into the root configuration
//! and drops the `environments` map, so later stages only see one effective
//! configuration.

use tracing::debug;

use crate::bundle::Bundle;
use crate::config::{Environment, Root};
use crate::error::{Result, config_invalid, environment_not_found};
use crate::mutator::Mutator;

/// Name of the environment defined when a bundle declares none
pub const DEFAULT_ENVIRONMENT: &str = "default";

/// Defines an empty default environment if the bundle has none
#[derive(Debug, Default)]
pub struct DefineDefaultEnvironment;

impl Mutator for DefineDefaultEnvironment {
    fn name(&self) -> &str {
        "DefineDefaultEnvironment"
    }

    fn apply(&self, bundle: &mut Bundle) -> Result<()> {
        let environments = &mut bundle.config.environments;
        if environments.is_empty() {
            environments.insert(
                DEFAULT_ENVIRONMENT.to_string(),
                Environment {
                    default: true,
                    ..Environment::default()
                },
            );
        }
        Ok(())
    }
}

/// Selects an environment by name
#[derive(Debug)]
pub struct SelectEnvironment {
    environment: String,
    label: String,
}

impl SelectEnvironment {
    pub fn new(environment: impl Into<String>) -> Self {
        let environment = environment.into();
        let label = format!("SelectEnvironment({environment})");
        Self { environment, label }
    }
}

impl Mutator for SelectEnvironment {
    fn name(&self) -> &str {
        &self.label
    }

    fn apply(&self, bundle: &mut Bundle) -> Result<()> {
        select(&mut bundle.config, &self.environment)
    }
}

/// Selects the environment marked `default`, or the only one declared
#[derive(Debug, Default)]
pub struct SelectDefaultEnvironment;

impl Mutator for SelectDefaultEnvironment {
    fn name(&self) -> &str {
        "SelectDefaultEnvironment"
    }

    fn apply(&self, bundle: &mut Bundle) -> Result<()> {
        let name = default_environment(&bundle.config)?;
        select(&mut bundle.config, &name)
    }
}

fn default_environment(root: &Root) -> Result<String> {
    let marked: Vec<&String> = root
        .environments
        .iter()
        .filter(|(_, env)| env.default)
        .map(|(name, _)| name)
        .collect();

    match marked.as_slice() {
        [name] => Ok((*name).clone()),
        [] => {
            let mut names = root.environments.keys();
            match (names.next(), names.next()) {
                (Some(only), None) => Ok(only.clone()),
                (None, _) => Err(config_invalid("no environments defined")),
                (Some(_), Some(_)) => Err(config_invalid(
                    "unable to select default environment: none is marked as default",
                )),
            }
        }
        _ => Err(config_invalid(format!(
            "multiple environments are marked as default: {}",
            marked
                .iter()
                .map(|name| name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ))),
    }
}

fn select(root: &mut Root, name: &str) -> Result<()> {
    if let Some(selected) = &root.environment {
        return Err(config_invalid(format!(
            "environment already selected: {selected}"
        )));
    }

    let environment = root
        .environments
        .get(name)
        .ok_or_else(|| environment_not_found(name))?;
    debug!(environment = name, "Selecting environment");

    // Nothing on `root` changes until the merge has succeeded.
    let mut workspace = root.workspace.clone();
    if let Some(overrides) = &environment.workspace {
        workspace.overlay(overrides);
    }
    let mut resources = root.resources.clone();
    if let Some(extra) = &environment.resources {
        resources.merge(extra.clone())?;
    }

    root.workspace = workspace;
    root.resources = resources;
    root.environment = Some(name.to_string());
    root.environments.clear();
    Ok(())
}
