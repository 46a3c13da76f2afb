//! wsbundle - deployment bundle processor
//!
//! Loads a declarative description of workspace jobs and pipelines and prepares
//! it for deployment by rewriting references to local notebooks and files into
//! the workspace paths they are deployed to.
//!
//! The work happens in [`mutator`]: an ordered list of stages, each changing the
//! [`bundle::Bundle`] in place, the last of which is
//! [`mutator::TranslatePaths`].

pub mod bundle;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod mutator;
pub mod paths;

pub use bundle::Bundle;
pub use error::{BundleError, Result};
