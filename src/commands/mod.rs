//! Command implementations for wsbundle CLI

pub mod completions;
pub mod validate;
pub mod version;
