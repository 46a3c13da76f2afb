//! Configuration file handling
//!
//! This module contains data structures for:
//! - `bundle.yml` - Root bundle configuration
//! - files pulled in through `include` - Additional resource definitions

pub mod environment;
pub mod include;
pub mod resources;
pub mod root;
pub mod workspace;

// Re-export commonly used types
pub use environment::Environment;
pub use include::expand_includes;
pub use resources::{
    FileLibrary, Job, Library, NotebookLibrary, NotebookTask, Pipeline, PipelineTask,
    PythonWheelTask, Resources, SparkJarTask, SparkPythonTask, Task, TaskDependency, TaskKind,
};
pub use root::{BundleInfo, IncludedConfig, Root};
pub use workspace::Workspace;
