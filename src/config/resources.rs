//! Resource definitions: jobs with tasks, pipelines with libraries
//!
//! Tasks and libraries are closed enums. In YAML each variant is written as a
//! single key naming it:
//!
//! ```yaml
//! tasks:
//!   - task_key: ingest
//!     notebook_task:
//!       notebook_path: ./ingest.py
//! libraries:
//!   - notebook:
//!       path: ./transform.py
//!   - jar: dbfs:/jars/udf.jar
//! ```

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize};

use crate::error::{Result, config_invalid};

/// All resources declared by a bundle, keyed by resource name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Resources {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub jobs: BTreeMap<String, Job>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pipelines: BTreeMap<String, Pipeline>,
}

impl Resources {
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty() && self.pipelines.is_empty()
    }

    /// Move all resources of `other` into `self`
    ///
    /// Resource names are unique per kind across the whole bundle.
    pub fn merge(&mut self, other: Resources) -> Result<()> {
        merge_named(&mut self.jobs, other.jobs, "job")?;
        merge_named(&mut self.pipelines, other.pipelines, "pipeline")
    }
}

fn merge_named<T>(
    target: &mut BTreeMap<String, T>,
    source: BTreeMap<String, T>,
    kind: &str,
) -> Result<()> {
    for (name, resource) in source {
        match target.entry(name) {
            Entry::Occupied(entry) => {
                return Err(config_invalid(format!(
                    "{} {} is defined more than once",
                    kind,
                    entry.key()
                )));
            }
            Entry::Vacant(entry) => {
                entry.insert(resource);
            }
        }
    }
    Ok(())
}

/// A job: an ordered list of tasks
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Job {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// A single job task
///
/// Parsed through [`TaskDocument`] so that exactly one variant key is accepted
/// and unknown keys are rejected, which `flatten` alone does not do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TaskDocument")]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_key: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<TaskDependency>,

    #[serde(flatten)]
    pub kind: TaskKind,
}

/// Task as written in YAML, with every variant key optional
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TaskDocument {
    #[serde(default)]
    task_key: Option<String>,
    #[serde(default)]
    depends_on: Vec<TaskDependency>,
    #[serde(default)]
    notebook_task: Option<NotebookTask>,
    #[serde(default)]
    python_wheel_task: Option<PythonWheelTask>,
    #[serde(default)]
    spark_python_task: Option<SparkPythonTask>,
    #[serde(default)]
    spark_jar_task: Option<SparkJarTask>,
    #[serde(default)]
    pipeline_task: Option<PipelineTask>,
}

const TASK_VARIANTS: &str =
    "notebook_task, python_wheel_task, spark_python_task, spark_jar_task, pipeline_task";

impl TryFrom<TaskDocument> for Task {
    type Error = String;

    fn try_from(doc: TaskDocument) -> std::result::Result<Self, Self::Error> {
        let kinds: Vec<TaskKind> = [
            doc.notebook_task.map(TaskKind::NotebookTask),
            doc.python_wheel_task.map(TaskKind::PythonWheelTask),
            doc.spark_python_task.map(TaskKind::SparkPythonTask),
            doc.spark_jar_task.map(TaskKind::SparkJarTask),
            doc.pipeline_task.map(TaskKind::PipelineTask),
        ]
        .into_iter()
        .flatten()
        .collect();

        let label = doc.task_key.as_deref().unwrap_or("<unnamed>");
        let mut kinds = kinds.into_iter();
        match (kinds.next(), kinds.next()) {
            (Some(kind), None) => Ok(Task {
                task_key: doc.task_key,
                depends_on: doc.depends_on,
                kind,
            }),
            (None, _) => Err(format!("task {label} must define one of {TASK_VARIANTS}")),
            (Some(_), Some(_)) => Err(format!(
                "task {label} defines more than one of {TASK_VARIANTS}"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskDependency {
    pub task_key: String,
}

/// What a task runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    NotebookTask(NotebookTask),
    PythonWheelTask(PythonWheelTask),
    SparkPythonTask(SparkPythonTask),
    SparkJarTask(SparkJarTask),
    PipelineTask(PipelineTask),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotebookTask {
    pub notebook_path: String,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub base_parameters: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PythonWheelTask {
    pub package_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SparkPythonTask {
    pub python_file: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SparkJarTask {
    pub main_class_name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PipelineTask {
    pub pipeline_id: String,
}

impl Task {
    pub fn new(kind: TaskKind) -> Self {
        Self {
            task_key: None,
            depends_on: Vec::new(),
            kind,
        }
    }

    pub fn notebook(notebook_path: impl Into<String>) -> Self {
        Self::new(TaskKind::NotebookTask(NotebookTask {
            notebook_path: notebook_path.into(),
            base_parameters: BTreeMap::new(),
        }))
    }

    pub fn python_wheel(package_name: impl Into<String>) -> Self {
        Self::new(TaskKind::PythonWheelTask(PythonWheelTask {
            package_name: package_name.into(),
            entry_point: None,
            parameters: Vec::new(),
        }))
    }

    pub fn spark_python(python_file: impl Into<String>) -> Self {
        Self::new(TaskKind::SparkPythonTask(SparkPythonTask {
            python_file: python_file.into(),
            parameters: Vec::new(),
        }))
    }

    pub fn with_key(mut self, task_key: impl Into<String>) -> Self {
        self.task_key = Some(task_key.into());
        self
    }
}

/// A pipeline: an ordered list of libraries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pipeline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub libraries: Vec<Library>,
}

/// A pipeline library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Library {
    Notebook(NotebookLibrary),
    Jar(String),
    File(FileLibrary),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotebookLibrary {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileLibrary {
    pub path: String,
}

impl Library {
    pub fn notebook(path: impl Into<String>) -> Self {
        Library::Notebook(NotebookLibrary { path: path.into() })
    }

    pub fn file(path: impl Into<String>) -> Self {
        Library::File(FileLibrary { path: path.into() })
    }

    pub fn jar(name: impl Into<String>) -> Self {
        Library::Jar(name.into())
    }
}
