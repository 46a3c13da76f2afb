//! Rewrite local file references into deployed artifact paths
//!
//! Walks every job task and every pipeline library. Notebook references are
//! resolved as notebooks, Python files as plain files; wheel, jar and other
//! references carry no local path and are left alone.
//!
//! Jobs are processed before pipelines, each in name order, and elements in
//! their declared order. The first unresolvable reference aborts the stage;
//! references rewritten before it stay rewritten.

use std::path::Path;

use tracing::{debug, trace};

use crate::bundle::Bundle;
use crate::config::{Library, Pipeline, Root, Task, TaskKind};
use crate::error::{Result, config_invalid};
use crate::mutator::Mutator;
use crate::paths::{ArtifactKind, PathResolver, is_workspace_absolute};

/// Mutator translating local paths to remote artifact paths
#[derive(Debug, Default)]
pub struct TranslatePaths;

impl TranslatePaths {
    pub fn new() -> Self {
        Self
    }
}

impl Mutator for TranslatePaths {
    fn name(&self) -> &str {
        "TranslatePaths"
    }

    fn apply(&self, bundle: &mut Bundle) -> Result<()> {
        let Bundle { local_root, config } = bundle;
        let local_root: &Path = local_root;
        let Root {
            workspace,
            resources,
            ..
        } = config;

        let mut translator = Translator {
            resolver: workspace
                .file_path
                .as_deref()
                .map(|remote_root| PathResolver::new(local_root, remote_root)),
        };

        for (name, job) in &mut resources.jobs {
            debug!(job = %name, tasks = job.tasks.len(), "Translating job paths");
            for task in &mut job.tasks {
                translator.translate_task(task)?;
            }
        }

        for (name, pipeline) in &mut resources.pipelines {
            debug!(
                pipeline = %name,
                libraries = pipeline.libraries.len(),
                "Translating pipeline paths"
            );
            translator.translate_pipeline(pipeline)?;
        }

        Ok(())
    }
}

struct Translator<'a> {
    /// `None` when the bundle has no remote file path
    resolver: Option<PathResolver<'a>>,
}

impl Translator<'_> {
    fn translate_task(&mut self, task: &mut Task) -> Result<()> {
        match &mut task.kind {
            TaskKind::NotebookTask(notebook) => {
                self.rewrite(&mut notebook.notebook_path, ArtifactKind::Notebook)
            }
            TaskKind::SparkPythonTask(spark) => {
                self.rewrite(&mut spark.python_file, ArtifactKind::File)
            }
            TaskKind::PythonWheelTask(_) | TaskKind::SparkJarTask(_) | TaskKind::PipelineTask(_) => {
                Ok(())
            }
        }
    }

    fn translate_pipeline(&mut self, pipeline: &mut Pipeline) -> Result<()> {
        for library in &mut pipeline.libraries {
            match library {
                Library::Notebook(notebook) => {
                    self.rewrite(&mut notebook.path, ArtifactKind::Notebook)?;
                }
                Library::File(file) => self.rewrite(&mut file.path, ArtifactKind::File)?,
                Library::Jar(_) => {}
            }
        }
        Ok(())
    }

    fn rewrite(&mut self, path: &mut String, kind: ArtifactKind) -> Result<()> {
        if is_workspace_absolute(path.as_str()) {
            trace!(path = %path, "Leaving workspace path as is");
            return Ok(());
        }

        let resolver = self
            .resolver
            .as_mut()
            .ok_or_else(|| config_invalid("workspace file path is not defined"))?;
        let remote = resolver.resolve(path.as_str(), kind)?;

        debug!(%kind, from = %path, to = %remote, "Translated path");
        *path = remote;
        Ok(())
    }
}
