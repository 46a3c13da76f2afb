//! Mutators: named transformation stages applied to a bundle
//!
//! This module handles:
//! - The [`Mutator`] trait every stage implements
//! - Running an ordered list of stages, stopping at the first error
//! - The default stage list run before deployment
//!
//! A stage never decides whether a later stage runs. Anything conditional
//! happens inside the stage itself.

pub mod environment;
pub mod translate_paths;
pub mod workspace_paths;

pub use environment::{DefineDefaultEnvironment, SelectDefaultEnvironment, SelectEnvironment};
pub use translate_paths::TranslatePaths;
pub use workspace_paths::DefineDefaultWorkspacePaths;

use tracing::{debug, debug_span};

use crate::bundle::Bundle;
use crate::error::Result;

/// A single transformation stage
pub trait Mutator {
    /// Name used in logs and diagnostics
    fn name(&self) -> &str;

    /// Transform the bundle in place
    fn apply(&self, bundle: &mut Bundle) -> Result<()>;
}

/// Run `mutators` in order against `bundle`
///
/// Stops at the first failing stage and returns its error unchanged. Stages
/// that already ran keep their changes.
pub fn apply(bundle: &mut Bundle, mutators: &[Box<dyn Mutator>]) -> Result<()> {
    for mutator in mutators {
        let span = debug_span!("mutator", name = mutator.name());
        let _guard = span.enter();

        debug!("Apply");
        if let Err(e) = mutator.apply(bundle) {
            debug!(error = %e, "Apply failed");
            return Err(e);
        }
        debug!("Apply done");
    }
    Ok(())
}

/// Several mutators run as one stage
pub struct Seq {
    name: String,
    mutators: Vec<Box<dyn Mutator>>,
}

impl Seq {
    pub fn new(name: impl Into<String>, mutators: Vec<Box<dyn Mutator>>) -> Self {
        Self {
            name: name.into(),
            mutators,
        }
    }
}

impl Mutator for Seq {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, bundle: &mut Bundle) -> Result<()> {
        apply(bundle, &self.mutators)
    }
}

/// Stages run on a freshly loaded bundle, in order
///
/// With `environment` unset the default environment is selected.
pub fn default_mutators(environment: Option<&str>) -> Vec<Box<dyn Mutator>> {
    let select: Box<dyn Mutator> = match environment {
        Some(name) => Box::new(SelectEnvironment::new(name)),
        None => Box::new(SelectDefaultEnvironment),
    };

    vec![
        Box::new(DefineDefaultEnvironment),
        select,
        Box::new(DefineDefaultWorkspacePaths),
        Box::new(TranslatePaths::new()),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::Root;
    use crate::error::config_invalid;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records its name into a shared log, optionally failing
    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
        fail: bool,
    }

    impl Recorder {
        fn boxed(
            name: &'static str,
            log: &Rc<RefCell<Vec<&'static str>>>,
            fail: bool,
        ) -> Box<dyn Mutator> {
            Box::new(Self {
                name,
                log: Rc::clone(log),
                fail,
            })
        }
    }

    impl Mutator for Recorder {
        fn name(&self) -> &str {
            self.name
        }

        fn apply(&self, bundle: &mut Bundle) -> Result<()> {
            self.log.borrow_mut().push(self.name);
            bundle.config.bundle.name.push_str(self.name);
            if self.fail {
                return Err(config_invalid(format!("{} failed", self.name)));
            }
            Ok(())
        }
    }

    fn bundle() -> Bundle {
        Bundle::new("/tmp/demo", Root::default())
    }

    #[test]
    fn test_apply_runs_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mutators = vec![
            Recorder::boxed("a", &log, false),
            Recorder::boxed("b", &log, false),
            Recorder::boxed("c", &log, false),
        ];

        let mut bundle = bundle();
        apply(&mut bundle, &mutators).unwrap();

        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(bundle.config.bundle.name, "abc");
    }

    #[test]
    fn test_apply_stops_at_first_error() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mutators = vec![
            Recorder::boxed("a", &log, false),
            Recorder::boxed("b", &log, true),
            Recorder::boxed("c", &log, true),
        ];

        let mut bundle = bundle();
        let err = apply(&mut bundle, &mutators).unwrap_err();

        assert_eq!(err.to_string(), "b failed");
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert_eq!(bundle.config.bundle.name, "ab");
    }

    #[test]
    fn test_apply_empty_list() {
        let mut bundle = bundle();
        apply(&mut bundle, &[]).unwrap();
        assert_eq!(bundle.config, Root::default());
    }

    #[test]
    fn test_seq_runs_nested_mutators() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mutators: Vec<Box<dyn Mutator>> = vec![
            Box::new(Seq::new(
                "inner",
                vec![
                    Recorder::boxed("a", &log, false),
                    Recorder::boxed("b", &log, false),
                ],
            )),
            Recorder::boxed("c", &log, false),
        ];

        let mut bundle = bundle();
        apply(&mut bundle, &mutators).unwrap();
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
        assert_eq!(mutators[0].name(), "inner");
    }

    #[test]
    fn test_default_mutator_order() {
        let names: Vec<String> = default_mutators(Some("prod"))
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(
            names,
            vec![
                "DefineDefaultEnvironment",
                "SelectEnvironment(prod)",
                "DefineDefaultWorkspacePaths",
                "TranslatePaths",
            ]
        );

        let names: Vec<String> = default_mutators(None)
            .iter()
            .map(|m| m.name().to_string())
            .collect();
        assert_eq!(names[1], "SelectDefaultEnvironment");
    }
}
