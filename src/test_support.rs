//! Test doubles for cefbuild unit tests.
//!
//! Only available under `cfg(test)`. Provides a scripted command runner
//! so pipeline behavior can be exercised without git, python, or a CEF
//! checkout on the host.

use crate::core::errors::BuildError;
use crate::util::process::{CommandRunner, ProcessBuilder, RunOutput};

/// Records every command it is asked to run. Optionally fails a stage,
/// or performs a scripted side effect per command so tests can model
/// external tools that create files.
#[derive(Default)]
pub struct FakeRunner {
    /// Display form of each command, in invocation order.
    pub calls: Vec<String>,
    fail_stage: Option<&'static str>,
    effect: Option<Box<dyn FnMut(&ProcessBuilder)>>,
}

impl FakeRunner {
    /// A runner that fails every command attributed to `stage`.
    pub fn fail_on(stage: &'static str) -> Self {
        FakeRunner {
            fail_stage: Some(stage),
            ..FakeRunner::default()
        }
    }

    /// A runner that invokes `effect` for every command before
    /// reporting success.
    pub fn with_effect(effect: impl FnMut(&ProcessBuilder) + 'static) -> Self {
        FakeRunner {
            effect: Some(Box::new(effect)),
            ..FakeRunner::default()
        }
    }
}

impl CommandRunner for FakeRunner {
    fn run(&mut self, cmd: &ProcessBuilder, stage: &'static str) -> Result<RunOutput, BuildError> {
        self.calls.push(cmd.display_command());

        if self.fail_stage == Some(stage) {
            return Err(BuildError::ExternalProcess {
                stage,
                command: cmd.display_command(),
                code: Some(1),
                stderr: "scripted failure".to_string(),
            });
        }

        if let Some(effect) = &mut self.effect {
            effect(cmd);
        }

        Ok(RunOutput::default())
    }
}
