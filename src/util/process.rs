//! Subprocess execution utilities.
//!
//! The pipeline never models external tools; it only launches them and
//! inspects their exit status. [`CommandRunner`] is the seam between the
//! orchestration logic and the real system, so pipeline behavior is
//! testable without git or a CEF checkout present.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::core::errors::BuildError;

/// Builder for subprocess invocations.
#[derive(Debug, Clone)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
}

impl ProcessBuilder {
    /// Create a new process builder for the given program.
    pub fn new(program: impl AsRef<Path>) -> Self {
        ProcessBuilder {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Add a single argument.
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(
            args.into_iter()
                .map(|s| s.as_ref().to_string_lossy().into_owned()),
        );
        self
    }

    /// Set the working directory.
    pub fn cwd(mut self, cwd: impl AsRef<Path>) -> Self {
        self.cwd = Some(cwd.as_ref().to_path_buf());
        self
    }

    /// Display the command for logs and error messages.
    pub fn display_command(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }
        cmd
    }
}

/// Captured output of a completed external process.
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Executes external processes on behalf of the pipeline.
///
/// Implementations must report a non-zero exit (or a spawn failure) as
/// [`BuildError::ExternalProcess`] carrying the pipeline stage name.
pub trait CommandRunner {
    fn run(&mut self, cmd: &ProcessBuilder, stage: &'static str) -> Result<RunOutput, BuildError>;
}

/// The real runner: spawns the process, streams nothing, waits for exit.
#[derive(Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, cmd: &ProcessBuilder, stage: &'static str) -> Result<RunOutput, BuildError> {
        tracing::debug!("running `{}`", cmd.display_command());

        let output = cmd
            .build_command()
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|err| BuildError::ExternalProcess {
                stage,
                command: cmd.display_command(),
                code: None,
                stderr: err.to_string(),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        if !output.status.success() {
            return Err(BuildError::ExternalProcess {
                stage,
                command: cmd.display_command(),
                code: output.status.code(),
                stderr,
            });
        }

        Ok(RunOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr,
        })
    }
}

/// Find an executable in PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}
