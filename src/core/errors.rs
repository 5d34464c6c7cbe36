//! Build error taxonomy.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by version reading, artifact resolution, and the
/// build pipeline. All of these abort the current operation; none are
/// retried automatically.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A required input file is missing or unreadable.
    #[error("cannot read required file: {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Required version keys absent from a parsed header. Lists every
    /// missing key so the operator can fix the file once.
    #[error("missing required keys in {}: {}", path.display(), keys.join(", "))]
    MissingKeys { path: PathBuf, keys: Vec<String> },

    /// A required artifact directory is absent after exhausting all
    /// naming probes.
    #[error("CEF binaries not found; searched: {}", display_paths(searched))]
    ArtifactNotFound { searched: Vec<PathBuf> },

    /// An invoked external tool exited non-zero (or could not be spawned).
    #[error("`{command}` failed during {stage} (exit code {code:?})\n{stderr}")]
    ExternalProcess {
        stage: &'static str,
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The host OS is not one of the recognized families. Raised when a
    /// real path is needed, never at descriptor creation.
    #[error("unsupported platform: {os}")]
    UnsupportedPlatform { os: String },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
