//! Project directory layout.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::platform::PlatformDescriptor;

/// Well-known directories of a cefpython source tree, anchored at its
/// root. Purely path arithmetic; nothing here checks existence.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    root: PathBuf,
}

impl ProjectContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ProjectContext { root: root.into() }
    }

    /// Anchor at the current working directory.
    pub fn current() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to determine current directory")?;
        Ok(ProjectContext::new(cwd))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn src_dir(&self) -> PathBuf {
        self.root.join("src")
    }

    pub fn build_dir(&self) -> PathBuf {
        self.root.join("build")
    }

    pub fn examples_dir(&self) -> PathBuf {
        self.root.join("examples")
    }

    pub fn snippets_dir(&self) -> PathBuf {
        self.root.join("snippets")
    }

    /// Per-platform version declaration header,
    /// e.g. `src/version/cef_version_linux.h`.
    pub fn version_header(&self, desc: &PlatformDescriptor) -> PathBuf {
        self.src_dir()
            .join("version")
            .join(format!("cef_version_{}.h", desc.local_postfix()))
    }
}
