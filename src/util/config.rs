//! Pipeline configuration.
//!
//! An optional `cefbuild.toml` at the project root supplies defaults for
//! the sync and build operations; CLI flags override whatever is loaded
//! here. Every field has a default matching the historical behavior of
//! the build scripts, so the file is never required.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Name of the optional configuration file at the project root.
pub const CONFIG_FILE: &str = "cefbuild.toml";

/// Default CEF repository cloned by the sync operation.
pub const DEFAULT_CEF_URL: &str = "https://bitbucket.org/chromiumembedded/cef.git";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub build: BuildConfig,
}

/// Settings for the source sync operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    /// Remote CEF repository URL.
    #[serde(default = "default_url")]
    pub url: String,

    /// Branch or ref to clone.
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Fast-forward an existing checkout instead of rebuilding.
    #[serde(default = "default_true")]
    pub update: bool,

    /// Wipe an existing checkout and clone fresh.
    #[serde(default)]
    pub clean: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        SyncConfig {
            url: default_url(),
            branch: default_branch(),
            update: true,
            clean: false,
        }
    }
}

/// Settings for the native build operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Directory holding the CEF checkout and build outputs.
    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,

    /// Python interpreter used to drive the CEF build scripts.
    #[serde(default = "default_python")]
    pub python: String,

    /// The upstream automation script invoked for the native build.
    #[serde(default = "default_automate_script")]
    pub automate_script: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            build_dir: default_build_dir(),
            python: default_python(),
            automate_script: default_automate_script(),
        }
    }
}

fn default_url() -> String {
    DEFAULT_CEF_URL.to_string()
}

fn default_branch() -> String {
    "master".to_string()
}

fn default_true() -> bool {
    true
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("cef_build")
}

fn default_python() -> String {
    "python".to_string()
}

fn default_automate_script() -> String {
    "automate-git.py".to_string()
}

impl Config {
    /// Load `cefbuild.toml` from the given root, falling back to defaults
    /// when the file is absent.
    pub fn load(root: &Path) -> Result<Config> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_file_absent() {
        let tmp = TempDir::new().unwrap();
        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.sync.url, DEFAULT_CEF_URL);
        assert_eq!(config.sync.branch, "master");
        assert!(config.sync.update);
        assert!(!config.sync.clean);
        assert_eq!(config.build.build_dir, PathBuf::from("cef_build"));
    }

    #[test]
    fn test_partial_file_keeps_defaults_elsewhere() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(CONFIG_FILE),
            "[sync]\nbranch = \"3202\"\n\n[build]\nbuild_dir = \"out\"\n",
        )
        .unwrap();

        let config = Config::load(tmp.path()).unwrap();
        assert_eq!(config.sync.branch, "3202");
        assert_eq!(config.sync.url, DEFAULT_CEF_URL);
        assert_eq!(config.build.build_dir, PathBuf::from("out"));
        assert_eq!(config.build.python, "python");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(CONFIG_FILE), "[sync]\nbranhc = \"x\"\n").unwrap();
        assert!(Config::load(tmp.path()).is_err());
    }
}
