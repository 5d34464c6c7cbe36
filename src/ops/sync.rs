//! Source synchronization (the FETCH_SOURCE stage).

use std::path::PathBuf;

use anyhow::Result;

use crate::util::config::Config;
use crate::util::fs::{ensure_dir, remove_dir_all_if_exists};
use crate::util::process::{CommandRunner, ProcessBuilder};

/// Stage name reported in external-process errors.
pub const STAGE: &str = "fetch-source";

/// Parameters of a sync run. CLI flags override the config file; both
/// funnel through here.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Directory holding the `cef/` checkout.
    pub build_dir: PathBuf,
    pub branch: String,
    pub url: String,
    /// Wipe any existing checkout and clone fresh.
    pub clean: bool,
    /// Fast-forward an existing checkout instead of re-cloning.
    pub update: bool,
}

impl SyncOptions {
    pub fn from_config(config: &Config) -> Self {
        SyncOptions {
            build_dir: config.build.build_dir.clone(),
            branch: config.sync.branch.clone(),
            url: config.sync.url.clone(),
            clean: config.sync.clean,
            update: config.sync.update,
        }
    }

    /// Path of the CEF checkout this sync manages.
    pub fn dest(&self) -> PathBuf {
        self.build_dir.join("cef")
    }
}

/// How the checkout was brought up to date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Fresh clone into an empty destination.
    Cloned,
    /// Existing checkout fast-forwarded with `git pull`. The pipeline
    /// treats this as a terminal "just sync, don't build" result.
    Updated,
    /// Existing checkout wiped and cloned again.
    Recloned,
    /// Existing checkout left untouched (neither clean nor update set).
    UpToDate,
}

/// Create or refresh the CEF checkout at `<build_dir>/cef`.
pub fn sync_source(opts: &SyncOptions, runner: &mut dyn CommandRunner) -> Result<SyncOutcome> {
    let dest = opts.dest();

    if dest.exists() {
        if opts.clean {
            remove_dir_all_if_exists(&dest)?;
            clone(opts, runner)?;
            return Ok(SyncOutcome::Recloned);
        }
        if opts.update {
            tracing::info!("updating {}", dest.display());
            runner.run(&ProcessBuilder::new("git").arg("pull").cwd(&dest), STAGE)?;
            return Ok(SyncOutcome::Updated);
        }
        return Ok(SyncOutcome::UpToDate);
    }

    clone(opts, runner)?;
    Ok(SyncOutcome::Cloned)
}

fn clone(opts: &SyncOptions, runner: &mut dyn CommandRunner) -> Result<()> {
    ensure_dir(&opts.build_dir)?;
    tracing::info!("cloning {} (branch {})", opts.url, opts.branch);

    let cmd = ProcessBuilder::new("git")
        .args(["clone", "--branch"])
        .arg(&opts.branch)
        .arg(&opts.url)
        .arg(opts.dest());
    runner.run(&cmd, STAGE)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeRunner;
    use std::fs;
    use tempfile::TempDir;

    fn opts(build_dir: &std::path::Path) -> SyncOptions {
        SyncOptions {
            build_dir: build_dir.to_path_buf(),
            branch: "master".into(),
            url: "https://example.invalid/cef.git".into(),
            clean: false,
            update: true,
        }
    }

    #[test]
    fn test_fresh_destination_clones() {
        let tmp = TempDir::new().unwrap();
        let mut runner = FakeRunner::default();

        let outcome = sync_source(&opts(tmp.path()), &mut runner).unwrap();

        assert_eq!(outcome, SyncOutcome::Cloned);
        assert_eq!(runner.calls.len(), 1);
        assert!(runner.calls[0].starts_with("git clone --branch master"));
    }

    #[test]
    fn test_existing_destination_pulls_when_update_set() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("cef")).unwrap();
        let mut runner = FakeRunner::default();

        let outcome = sync_source(&opts(tmp.path()), &mut runner).unwrap();

        assert_eq!(outcome, SyncOutcome::Updated);
        assert_eq!(runner.calls, vec!["git pull".to_string()]);
    }

    #[test]
    fn test_clean_wipes_and_reclones() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("cef");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("stale"), "x").unwrap();

        let mut options = opts(tmp.path());
        options.clean = true;
        let mut runner = FakeRunner::default();

        let outcome = sync_source(&options, &mut runner).unwrap();

        assert_eq!(outcome, SyncOutcome::Recloned);
        assert!(!dest.join("stale").exists());
        assert!(runner.calls[0].starts_with("git clone"));
    }

    #[test]
    fn test_existing_destination_untouched_when_no_flags() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("cef")).unwrap();

        let mut options = opts(tmp.path());
        options.update = false;
        let mut runner = FakeRunner::default();

        let outcome = sync_source(&options, &mut runner).unwrap();

        assert_eq!(outcome, SyncOutcome::UpToDate);
        assert!(runner.calls.is_empty());
    }
}
