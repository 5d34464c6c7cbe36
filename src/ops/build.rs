//! The build pipeline orchestrator.
//!
//! Stages run strictly in order: FETCH_SOURCE → BUILD_NATIVE →
//! DETECT_ARTIFACTS → PACKAGE. Two early exits are deliberate terminal
//! successes, not failures: an update-only sync ([`PipelineOutcome::Synced`])
//! and the 32-bit cross-build stop ([`PipelineOutcome::SourceDistribOnly`]).
//! Any external tool exiting non-zero aborts the current stage; nothing is
//! retried automatically.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::core::errors::BuildError;
use crate::core::layout::{
    self, distribution_directory, locate_upstream_binaries, locate_wrapper_binary, WrapperBinary,
};
use crate::core::platform::{PlatformDescriptor, PointerWidth};
use crate::core::version::LibraryVersion;
use crate::ops::sync::{sync_source, SyncOptions, SyncOutcome};
use crate::util::config::BuildConfig;
use crate::util::context::ProjectContext;
use crate::util::fs::{copy_dir_all, ensure_dir, remove_dir_all_if_exists};
use crate::util::process::{CommandRunner, ProcessBuilder};

/// Subdirectory of the CEF build dir where the upstream automation
/// deposits the binary distribution.
const BINARY_DISTRIB: &str = "binary_distrib";

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    FetchSource,
    BuildNative,
    DetectArtifacts,
    Package,
}

impl Stage {
    pub fn name(self) -> &'static str {
        match self {
            Stage::FetchSource => "fetch-source",
            Stage::BuildNative => "build-native",
            Stage::DetectArtifacts => "detect-artifacts",
            Stage::Package => "package",
        }
    }
}

/// Outcome of a single stage, recorded whether it succeeded or not.
#[derive(Debug, Clone)]
pub struct StageResult {
    pub stage: Stage,
    pub succeeded: bool,
    pub artifact: Option<PathBuf>,
}

/// Terminal result of a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// The sync took the update-only path; nothing was built.
    Synced,
    /// 32-bit target on a 64-bit host: the source distribution was
    /// produced, the native compile must happen on 32-bit hardware.
    SourceDistribOnly,
    /// Full success; carries the distribution directory.
    Packaged(PathBuf),
}

/// Sequences the build stages against a single project tree.
pub struct Pipeline<'a> {
    desc: PlatformDescriptor,
    ctx: ProjectContext,
    sync: SyncOptions,
    build: BuildConfig,
    /// Target the 32-bit CEF build.
    x86: bool,
    runner: &'a mut dyn CommandRunner,
    results: Vec<StageResult>,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        desc: PlatformDescriptor,
        ctx: ProjectContext,
        sync: SyncOptions,
        build: BuildConfig,
        x86: bool,
        runner: &'a mut dyn CommandRunner,
    ) -> Self {
        Pipeline {
            desc,
            ctx,
            sync,
            build,
            x86,
            runner,
            results: Vec::new(),
        }
    }

    /// Per-stage results recorded so far, in execution order.
    pub fn results(&self) -> &[StageResult] {
        &self.results
    }

    /// Run the pipeline to one of its terminal outcomes.
    pub fn run(&mut self) -> Result<PipelineOutcome> {
        if let Some(outcome) = self.fetch_source()? {
            return Ok(outcome);
        }
        if let Some(outcome) = self.build_native()? {
            return Ok(outcome);
        }
        let version = self.detect_artifacts()?;
        let distrib = self.package(&version)?;
        Ok(PipelineOutcome::Packaged(distrib))
    }

    fn record(&mut self, stage: Stage, succeeded: bool, artifact: Option<PathBuf>) {
        self.results.push(StageResult {
            stage,
            succeeded,
            artifact,
        });
    }

    fn fetch_source(&mut self) -> Result<Option<PipelineOutcome>> {
        let dest = self.sync.dest();
        match sync_source(&self.sync, &mut *self.runner) {
            Ok(SyncOutcome::Updated) => {
                self.record(Stage::FetchSource, true, Some(dest));
                tracing::info!("checkout updated; skipping build stages");
                Ok(Some(PipelineOutcome::Synced))
            }
            Ok(_) => {
                self.record(Stage::FetchSource, true, Some(dest));
                Ok(None)
            }
            Err(err) => {
                self.record(Stage::FetchSource, false, None);
                Err(err).context("fetch-source stage failed")
            }
        }
    }

    fn build_native(&mut self) -> Result<Option<PipelineOutcome>> {
        let distrib = self.sync.build_dir.join(BINARY_DISTRIB);
        let result = self.run_native_build(&distrib);
        match result {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                self.record(Stage::BuildNative, false, None);
                Err(err)
            }
        }
    }

    fn run_native_build(&mut self, distrib: &std::path::Path) -> Result<Option<PipelineOutcome>> {
        // Stale output from a previous run must never leak into this one.
        remove_dir_all_if_exists(distrib)?;

        let native = ProcessBuilder::new(&self.build.python)
            .arg(&self.build.automate_script)
            .args(["--download-dir"])
            .arg(&self.sync.build_dir);
        self.runner.run(&native, Stage::BuildNative.name())?;
        tracing::info!("binary distrib created in {}", distrib.display());

        if self.x86 && self.desc.pointer == PointerWidth::Bits64 {
            // The upstream toolchain cannot cross-compile the 32-bit
            // target from a 64-bit host. Stop here, successfully.
            self.record(Stage::BuildNative, true, Some(distrib.to_path_buf()));
            tracing::warn!(
                "32-bit target on a 64-bit host: build the CEF projects on \
                 32-bit hardware (e.g. a VM), copy the resulting cef_binary_*/ \
                 directory into build/, then re-run with the prebuilt binaries"
            );
            return Ok(Some(PipelineOutcome::SourceDistribOnly));
        }

        // Build cefclient, cefsimple, ceftests, libcef_dll_wrapper.
        let projects = ProcessBuilder::new(&self.build.python)
            .arg(&self.build.automate_script)
            .args(["--download-dir"])
            .arg(&self.sync.build_dir)
            .arg("--build-projects");
        self.runner.run(&projects, Stage::BuildNative.name())?;

        // Assemble prebuilt binaries where the detection probe expects the
        // quick-rebuild short form.
        let prebuilt = self
            .ctx
            .build_dir()
            .join(format!("cef_{}", self.desc.local_postfix_arch()));
        if distrib.is_dir() {
            copy_dir_all(distrib, &prebuilt)?;
        }

        self.record(Stage::BuildNative, true, Some(prebuilt));
        Ok(None)
    }

    fn detect_artifacts(&mut self) -> Result<LibraryVersion> {
        let result = self.probe_artifacts();
        match result {
            Ok(version) => Ok(version),
            Err(err) => {
                self.record(Stage::DetectArtifacts, false, None);
                Err(err)
            }
        }
    }

    fn probe_artifacts(&mut self) -> Result<LibraryVersion> {
        let header = self.ctx.version_header(&self.desc);
        let version = LibraryVersion::from_header(&header)?;
        let build_root = self.ctx.build_dir();

        let upstream = locate_upstream_binaries(&build_root, &self.desc, &version)?;
        tracing::debug!("upstream binaries: {}", upstream.path.display());

        // The lenient sentinel is an error here: this stage's whole point
        // is confirming the build produced its outputs.
        let wrapper = match locate_wrapper_binary(&build_root, &self.desc, &version.ident()) {
            WrapperBinary::Found(loc) => loc,
            WrapperBinary::NotBuilt => {
                let basename =
                    layout::wrapper_binary_basename(&self.desc.local_postfix_arch(), &version.ident());
                return Err(BuildError::ArtifactNotFound {
                    searched: vec![build_root.join(basename)],
                }
                .into());
            }
        };

        self.record(Stage::DetectArtifacts, true, Some(wrapper.path));
        Ok(version)
    }

    fn package(&mut self, version: &LibraryVersion) -> Result<PathBuf> {
        let result = self.assemble_distrib(version);
        match result {
            Ok(distrib) => {
                self.record(Stage::Package, true, Some(distrib.clone()));
                Ok(distrib)
            }
            Err(err) => {
                self.record(Stage::Package, false, None);
                Err(err)
            }
        }
    }

    fn assemble_distrib(&mut self, version: &LibraryVersion) -> Result<PathBuf> {
        layout::require_supported(&self.desc)?;

        let build_root = self.ctx.build_dir();
        let distrib = distribution_directory(&build_root, &self.desc, &version.ident());
        ensure_dir(&distrib)?;

        if let WrapperBinary::Found(wrapper) =
            locate_wrapper_binary(&build_root, &self.desc, &version.ident())
        {
            copy_dir_all(&wrapper.path, &distrib.join(&wrapper.basename))?;
        }

        let upstream = locate_upstream_binaries(&build_root, &self.desc, version)?;
        let include = upstream.path.join("include");
        if include.is_dir() {
            copy_dir_all(&include, &distrib.join("include"))?;
        }

        tracing::info!("distribution assembled in {}", distrib.display());
        Ok(distrib)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::OsFamily;
    use crate::test_support::FakeRunner;
    use crate::util::config::Config;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const HEADER: &str =
        "#define CEF_VERSION \"120.1.1\"\n#define CHROME_VERSION_MAJOR 120\n";

    fn linux64() -> PlatformDescriptor {
        PlatformDescriptor::new(OsFamily::Linux, PointerWidth::Bits64)
    }

    fn write_version_header(root: &Path) {
        let dir = root.join("src/version");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("cef_version_linux.h"), HEADER).unwrap();
    }

    fn pipeline_parts(root: &Path) -> (SyncOptions, BuildConfig) {
        let config = Config::default();
        let mut sync = SyncOptions::from_config(&config);
        sync.build_dir = root.join("cef_build");
        (sync, config.build)
    }

    #[test]
    fn test_update_only_sync_short_circuits_pipeline() {
        let tmp = TempDir::new().unwrap();
        let (sync, build) = pipeline_parts(tmp.path());
        fs::create_dir_all(sync.dest()).unwrap();

        let mut runner = FakeRunner::default();
        let mut pipeline = Pipeline::new(
            linux64(),
            ProjectContext::new(tmp.path()),
            sync,
            build,
            false,
            &mut runner,
        );

        let outcome = pipeline.run().unwrap();

        assert_eq!(outcome, PipelineOutcome::Synced);
        assert_eq!(pipeline.results().len(), 1);
        assert_eq!(pipeline.results()[0].stage, Stage::FetchSource);
        // BUILD_NATIVE never ran: the only command was the pull.
        assert_eq!(runner.calls, vec!["git pull".to_string()]);
    }

    #[test]
    fn test_x86_cross_build_stops_after_source_distrib() {
        let tmp = TempDir::new().unwrap();
        let (mut sync, build) = pipeline_parts(tmp.path());
        sync.update = false;
        fs::create_dir_all(sync.dest()).unwrap();

        let mut runner = FakeRunner::default();
        let mut pipeline = Pipeline::new(
            linux64(),
            ProjectContext::new(tmp.path()),
            sync,
            build,
            true,
            &mut runner,
        );

        let outcome = pipeline.run().unwrap();

        assert_eq!(outcome, PipelineOutcome::SourceDistribOnly);
        let last = pipeline.results().last().unwrap();
        assert_eq!(last.stage, Stage::BuildNative);
        assert!(last.succeeded);
        // Runner is readable again only after the pipeline's last use.
        // One native-build invocation, no dependent-projects build.
        assert_eq!(runner.calls.len(), 1);
        assert!(runner.calls[0].contains("automate-git.py"));
        assert!(!runner.calls[0].contains("--build-projects"));
    }

    #[test]
    fn test_full_pipeline_packages_distribution() {
        let tmp = TempDir::new().unwrap();
        let (mut sync, build) = pipeline_parts(tmp.path());
        sync.update = false;
        fs::create_dir_all(sync.dest()).unwrap();
        write_version_header(tmp.path());

        // A leftover from an earlier run; BUILD_NATIVE must wipe it
        // before the external build recreates the directory.
        let distrib_src = sync.build_dir.join("binary_distrib");
        fs::create_dir_all(&distrib_src).unwrap();
        fs::write(distrib_src.join("stale.txt"), "old run").unwrap();

        let wrapper = tmp
            .path()
            .join("build/cefpython_binary_120.1.1_120_linux64");
        fs::create_dir_all(&wrapper).unwrap();
        fs::write(wrapper.join("cefpython_py39.so"), "").unwrap();

        // The native build command deposits the binary distrib; the
        // dependent-projects command has no output of its own here.
        let seed = distrib_src.clone();
        let mut runner = FakeRunner::with_effect(move |cmd| {
            if !cmd.display_command().contains("--build-projects") {
                fs::create_dir_all(seed.join("include")).unwrap();
                fs::write(seed.join("include/cef_version.h"), HEADER).unwrap();
            }
        });
        let mut pipeline = Pipeline::new(
            linux64(),
            ProjectContext::new(tmp.path()),
            sync,
            build,
            false,
            &mut runner,
        );

        let outcome = pipeline.run().unwrap();

        let expected = tmp.path().join("build/distrib_120.1.1_120_linux64");
        assert_eq!(outcome, PipelineOutcome::Packaged(expected.clone()));
        assert!(expected
            .join("cefpython_binary_120.1.1_120_linux64/cefpython_py39.so")
            .exists());
        assert!(expected.join("include/cef_version.h").exists());
        // The prebuilt assembly starts from the wiped distrib, so the
        // stale marker must not survive into the probe location.
        assert!(tmp.path().join("build/cef_linux64").is_dir());
        assert!(!tmp.path().join("build/cef_linux64/stale.txt").exists());
        assert!(pipeline.results().iter().all(|r| r.succeeded));
        assert_eq!(pipeline.results().len(), 4);
        // Both build invocations ran, in order.
        assert_eq!(runner.calls.len(), 2);
        assert!(runner.calls[1].contains("--build-projects"));
    }

    #[test]
    fn test_failed_native_build_surfaces_stage_name() {
        let tmp = TempDir::new().unwrap();
        let (mut sync, build) = pipeline_parts(tmp.path());
        sync.update = false;
        fs::create_dir_all(sync.dest()).unwrap();

        let mut runner = FakeRunner::fail_on("build-native");
        let mut pipeline = Pipeline::new(
            linux64(),
            ProjectContext::new(tmp.path()),
            sync,
            build,
            false,
            &mut runner,
        );

        let err = pipeline.run().unwrap_err();
        assert!(err.to_string().contains("build-native"));
        let last = pipeline.results().last().unwrap();
        assert_eq!(last.stage, Stage::BuildNative);
        assert!(!last.succeeded);
    }

    #[test]
    fn test_missing_artifacts_fail_detection() {
        let tmp = TempDir::new().unwrap();
        let (mut sync, build) = pipeline_parts(tmp.path());
        sync.update = false;
        fs::create_dir_all(sync.dest()).unwrap();
        write_version_header(tmp.path());
        // No binary_distrib, no wrapper output: detection must fail.

        let mut runner = FakeRunner::default();
        let mut pipeline = Pipeline::new(
            linux64(),
            ProjectContext::new(tmp.path()),
            sync,
            build,
            false,
            &mut runner,
        );

        let err = pipeline.run().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::ArtifactNotFound { .. })
        ));
        let last = pipeline.results().last().unwrap();
        assert_eq!(last.stage, Stage::DetectArtifacts);
        assert!(!last.succeeded);
    }
}
