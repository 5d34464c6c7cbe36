//! Canonical artifact names and directory resolution.
//!
//! Every name format produced or consumed by the pipeline lives here, as
//! pure functions over a [`PlatformDescriptor`] and a resolved version.
//! Nothing in this module touches the filesystem except the two `locate_*`
//! probes, and those only check existence.

use std::path::{Path, PathBuf};

use crate::core::errors::BuildError;
use crate::core::platform::{OsFamily, PlatformDescriptor};
use crate::core::version::LibraryVersion;

/// Sentinel directory name for a distribution that cannot be resolved.
/// Syntactically a valid path component, guaranteed to fail existence
/// checks downstream.
pub const DISTRIB_NOTSET: &str = "DISTRIB_NOTSET";

/// A resolved artifact directory plus the basename used to construct it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLocation {
    pub basename: String,
    pub path: PathBuf,
}

impl ArtifactLocation {
    fn new(build_root: &Path, basename: String) -> Self {
        let path = build_root.join(&basename);
        ArtifactLocation { basename, path }
    }
}

/// Result of an advisory wrapper-binary lookup. Absence is normal before
/// a build has run, so it is a sentinel here, not an error; stages that
/// require the binary present convert `NotBuilt` themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WrapperBinary {
    Found(ArtifactLocation),
    NotBuilt,
}

impl WrapperBinary {
    pub fn is_built(&self) -> bool {
        matches!(self, WrapperBinary::Found(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            WrapperBinary::Found(loc) => Some(&loc.path),
            WrapperBinary::NotBuilt => None,
        }
    }
}

/// Basename of an upstream CEF binaries+headers bundle,
/// e.g. `cef_3.2883.1553.g80bd606_55_win32`.
pub fn upstream_library_basename(engine: &str, wrapper: &str, postfix: &str) -> String {
    format!("cef_{engine}_{wrapper}_{postfix}")
}

/// Inverse of [`upstream_library_basename`]: recover `(engine, wrapper,
/// postfix)` from a basename, or `None` if the shape does not match.
/// The engine version may itself contain underscores; the postfix and
/// wrapper components never do, so parsing splits from the right.
pub fn parse_upstream_library_basename(name: &str) -> Option<(String, String, String)> {
    let rest = name.strip_prefix("cef_")?;
    let (rest, postfix) = rest.rsplit_once('_')?;
    let (engine, wrapper) = rest.rsplit_once('_')?;
    if engine.is_empty() || wrapper.is_empty() || postfix.is_empty() {
        return None;
    }
    Some((engine.to_string(), wrapper.to_string(), postfix.to_string()))
}

/// Basename of the produced cefpython module output directory,
/// e.g. `cefpython_binary_120.1.1_120_linux64`.
pub fn wrapper_binary_basename(postfix: &str, version: &str) -> String {
    format!("cefpython_binary_{version}_{postfix}")
}

/// Locate the upstream CEF binaries directory under `build_root`.
///
/// Probes the short form `cef_<os><bits>/` first (a quick local rebuild
/// carries no version stamp), then the fully version-stamped basename (a
/// distribution fetched externally). If neither exists, the result is
/// [`BuildError::ArtifactNotFound`] listing both probed paths.
pub fn locate_upstream_binaries(
    build_root: &Path,
    desc: &PlatformDescriptor,
    version: &LibraryVersion,
) -> Result<ArtifactLocation, BuildError> {
    let postfix = desc.local_postfix_arch();

    let short = ArtifactLocation::new(build_root, format!("cef_{postfix}"));
    if short.path.is_dir() {
        return Ok(short);
    }

    let long = ArtifactLocation::new(
        build_root,
        upstream_library_basename(&version.cef, &version.chrome_major, &postfix),
    );
    if long.path.is_dir() {
        return Ok(long);
    }

    Err(BuildError::ArtifactNotFound {
        searched: vec![short.path, long.path],
    })
}

/// Locate the cefpython binary output directory under `build_root`.
///
/// Advisory query: a missing directory means "not yet built" and returns
/// the explicit [`WrapperBinary::NotBuilt`] sentinel.
pub fn locate_wrapper_binary(
    build_root: &Path,
    desc: &PlatformDescriptor,
    version_ident: &str,
) -> WrapperBinary {
    let basename = wrapper_binary_basename(&desc.local_postfix_arch(), version_ident);
    let location = ArtifactLocation::new(build_root, basename);
    if location.path.is_dir() {
        WrapperBinary::Found(location)
    } else {
        WrapperBinary::NotBuilt
    }
}

/// Compute the final distributable package directory under `build_root`.
///
/// Unix systems get an architecture-qualified name; Windows gets a single
/// combined `win32_win64` directory because packaging merges both
/// architectures there. An unknown OS or an empty version yields the
/// [`DISTRIB_NOTSET`] sentinel, which must fail existence checks.
pub fn distribution_directory(
    build_root: &Path,
    desc: &PlatformDescriptor,
    version_ident: &str,
) -> PathBuf {
    let dirname = if version_ident.is_empty() {
        DISTRIB_NOTSET.to_string()
    } else if desc.is_unix() {
        format!("distrib_{}_{}", version_ident, desc.local_postfix_arch())
    } else if desc.is_windows() {
        format!("distrib_{version_ident}_win32_win64")
    } else {
        DISTRIB_NOTSET.to_string()
    };
    build_root.join(dirname)
}

/// Check that a descriptor can resolve real paths, for stages that are
/// about to create directories rather than merely probe them.
pub fn require_supported(desc: &PlatformDescriptor) -> Result<(), BuildError> {
    if desc.os == OsFamily::Unknown {
        return Err(BuildError::UnsupportedPlatform {
            os: std::env::consts::OS.to_string(),
        });
    }
    Ok(())
}
