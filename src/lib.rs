//! cefbuild - build pipeline and packaging helper for CEF Python
//!
//! This crate resolves platform- and version-qualified artifact names,
//! reads CEF version metadata from header files, and drives the external
//! CEF build pipeline (sync, build, detect, package).

pub mod core;
pub mod ops;
pub mod util;

/// Test doubles for cefbuild unit tests.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    errors::BuildError, layout::ArtifactLocation, layout::WrapperBinary,
    platform::PlatformDescriptor, version::LibraryVersion,
};

pub use crate::ops::{Pipeline, PipelineOutcome};
pub use crate::util::context::ProjectContext;
