//! Core domain types: platform facts, version metadata, artifact layout.

pub mod errors;
pub mod layout;
pub mod platform;
pub mod version;

pub use errors::BuildError;
pub use layout::{ArtifactLocation, WrapperBinary};
pub use platform::{OsFamily, PlatformDescriptor, PointerWidth};
pub use version::LibraryVersion;
