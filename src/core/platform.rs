//! Host platform facts.
//!
//! A [`PlatformDescriptor`] is resolved once at process start and passed
//! explicitly to everything that needs it. All derived names are computed
//! on demand so the naming rules live in one place.

use std::fmt;

/// Operating-system family recognized by the build pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsFamily {
    Windows,
    Linux,
    Mac,
    /// Anything else. Descriptor creation never fails; unknown hosts get a
    /// sentinel postfix that must never resolve a real artifact path.
    Unknown,
}

impl OsFamily {
    /// Detect the family of the running host.
    pub fn from_host() -> Self {
        match std::env::consts::OS {
            "windows" => OsFamily::Windows,
            "linux" => OsFamily::Linux,
            "macos" => OsFamily::Mac,
            _ => OsFamily::Unknown,
        }
    }

    /// Postfix used in cefpython source directory and file names.
    /// OS name only, no architecture.
    pub fn postfix(&self) -> &'static str {
        match self {
            OsFamily::Windows => "win",
            OsFamily::Linux => "linux",
            OsFamily::Mac => "mac",
            OsFamily::Unknown => "unknown",
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.postfix())
    }
}

/// Native pointer width of the build target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerWidth {
    Bits32,
    Bits64,
}

impl PointerWidth {
    /// Detect the pointer width of the running process.
    pub fn from_host() -> Self {
        if std::mem::size_of::<usize>() * 8 == 32 {
            PointerWidth::Bits32
        } else {
            PointerWidth::Bits64
        }
    }

    pub fn bits(&self) -> u32 {
        match self {
            PointerWidth::Bits32 => 32,
            PointerWidth::Bits64 => 64,
        }
    }
}

/// Immutable facts about the host platform, resolved once per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformDescriptor {
    pub os: OsFamily,
    pub pointer: PointerWidth,
}

impl PlatformDescriptor {
    /// Resolve the descriptor from the ambient environment. Never fails:
    /// unrecognized hosts produce `OsFamily::Unknown`.
    pub fn resolve() -> Self {
        PlatformDescriptor {
            os: OsFamily::from_host(),
            pointer: PointerWidth::from_host(),
        }
    }

    /// Construct a descriptor for a specific platform, mainly for tests and
    /// cross-target queries.
    pub fn new(os: OsFamily, pointer: PointerWidth) -> Self {
        PlatformDescriptor { os, pointer }
    }

    /// Platform name in cefpython sources: OS only, e.g. `linux`.
    pub fn local_postfix(&self) -> &'static str {
        self.os.postfix()
    }

    /// Platform name in cefpython binaries: OS plus bit width, e.g. `linux64`.
    pub fn local_postfix_arch(&self) -> String {
        format!("{}{}", self.os.postfix(), self.pointer.bits())
    }

    /// Platform name in upstream CEF binaries. Mac uses `macosx` here, and an
    /// unknown OS collapses to a bare `unknown` sentinel with no bit width.
    pub fn upstream_postfix_arch(&self) -> String {
        match self.os {
            OsFamily::Mac => format!("macosx{}", self.pointer.bits()),
            OsFamily::Unknown => "unknown".to_string(),
            _ => self.local_postfix_arch(),
        }
    }

    pub fn is_windows(&self) -> bool {
        self.os == OsFamily::Windows
    }

    pub fn is_unix(&self) -> bool {
        matches!(self.os, OsFamily::Linux | OsFamily::Mac)
    }

    /// Extension of the produced Python extension module.
    pub fn module_ext(&self) -> &'static str {
        if self.is_windows() {
            "pyd"
        } else {
            "so"
        }
    }
}
