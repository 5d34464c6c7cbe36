//! Version metadata parsed from CEF header files.
//!
//! The version headers are treated as flat `#define KEY VALUE` declaration
//! sources; nothing else in the header grammar matters here.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::core::errors::BuildError;

/// Matches `#define <IDENT> <VALUE>` with the value optionally wrapped in
/// double quotes. Values never contain embedded whitespace.
static DEFINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^#define (\w+) "?([^\s"]+)"?"#).unwrap());

/// Parse all `#define` declarations in the given text.
///
/// Non-matching lines (comments, other preprocessor directives) are
/// skipped; if an identifier repeats, the last occurrence wins.
pub fn parse_defines(contents: &str) -> BTreeMap<String, String> {
    DEFINE_RE
        .captures_iter(contents)
        .map(|cap| (cap[1].to_string(), cap[2].to_string()))
        .collect()
}

/// Read a header file and extract its `#define` declarations, requiring
/// every key in `required` to be present.
///
/// Fails with [`BuildError::Config`] if the file cannot be read, or with
/// [`BuildError::MissingKeys`] naming every absent required key.
pub fn read_defines(path: &Path, required: &[&str]) -> Result<BTreeMap<String, String>, BuildError> {
    let contents = fs::read_to_string(path).map_err(|source| BuildError::Config {
        path: path.to_path_buf(),
        source,
    })?;

    let defines = parse_defines(&contents);

    let missing: Vec<String> = required
        .iter()
        .filter(|key| !defines.contains_key(**key))
        .map(|key| key.to_string())
        .collect();

    if !missing.is_empty() {
        return Err(BuildError::MissingKeys {
            path: path.to_path_buf(),
            keys: missing,
        });
    }

    Ok(defines)
}

const CEF_VERSION_KEY: &str = "CEF_VERSION";
const CHROME_MAJOR_KEY: &str = "CHROME_VERSION_MAJOR";

/// CEF version facts read from a `src/version/cef_version_<os>.h` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryVersion {
    /// Full CEF version string, e.g. `3.2883.1553.g80bd606`.
    pub cef: String,
    /// Major version of the embedded Chromium engine, e.g. `55`.
    pub chrome_major: String,
}

impl LibraryVersion {
    /// Parse a version header, requiring both version keys.
    pub fn from_header(path: &Path) -> Result<Self, BuildError> {
        let defines = read_defines(path, &[CEF_VERSION_KEY, CHROME_MAJOR_KEY])?;
        Ok(LibraryVersion {
            cef: defines[CEF_VERSION_KEY].clone(),
            chrome_major: defines[CHROME_MAJOR_KEY].clone(),
        })
    }

    /// The version identifier stamped into artifact names,
    /// e.g. `120.1.1_120`.
    pub fn ident(&self) -> String {
        format!("{}_{}", self.cef, self.chrome_major)
    }
}
