//! Semantic version token used for release tags and installed file names

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use semver::Version;

use crate::version::error::VersionParseError;

/// A parsed version token.
///
/// Keeps the token exactly as it was written (e.g. `v1.7.0`) so that file
/// names and release tags round-trip, while ordering and equality use the
/// normalized semantic version.
#[derive(Debug, Clone)]
pub struct ToolVersion {
    original: String,
    parsed: Version,
}

impl ToolVersion {
    /// Parse a version token, accepting a leading `v` and partial versions.
    ///
    /// Examples:
    /// - "v1.7.0" -> 1.7.0
    /// - "1.2" -> 1.2.0
    /// - "1.2.0-beta.1" -> 1.2.0-beta.1
    pub fn parse(token: &str) -> Result<Self, VersionParseError> {
        let parsed = parse_version(token)
            .ok_or_else(|| VersionParseError::Invalid(token.to_string()))?;
        Ok(Self {
            original: token.trim().to_string(),
            parsed,
        })
    }

    /// The token as written by the release author or the user
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Normalized `major.minor.patch[-pre][+build]` form
    pub fn normalized(&self) -> String {
        self.parsed.to_string()
    }

    pub fn semver(&self) -> &Version {
        &self.parsed
    }

    pub fn is_prerelease(&self) -> bool {
        !self.parsed.pre.is_empty()
    }
}

/// Parse a version string into a `semver::Version`.
///
/// Strips one leading `v` and pads partial versions like "1" or "1.2" with
/// zeros. Returns `None` for anything that is still not valid semver.
pub fn parse_version(version: &str) -> Option<Version> {
    let version = version.trim();
    let stripped = version
        .strip_prefix('v')
        .or_else(|| version.strip_prefix('V'))
        .unwrap_or(version);
    if stripped.is_empty() {
        return None;
    }

    // Only the numeric core may be partial; "1.2-rc.1" is rejected.
    let core_end = stripped.find(['-', '+']).unwrap_or(stripped.len());
    let (core, rest) = stripped.split_at(core_end);
    let parts: Vec<&str> = core.split('.').collect();
    let normalized = match parts.len() {
        1 if rest.is_empty() => format!("{}.0.0", parts[0]),
        2 if rest.is_empty() => format!("{}.{}.0", parts[0], parts[1]),
        _ => stripped.to_string(),
    };
    Version::parse(&normalized).ok()
}

impl FromStr for ToolVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ToolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl PartialEq for ToolVersion {
    fn eq(&self, other: &Self) -> bool {
        self.parsed == other.parsed
    }
}

impl Eq for ToolVersion {}

impl PartialOrd for ToolVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ToolVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parsed.cmp(&other.parsed)
    }
}
