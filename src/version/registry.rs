//! On-disk registry of installed versions
//!
//! Installed binaries live in a single directory and are named
//! `<tool>-<version>`. The active version is a symlink named `<tool>` in the
//! bin directory pointing at one of those files.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::version::error::StoreError;
use crate::version::semver::ToolVersion;

/// Naming convention and directory scanning for one tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRegistry {
    tool: String,
}

impl VersionRegistry {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// File name of an installed version, e.g. `talosctl-v1.7.0`
    pub fn file_name(&self, version: &ToolVersion) -> String {
        format!("{}-{}", self.tool, version.original())
    }

    pub fn version_path(&self, versions_dir: &Path, version: &ToolVersion) -> PathBuf {
        versions_dir.join(self.file_name(version))
    }

    /// Path of the active-version alias inside `bin_dir`
    pub fn alias_path(&self, bin_dir: &Path) -> PathBuf {
        bin_dir.join(format!("{}{}", self.tool, std::env::consts::EXE_SUFFIX))
    }

    /// Extract the version from a file name following the naming convention.
    ///
    /// The name must be exactly `<tool>-<version>` where the version component
    /// contains no further `-` and parses as a semantic version.
    pub fn parse_file_name(&self, name: &str) -> Option<ToolVersion> {
        let token = name.strip_prefix(self.tool.as_str())?.strip_prefix('-')?;
        if token.is_empty() || token.contains('-') {
            return None;
        }
        ToolVersion::parse(token).ok()
    }

    /// Whether an installed `version` could be found again by [`Self::list`]
    /// and [`Self::resolve_active`].
    ///
    /// Tokens containing `-` (pre-releases such as `v1.8.0-beta.1`) cannot be
    /// told apart from foreign files and are not trackable.
    pub fn is_trackable(&self, version: &ToolVersion) -> bool {
        self.parse_file_name(&self.file_name(version)).is_some()
    }

    /// List installed versions in ascending semantic order.
    ///
    /// A missing directory means nothing is installed yet and yields an empty
    /// list. Entries that are directories or do not follow the naming
    /// convention are skipped.
    pub fn list(&self, versions_dir: &Path) -> Result<Vec<ToolVersion>, StoreError> {
        let io_error = |source| StoreError::Io {
            path: versions_dir.to_path_buf(),
            source,
        };

        let entries = match fs::read_dir(versions_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Version directory {:?} does not exist", versions_dir);
                return Ok(Vec::new());
            }
            Err(e) => return Err(io_error(e)),
        };

        let mut versions = Vec::new();
        for entry in entries {
            let entry = entry.map_err(io_error)?;
            if entry.file_type().map_err(io_error)?.is_dir() {
                continue;
            }

            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };

            match self.parse_file_name(name) {
                Some(version) => versions.push(version),
                None => debug!("Ignoring {:?} in version directory", name),
            }
        }

        versions.sort();
        versions.dedup();
        Ok(versions)
    }

    /// Resolve the active alias to the version it points at.
    ///
    /// Returns `None` when the alias is missing, is not a symlink, is broken,
    /// or targets a file that does not follow the naming convention.
    pub fn resolve_active(&self, bin_dir: &Path) -> Option<ToolVersion> {
        let alias = self.alias_path(bin_dir);
        let target = match fs::read_link(&alias) {
            Ok(target) => target,
            Err(e) => {
                debug!("No active alias at {:?}: {}", alias, e);
                return None;
            }
        };

        let target = if target.is_relative() {
            bin_dir.join(target)
        } else {
            target
        };

        if !target.is_file() {
            debug!("Active alias {:?} points at missing {:?}", alias, target);
            return None;
        }

        self.parse_file_name(target.file_name()?.to_str()?)
    }
}
