//! Active-version alias management

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::install::error::ActivateError;
use crate::version::registry::VersionRegistry;
use crate::version::semver::ToolVersion;

pub struct ActiveVersionManager {
    registry: VersionRegistry,
}

impl ActiveVersionManager {
    pub fn new(registry: VersionRegistry) -> Self {
        Self { registry }
    }

    /// Point the alias in `bin_dir` at the installed `version`.
    ///
    /// The new link is created under a hidden name and renamed over the alias,
    /// so the alias is never missing. Fails with `VersionNotInstalled` without
    /// touching the alias when `version` is not in `versions_dir`, and with
    /// `UntrackableVersion` when the alias could not be resolved back to it.
    pub fn activate(
        &self,
        version: &ToolVersion,
        bin_dir: &Path,
        versions_dir: &Path,
    ) -> Result<PathBuf, ActivateError> {
        if !self.registry.is_trackable(version) {
            return Err(ActivateError::UntrackableVersion(version.to_string()));
        }

        let target = self.registry.version_path(versions_dir, version);
        if !target.is_file() {
            return Err(ActivateError::VersionNotInstalled(version.to_string()));
        }
        let target = std::path::absolute(&target).map_err(link_failed(&target))?;

        fs::create_dir_all(bin_dir).map_err(link_failed(bin_dir))?;

        let alias = self.registry.alias_path(bin_dir);
        if fs::symlink_metadata(&alias).is_ok_and(|meta| meta.is_dir()) {
            return Err(link_failed(&alias)(io::Error::other(
                "alias path is a directory",
            )));
        }

        let staged = bin_dir.join(format!(
            ".{}.{}.tmp",
            self.registry.tool(),
            std::process::id()
        ));
        // Leftover from an interrupted run with the same pid
        let _ = fs::remove_file(&staged);

        create_symlink(&target, &staged).map_err(link_failed(&staged))?;
        if let Err(e) = fs::rename(&staged, &alias) {
            let _ = fs::remove_file(&staged);
            return Err(link_failed(&alias)(e));
        }

        info!("Activated {} via {:?} -> {:?}", version, alias, target);
        Ok(alias)
    }

    /// Version the alias in `bin_dir` currently points at
    pub fn current_version(&self, bin_dir: &Path) -> Option<ToolVersion> {
        let current = self.registry.resolve_active(bin_dir);
        debug!("Current version in {:?}: {:?}", bin_dir, current);
        current
    }
}

fn link_failed(path: &Path) -> impl FnOnce(io::Error) -> ActivateError + '_ {
    move |source| ActivateError::LinkFailed {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(unix)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn create_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}
