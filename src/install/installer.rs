//! Atomic installation of a downloaded binary into the version directory

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use futures::{Stream, StreamExt};
use tracing::{debug, info};

use crate::install::error::InstallError;
use crate::version::registry::VersionRegistry;
use crate::version::semver::ToolVersion;

pub struct Installer {
    registry: VersionRegistry,
}

impl Installer {
    pub fn new(registry: VersionRegistry) -> Self {
        Self { registry }
    }

    /// Write `stream` to `<target_dir>/<tool>-<version>` and mark it executable.
    ///
    /// The bytes land in a hidden temporary file in `target_dir` first and are
    /// renamed into place only after the stream ended without error, so the
    /// final path never holds a partial binary. A previous install of the same
    /// version is replaced.
    pub async fn install<S, B, E>(
        &self,
        mut stream: S,
        version: &ToolVersion,
        target_dir: &Path,
    ) -> Result<PathBuf, InstallError>
    where
        S: Stream<Item = Result<B, E>> + Unpin,
        B: AsRef<[u8]>,
        E: std::error::Error + Send + Sync + 'static,
    {
        fs::create_dir_all(target_dir).map_err(persist_failed(target_dir))?;

        let mut temp = tempfile::Builder::new()
            .prefix(&format!(".{}-download-", self.registry.tool()))
            .tempfile_in(target_dir)
            .map_err(persist_failed(target_dir))?;
        debug!("Downloading {} into {:?}", version, temp.path());

        let mut written = 0usize;
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| InstallError::DownloadFailed {
                version: version.to_string(),
                source: Box::new(e),
            })?;
            let bytes = chunk.as_ref();
            temp.write_all(bytes).map_err(persist_failed(temp.path()))?;
            written += bytes.len();
        }
        temp.flush().map_err(persist_failed(temp.path()))?;
        temp.as_file().sync_all().map_err(persist_failed(temp.path()))?;

        let dest = self.registry.version_path(target_dir, version);
        temp.persist(&dest).map_err(|e| persist_failed(&dest)(e.error))?;

        mark_executable(&dest)?;

        info!("Installed {} ({} bytes) at {:?}", version, written, dest);
        Ok(dest)
    }
}

fn persist_failed(path: &Path) -> impl FnOnce(std::io::Error) -> InstallError + '_ {
    move |source| InstallError::PersistFailed {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<(), InstallError> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|source| {
        InstallError::PermissionFailed {
            path: path.to_path_buf(),
            source,
        }
    })
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> Result<(), InstallError> {
    Ok(())
}
