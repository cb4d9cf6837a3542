use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Failed to download {version}: {source}")]
    DownloadFailed {
        version: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Failed to write {path:?}: {source}")]
    PersistFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to mark {path:?} executable: {source}")]
    PermissionFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ActivateError {
    #[error("Version {0} is not installed")]
    VersionNotInstalled(String),

    #[error("Version {0} cannot be tracked: installed files are named <tool>-<version> with no '-' in the version")]
    UntrackableVersion(String),

    #[error("Failed to update active link {path:?}: {source}")]
    LinkFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
