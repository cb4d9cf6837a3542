use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VersionParseError {
    #[error("Invalid version: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read version directory {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
