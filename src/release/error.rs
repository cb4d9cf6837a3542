use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReleaseError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Release not found: {0}")]
    ReleaseNotFound(String),

    #[error("No asset for {platform} in release {tag}")]
    AssetNotFound { tag: String, platform: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
