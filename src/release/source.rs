//! Source trait for listing and downloading remote releases

use futures::stream::BoxStream;

#[cfg(test)]
use mockall::automock;

use crate::release::error::ReleaseError;
use crate::release::types::{Release, ReleaseAsset, ReleasePage};

/// Byte chunks of a downloading asset
pub type AssetStream = BoxStream<'static, Result<Vec<u8>, ReleaseError>>;

/// Trait for fetching releases of the managed tool
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseSource: Send + Sync {
    /// Fetches one page of releases, newest first
    ///
    /// # Arguments
    /// * `page` - 1-based page number
    /// * `per_page` - Maximum number of releases on the page
    async fn list_releases(&self, page: u32, per_page: u32) -> Result<ReleasePage, ReleaseError>;

    /// Fetches the release published under exactly `tag`
    ///
    /// # Returns
    /// * `Err(ReleaseError::ReleaseNotFound)` - If no release has that tag
    async fn release_by_tag(&self, tag: &str) -> Result<Release, ReleaseError>;

    /// Opens a byte stream of the asset's contents
    async fn download_asset(&self, asset: &ReleaseAsset) -> Result<AssetStream, ReleaseError>;
}
