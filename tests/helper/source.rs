//! Release source test utilities

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use futures::StreamExt;
use tempfile::TempDir;

use toolenv::cli::App;
use toolenv::config::Layout;
use toolenv::platform::{Arch, Os, PlatformTarget};
use toolenv::release::error::ReleaseError;
use toolenv::release::types::{Release, ReleaseAsset, ReleasePage};
use toolenv::release::{AssetStream, ReleaseSource};

pub const TOOL: &str = "talosctl";

/// In-memory release source serving releases newest first
#[derive(Default)]
pub struct FakeReleaseSource {
    releases: Vec<Release>,
    contents: HashMap<u64, Vec<u8>>,
}

impl FakeReleaseSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a release with the given `(name, contents)` assets.
    /// Releases must be added newest first.
    pub fn with_release(mut self, tag: &str, prerelease: bool, assets: &[(&str, &[u8])]) -> Self {
        let assets = assets
            .iter()
            .map(|(name, contents)| {
                let id = self.contents.len() as u64 + 1;
                self.contents.insert(id, contents.to_vec());
                ReleaseAsset {
                    id,
                    name: name.to_string(),
                    browser_download_url: format!("https://example.com/{}/{}", tag, name),
                    size: contents.len() as u64,
                }
            })
            .collect();
        self.releases.push(Release {
            tag_name: tag.to_string(),
            prerelease,
            assets,
        });
        self
    }

    /// Shorthand for a release carrying a linux/amd64 binary
    pub fn with_binary(self, tag: &str, contents: &[u8]) -> Self {
        let name = format!("{}-linux-amd64", TOOL);
        self.with_release(tag, false, &[(name.as_str(), contents)])
    }
}

#[async_trait]
impl ReleaseSource for FakeReleaseSource {
    async fn list_releases(&self, page: u32, per_page: u32) -> Result<ReleasePage, ReleaseError> {
        let start = (page.saturating_sub(1) * per_page) as usize;
        let end = (start + per_page as usize).min(self.releases.len());
        let releases = self.releases.get(start..end).unwrap_or_default().to_vec();
        let next_page = (end < self.releases.len()).then_some(page + 1);
        Ok(ReleasePage {
            releases,
            next_page,
        })
    }

    async fn release_by_tag(&self, tag: &str) -> Result<Release, ReleaseError> {
        self.releases
            .iter()
            .find(|release| release.tag_name == tag)
            .cloned()
            .ok_or_else(|| ReleaseError::ReleaseNotFound(tag.to_string()))
    }

    async fn download_asset(&self, asset: &ReleaseAsset) -> Result<AssetStream, ReleaseError> {
        let contents = self
            .contents
            .get(&asset.id)
            .cloned()
            .ok_or_else(|| ReleaseError::InvalidResponse(format!("unknown asset {}", asset.id)))?;
        // Split into two chunks to exercise streaming writes
        let mid = contents.len() / 2;
        let chunks: Vec<Result<Vec<u8>, ReleaseError>> =
            vec![Ok(contents[..mid].to_vec()), Ok(contents[mid..].to_vec())];
        Ok(futures::stream::iter(chunks).boxed())
    }
}

/// Temporary bin and versions directories with an [`App`] on linux/amd64
pub struct TestEnv {
    _temp_dir: TempDir,
    pub layout: Layout,
    pub app: App,
}

impl TestEnv {
    pub fn new(source: FakeReleaseSource) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let layout = Layout {
            bin_dir: temp_dir.path().join("bin"),
            versions_dir: temp_dir.path().join("versions"),
        };
        let app = App::new(
            TOOL,
            layout.clone(),
            PlatformTarget::new(Os::Linux, Arch::Amd64),
            Arc::new(source),
        );
        Self {
            _temp_dir: temp_dir,
            layout,
            app,
        }
    }

    /// Path an installed version is stored at
    pub fn version_file(&self, version: &str) -> std::path::PathBuf {
        self.layout
            .versions_dir
            .join(format!("{}-{}", TOOL, version))
    }

    /// Path of the active-version alias
    pub fn alias(&self) -> std::path::PathBuf {
        self.layout.bin_dir.join(TOOL)
    }
}
