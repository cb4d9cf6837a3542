//! Release data returned by the remote source

use serde::Deserialize;

use crate::version::semver::ToolVersion;

/// A downloadable artifact attached to a release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReleaseAsset {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub browser_download_url: String,
    #[serde(default)]
    pub size: u64,
}

/// A release as listed by the remote, tag not yet validated
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    pub tag_name: String,
    #[serde(default)]
    pub prerelease: bool,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

/// One page of a release listing
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReleasePage {
    pub releases: Vec<Release>,
    /// Page number to request next, `None` on the last page
    pub next_page: Option<u32>,
}

/// A release whose tag parsed as a semantic version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRelease {
    pub version: ToolVersion,
    pub assets: Vec<ReleaseAsset>,
}

impl RemoteRelease {
    /// Validate a release tag, returning `None` when it is not a version
    pub fn from_release(release: Release) -> Option<Self> {
        let version = ToolVersion::parse(&release.tag_name).ok()?;
        Some(Self {
            version,
            assets: release.assets,
        })
    }

    pub fn tag(&self) -> &str {
        self.version.original()
    }
}
