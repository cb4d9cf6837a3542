//! Selection of the release asset built for the running platform

use tracing::debug;

use crate::platform::PlatformTarget;
use crate::release::error::ReleaseError;
use crate::release::types::ReleaseAsset;

/// Picks the raw binary asset `<tool>-<os>-<arch>[.exe]` out of a release
#[derive(Debug, Clone)]
pub struct AssetResolver {
    tool: String,
}

impl AssetResolver {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    /// Select the asset matching `platform`.
    ///
    /// Names are compared case-insensitively. Architecture aliases are tried
    /// in order and the first asset passing every check wins.
    ///
    /// The prefix must be followed by the end of the name, `.` or `-`, so
    /// `tool-linux-amd64-v1` matches while `tool-linux-amd64_v1` and
    /// `tool-linux-arm64` (for `arm`) do not. Checksums and archives sharing
    /// the prefix are rejected by their extension: on Windows the name must
    /// end in `.exe`, elsewhere nothing after the prefix may contain `.`.
    pub fn select<'a>(
        &self,
        tag: &str,
        assets: &'a [ReleaseAsset],
        platform: &PlatformTarget,
    ) -> Result<&'a ReleaseAsset, ReleaseError> {
        for arch in platform.arch.aliases() {
            let prefix = format!("{}-{}-{}", self.tool, platform.os.alias(), arch).to_lowercase();

            if let Some(asset) = assets
                .iter()
                .find(|asset| self.matches(&asset.name.to_lowercase(), &prefix, platform))
            {
                debug!("Selected asset {} for {}", asset.name, platform);
                return Ok(asset);
            }
        }

        Err(ReleaseError::AssetNotFound {
            tag: tag.to_string(),
            platform: platform.to_string(),
        })
    }

    fn matches(&self, name: &str, prefix: &str, platform: &PlatformTarget) -> bool {
        let Some(rest) = name.strip_prefix(prefix) else {
            return false;
        };

        // "arm" must not match "arm64"
        if !(rest.is_empty() || rest.starts_with('.') || rest.starts_with('-')) {
            return false;
        }

        if platform.os.is_windows_like() {
            name.ends_with(platform.os.executable_suffix())
        } else {
            !rest.contains('.')
        }
    }
}
