use std::io::Write;

use anyhow::Context;
use tracing::info;

use crate::cli::App;
use crate::release::error::ReleaseError;
use crate::version::ToolVersion;

impl App {
    /// Download the release tagged `tag` for this platform and install it.
    ///
    /// An already installed version is left alone unless `force` is set.
    pub async fn install(
        &self,
        tag: &str,
        force: bool,
        out: &mut dyn Write,
    ) -> anyhow::Result<ToolVersion> {
        let version = self.trackable_version_arg(tag)?;

        if !force && self.is_installed(&version) {
            writeln!(
                out,
                "{} version {} is already installed (use --force to reinstall)",
                self.tool, version
            )?;
            return Ok(version);
        }

        let release = self.catalog.fetch_by_tag(tag).await.map_err(|e| match e {
            ReleaseError::ReleaseNotFound(_) => anyhow::Error::new(e)
                .context(format!("No release {}; check the version string", tag)),
            e => anyhow::Error::new(e).context("Failed to fetch release metadata"),
        })?;

        let asset = self
            .resolver
            .select(tag, &release.assets, &self.platform)
            .with_context(|| format!("Release {} does not support {}", tag, self.platform))?;

        if self.active.current_version(&self.layout.bin_dir).as_ref() == Some(&version) {
            info!("Reinstalling {} which is currently active", version);
        }

        let stream = self
            .source
            .download_asset(asset)
            .await
            .with_context(|| format!("Failed to download {}", asset.name))?;
        self.installer
            .install(stream, &version, &self.layout.versions_dir)
            .await?;

        writeln!(
            out,
            "{} version {} successfully installed",
            self.tool, version
        )?;
        Ok(version)
    }
}
