use std::io::Write;

use anyhow::Context;
use tracing::warn;

use crate::cli::App;
use crate::release::FetchOptions;

impl App {
    /// Print remote versions ascending.
    ///
    /// The active version is marked with `*` and other installed versions
    /// with `+`.
    pub async fn list_remote(
        &self,
        options: FetchOptions,
        out: &mut dyn Write,
    ) -> anyhow::Result<()> {
        let releases = self
            .catalog
            .fetch(options)
            .await
            .context("Failed to fetch remote releases")?;

        let current = self.active.current_version(&self.layout.bin_dir);
        let installed = self
            .registry
            .list(&self.layout.versions_dir)
            .inspect_err(|e| warn!("Failed to list installed versions: {}", e))
            .unwrap_or_default();

        writeln!(out, "Available versions to download:")?;
        for release in &releases {
            let version = &release.version;
            if current.as_ref() == Some(version) {
                writeln!(out, "{} *", version)?;
            } else if installed.contains(version) {
                writeln!(out, "{} +", version)?;
            } else {
                writeln!(out, "{}", version)?;
            }
        }

        if !options.include_devel {
            writeln!(out)?;
            writeln!(
                out,
                "Note: Pre-release versions (alpha, beta, rc) are hidden. Use '--devel' to include them."
            )?;
        }
        Ok(())
    }
}
