use std::io::Write;

use anyhow::Context;

use crate::cli::App;

impl App {
    /// Print installed versions, marking the active one with `*`
    pub fn list(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        let versions = self
            .registry
            .list(&self.layout.versions_dir)
            .context("Failed to list installed versions")?;

        if versions.is_empty() {
            writeln!(out, "No {} versions installed.", self.tool)?;
            return Ok(());
        }

        let current = self.active.current_version(&self.layout.bin_dir);

        writeln!(out, "Available {} versions:", self.tool)?;
        for version in &versions {
            if current.as_ref() == Some(version) {
                writeln!(out, "{} *", version)?;
            } else {
                writeln!(out, "{}", version)?;
            }
        }
        Ok(())
    }

    /// Print the active version
    pub fn current(&self, out: &mut dyn Write) -> anyhow::Result<()> {
        match self.active.current_version(&self.layout.bin_dir) {
            Some(version) => writeln!(out, "{}", version)?,
            None => writeln!(
                out,
                "No {} version is active. Run `toolenv use <version>`",
                self.tool
            )?,
        }
        Ok(())
    }
}
