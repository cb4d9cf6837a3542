use std::io::Write;

use crate::cli::App;
use crate::config::Layout;
use crate::install::error::ActivateError;

impl App {
    /// Make `tag` the active version, installing it first when
    /// `auto_install` is set and it is missing.
    pub async fn use_version(
        &self,
        tag: &str,
        auto_install: bool,
        out: &mut dyn Write,
    ) -> anyhow::Result<()> {
        let version = self.trackable_version_arg(tag)?;
        let Layout {
            bin_dir,
            versions_dir,
        } = &self.layout;

        match self.active.activate(&version, bin_dir, versions_dir) {
            Ok(_) => {}
            Err(ActivateError::VersionNotInstalled(_)) if auto_install => {
                self.install(tag, false, out).await?;
                self.active.activate(&version, bin_dir, versions_dir)?;
            }
            Err(e @ ActivateError::VersionNotInstalled(_)) => {
                return Err(anyhow::Error::new(e).context(format!(
                    "Install it first with `toolenv install {}` or pass --install",
                    tag
                )));
            }
            Err(e) => return Err(e.into()),
        }

        writeln!(out, "Now using {} version {}", self.tool, version)?;
        Ok(())
    }
}
