//! Command layer
//!
//! Wires the version store, the release catalog and the platform together and
//! implements each subcommand on top of them. Output goes to a caller-supplied
//! writer so commands can be exercised in tests.
//!
//! # Modules
//!
//! - [`install`]: `install <version> [--use] [--force]`
//! - [`use_version`]: `use <version> [--install]`
//! - [`list`]: `list` and `current`
//! - [`list_remote`]: `list-remote [--devel] [--limit N]`

pub mod install;
pub mod list;
pub mod list_remote;
pub mod use_version;

use std::sync::Arc;

use anyhow::Context;

use crate::config::Layout;
use crate::install::{ActiveVersionManager, Installer};
use crate::platform::PlatformTarget;
use crate::release::{AssetResolver, ReleaseCatalog, ReleaseSource};
use crate::version::{ToolVersion, VersionRegistry};

/// Everything a subcommand needs for one invocation
pub struct App {
    tool: String,
    layout: Layout,
    platform: PlatformTarget,
    source: Arc<dyn ReleaseSource>,
    registry: VersionRegistry,
    catalog: ReleaseCatalog,
    resolver: AssetResolver,
    installer: Installer,
    active: ActiveVersionManager,
}

impl App {
    pub fn new(
        tool: &str,
        layout: Layout,
        platform: PlatformTarget,
        source: Arc<dyn ReleaseSource>,
    ) -> Self {
        let registry = VersionRegistry::new(tool);
        Self {
            tool: tool.to_string(),
            layout,
            platform,
            catalog: ReleaseCatalog::new(source.clone()),
            source,
            resolver: AssetResolver::new(tool),
            installer: Installer::new(registry.clone()),
            active: ActiveVersionManager::new(registry.clone()),
            registry,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Parse a version argument that can be installed and activated
    fn trackable_version_arg(&self, tag: &str) -> anyhow::Result<ToolVersion> {
        let version = parse_version_arg(tag)?;
        if !self.registry.is_trackable(&version) {
            anyhow::bail!(
                "Pre-release version {} cannot be installed: installed files are named \
                 `{}-<version>` and the version must not contain '-'",
                tag,
                self.tool
            );
        }
        Ok(version)
    }

    fn is_installed(&self, version: &ToolVersion) -> bool {
        self.registry
            .version_path(&self.layout.versions_dir, version)
            .is_file()
    }
}

fn parse_version_arg(version: &str) -> anyhow::Result<ToolVersion> {
    ToolVersion::parse(version)
        .with_context(|| format!("'{}' is not a semantic version (e.g. v1.7.0)", version))
}
