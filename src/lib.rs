//! Version manager for a single release-distributed binary
//!
//! Installed versions live side by side as `<tool>-<version>` files in a
//! version directory, and a `<tool>` symlink in a bin directory selects the
//! active one.
//!
//! # Modules
//!
//! - [`version`]: Version parsing and the on-disk version registry
//! - [`release`]: Remote release listing, asset selection and download
//! - [`install`]: Atomic install and active-version switching
//! - [`cli`]: Subcommand implementations
//! - [`platform`]: Running OS and architecture
//! - [`config`]: Defaults, config file and directory layout
//! - [`logging`]: Tracing subscriber setup

pub mod cli;
pub mod config;
pub mod install;
pub mod logging;
pub mod platform;
pub mod release;
pub mod version;
