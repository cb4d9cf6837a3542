//! Local version layer
//!
//! This module knows how installed versions are named on disk and how they
//! are ordered.
//!
//! # Modules
//!
//! - [`semver`]: Version token parsing and ordering
//! - [`registry`]: Directory scanning and active-alias resolution
//! - [`error`]: Error types for parsing and scanning

pub mod error;
pub mod registry;
pub mod semver;

pub use registry::VersionRegistry;
pub use semver::ToolVersion;
