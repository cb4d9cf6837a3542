//! Local installation layer
//!
//! # Modules
//!
//! - [`installer`]: Atomic download-to-disk of a versioned binary
//! - [`active`]: The `<tool>` alias pointing at the active version
//! - [`error`]: Error types for install and activation

pub mod active;
pub mod error;
pub mod installer;

pub use active::ActiveVersionManager;
pub use installer::Installer;
