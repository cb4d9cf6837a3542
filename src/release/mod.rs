//! Remote release layer
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ ReleaseSource│────▶│ReleaseCatalog│────▶│ AssetResolver│
//! │  (GitHub)    │     │(filter, sort)│     │  (platform)  │
//! └──────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`source`]: Trait for listing releases and downloading assets
//! - [`github`]: GitHub Releases API implementation of the source
//! - [`catalog`]: Paged fetching, pre-release filtering and ordering
//! - [`asset`]: Platform-specific asset selection
//! - [`types`]: Release and asset data
//! - [`error`]: Error type for remote operations

pub mod asset;
pub mod catalog;
pub mod error;
pub mod github;
pub mod source;
pub mod types;

pub use asset::AssetResolver;
pub use catalog::{FetchOptions, ReleaseCatalog};
pub use github::GitHubSource;
pub use source::{AssetStream, ReleaseSource};
