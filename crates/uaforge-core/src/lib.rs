//! uaforge Core - Foundation crate for the uaforge workspace.
//!
//! This crate provides shared types, error handling and configuration
//! management that the other uaforge crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`types`] - Shared enums (`CrawlerType`, `VersionOrigin`)
//!
//! # Example
//!
//! ```rust
//! use uaforge_core::{CrawlerType, ForgeConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ForgeConfig::default();
//! assert_eq!(config.sources.chrome_keep, 45);
//!
//! let crawler: CrawlerType = "googlebot".parse()?;
//! assert_eq!(crawler, CrawlerType::Google);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{
    CacheConfig, ForgeConfig, SourcesConfig, DEFAULT_CACHE_FILE_NAME, DEFAULT_CHROME_RELEASES_URL,
    DEFAULT_EDGE_REPO_URL,
};
pub use error::{ConfigError, ConfigResult, ForgeError, Result};
pub use types::{CrawlerType, VersionOrigin};
