//! uaforge - current, plausible browser User-Agents and matching headers.
//!
//! A [`Generator`] resolves a list of real browser builds once (disk cache,
//! then a race between the Chrome releases API and the Edge package index,
//! then a date-based approximation) and turns them into User-Agent strings,
//! full browser header sets and search-engine crawler headers.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use uaforge::{CrawlerType, Generator, GeneratorOptions};
//!
//! # async fn example() {
//! let options = GeneratorOptions::new().with_disk_cache(None, Duration::from_secs(3600));
//! let generator = Generator::new(options).await;
//!
//! let headers = generator.headers(Some("https://api.example.com/v1/data"));
//! assert_eq!(headers["origin"], "https://api.example.com");
//!
//! let bot = generator.crawler_headers(CrawlerType::Google);
//! assert!(bot.contains_key("from"));
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod generator;
pub mod store;

// Re-export commonly used types
pub use generator::{DiskCache, Generator, GeneratorOptions};
pub use store::{VersionSet, VersionStore};
pub use uaforge_core::{
    CacheConfig, ConfigError, CrawlerType, ForgeConfig, ForgeError, Result, SourcesConfig,
    VersionOrigin,
};
pub use uaforge_headers::Headers;
pub use uaforge_sources::{Acquisition, Coordinator, FallbackReason, SourceError, VersionSource};
