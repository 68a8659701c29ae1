//! uaforge Sources - browser version acquisition.
//!
//! Resolves a list of current browser builds by racing remote sources and
//! falling back to a date-based approximation. Acquisition never fails.
//!
//! # Tiers
//!
//! ```text
//! Chrome releases API ─┐
//!                      ├─ first success wins ─→ Acquisition::Fetched
//! Edge package index  ─┘
//!         (all failed or deadline elapsed)  ─→ Acquisition::Approximated
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use uaforge_core::SourcesConfig;
//! use uaforge_sources::{build_http_client, Coordinator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SourcesConfig::default();
//! let client = build_http_client(config.timeout())?;
//! let acquisition = Coordinator::from_config(&config, &client).acquire().await;
//! println!("{} versions", acquisition.versions().len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod approximate;
pub mod chrome;
pub mod coordinator;
pub mod edge;
pub mod error;
pub mod source;

// Re-export commonly used types
pub use approximate::{approximate_version, approximate_versions, APPROXIMATION_COUNT};
pub use chrome::ChromeReleasesSource;
pub use coordinator::{Acquisition, Coordinator, FallbackReason};
pub use edge::{collapse_releases, parse_listing, EdgeRepoSource, SourceRelease};
pub use error::{Result, SourceError};
pub use source::{build_http_client, VersionSource};
