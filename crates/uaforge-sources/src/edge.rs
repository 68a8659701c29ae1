//! Edge versions scraped from Microsoft's package pool index.
//!
//! The index is a plain Apache-style directory listing. Each package row
//! looks like:
//!
//! ```text
//! <a href="microsoft-edge-stable_128.0.2739.25-1_amd64.deb">...</a>  20-Aug-2024 20:31  165M
//! ```
//!
//! Extraction lives in [`parse_listing`] and [`collapse_releases`] so the
//! pattern can change without touching the fetcher or the coordinator.

use crate::error::{Result, SourceError};
use crate::source::VersionSource;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use std::collections::HashSet;
use tracing::debug;
use uaforge_core::DEFAULT_EDGE_REPO_URL;

const SOURCE_NAME: &str = "edge-repo";

const PACKAGE_PREFIX: &str = "microsoft-edge-stable_";
const PACKAGE_SUFFIX: &str = "_amd64.deb";
const REVISION_SUFFIX: &str = "-1";

/// Listing row: package file name, date, time.
static LISTING_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<a href="([^"]+\.deb)">[^<]+</a>\s+(\d{1,2}-[A-Za-z]{3}-\d{4})\s+(\d{1,2}:\d{2})"#)
        .expect("Listing regex is hardcoded and valid")
});

/// A package found in the listing, before de-duplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRelease {
    /// Bare version, e.g. `128.0.2739.25`
    pub version: String,
    /// Upload time shown in the listing
    pub published: DateTime<Utc>,
}

/// Extract every dated package entry from a raw listing page.
///
/// Rows whose date or time cannot be parsed are skipped.
///
/// # Errors
/// Returns `NoMatches` if the pattern finds nothing and `NoValidReleases`
/// if nothing survives date parsing.
pub fn parse_listing(html: &str) -> Result<Vec<SourceRelease>> {
    let mut matched = 0usize;
    let mut releases = Vec::new();

    for caps in LISTING_ROW.captures_iter(html) {
        matched += 1;
        let (_, [filename, date, time]) = caps.extract();

        let stamp = format!("{date} {time}");
        let published = match NaiveDateTime::parse_from_str(&stamp, "%d-%b-%Y %H:%M") {
            Ok(naive) => naive.and_utc(),
            Err(e) => {
                debug!(date = %stamp, error = %e, "skipping listing row with unparsable date");
                continue;
            }
        };

        releases.push(SourceRelease {
            version: bare_version(filename).to_string(),
            published,
        });
    }

    if matched == 0 {
        return Err(SourceError::NoMatches {
            name: SOURCE_NAME.to_string(),
        });
    }
    if releases.is_empty() {
        return Err(SourceError::NoValidReleases {
            name: SOURCE_NAME.to_string(),
        });
    }

    Ok(releases)
}

/// Sort newest first, drop repeated versions and keep at most `keep`.
#[must_use]
pub fn collapse_releases(mut releases: Vec<SourceRelease>, keep: usize) -> Vec<String> {
    releases.sort_by(|a, b| b.published.cmp(&a.published));

    let mut seen = HashSet::new();
    releases
        .into_iter()
        .filter(|release| seen.insert(release.version.clone()))
        .map(|release| release.version)
        .take(keep)
        .collect()
}

fn bare_version(filename: &str) -> &str {
    let version = filename.strip_prefix(PACKAGE_PREFIX).unwrap_or(filename);
    let version = version.strip_suffix(PACKAGE_SUFFIX).unwrap_or(version);
    version.strip_suffix(REVISION_SUFFIX).unwrap_or(version)
}

/// Fetches stable Edge versions by scraping the package pool index.
pub struct EdgeRepoSource {
    client: Client,
    url: String,
    keep: usize,
}

impl EdgeRepoSource {
    /// Create a source against the public index, keeping 20 versions.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_url(client, DEFAULT_EDGE_REPO_URL, 20)
    }

    /// Create a source against a custom index page.
    #[must_use]
    pub fn with_url(client: Client, url: impl Into<String>, keep: usize) -> Self {
        Self {
            client,
            url: url.into(),
            keep,
        }
    }
}

#[async_trait]
impl VersionSource for EdgeRepoSource {
    async fn fetch(&self) -> Result<Vec<String>> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                name: SOURCE_NAME.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let releases = parse_listing(&body).inspect_err(|e| {
            if matches!(e, SourceError::NoMatches { .. }) {
                debug!(url = %self.url, body = %body, "listing did not match");
            }
        })?;

        let versions = collapse_releases(releases, self.keep);
        debug!(source = SOURCE_NAME, count = versions.len(), "parsed listing");
        Ok(versions)
    }

    fn name(&self) -> &str {
        SOURCE_NAME
    }
}
