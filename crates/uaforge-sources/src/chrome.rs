//! Chrome releases from Google's VersionHistory API.
//!
//! The API already lists releases newest first, so the first `keep` entries
//! are taken as-is.

use crate::error::{Result, SourceError};
use crate::source::VersionSource;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use uaforge_core::DEFAULT_CHROME_RELEASES_URL;

const SOURCE_NAME: &str = "chrome-releases";

/// Fetches stable Chrome versions from a JSON releases endpoint.
pub struct ChromeReleasesSource {
    client: Client,
    url: String,
    keep: usize,
}

impl ChromeReleasesSource {
    /// Create a source against the public endpoint, keeping 45 versions.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self::with_url(client, DEFAULT_CHROME_RELEASES_URL, 45)
    }

    /// Create a source against a custom endpoint.
    #[must_use]
    pub fn with_url(client: Client, url: impl Into<String>, keep: usize) -> Self {
        Self {
            client,
            url: url.into(),
            keep,
        }
    }

    fn take_versions(&self, envelope: ReleasesEnvelope) -> Result<Vec<String>> {
        if envelope.releases.is_empty() {
            return Err(SourceError::NoReleases {
                name: SOURCE_NAME.to_string(),
            });
        }

        Ok(envelope
            .releases
            .into_iter()
            .take(self.keep)
            .map(|release| release.version)
            .collect())
    }
}

#[async_trait]
impl VersionSource for ChromeReleasesSource {
    async fn fetch(&self) -> Result<Vec<String>> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                name: SOURCE_NAME.to_string(),
                status: status.as_u16(),
            });
        }

        let envelope: ReleasesEnvelope =
            response.json().await.map_err(|e| SourceError::Decode {
                name: SOURCE_NAME.to_string(),
                message: e.to_string(),
            })?;

        let versions = self.take_versions(envelope)?;
        debug!(source = SOURCE_NAME, count = versions.len(), "decoded releases");
        Ok(versions)
    }

    fn name(&self) -> &str {
        SOURCE_NAME
    }
}

// VersionHistory API types

#[derive(Debug, Deserialize)]
struct ReleasesEnvelope {
    #[serde(default)]
    releases: Vec<ReleaseEntry>,
}

#[derive(Debug, Deserialize)]
struct ReleaseEntry {
    version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(keep: usize) -> ChromeReleasesSource {
        ChromeReleasesSource::with_url(Client::new(), "http://localhost/releases", keep)
    }

    #[test]
    fn test_take_versions_keeps_list_order() {
        let envelope: ReleasesEnvelope = serde_json::from_str(
            r#"{"releases":[
                {"name":"a","version":"141.0.7390.108"},
                {"name":"b","version":"141.0.7390.77"},
                {"name":"c","version":"140.0.7339.208"}
            ],"nextPageToken":"x"}"#,
        )
        .expect("parse envelope");

        let versions = source(2).take_versions(envelope).expect("take versions");
        assert_eq!(versions, vec!["141.0.7390.108", "141.0.7390.77"]);
    }

    #[test]
    fn test_empty_release_list_is_error() {
        let envelope: ReleasesEnvelope = serde_json::from_str("{}").expect("parse envelope");
        let err = source(45).take_versions(envelope).expect_err("no releases");
        assert!(matches!(err, SourceError::NoReleases { .. }));
    }

    #[test]
    fn test_default_endpoint() {
        let source = ChromeReleasesSource::new(Client::new());
        assert_eq!(source.url, DEFAULT_CHROME_RELEASES_URL);
        assert_eq!(source.keep, 45);
        assert_eq!(source.name(), "chrome-releases");
    }
}
