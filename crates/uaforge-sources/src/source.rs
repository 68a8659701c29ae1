//! The version source trait shared by all fetchers.

use crate::error::{Result, SourceError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// A remote strategy that yields browser version strings, most recent first.
///
/// Implementations should be thread-safe (Send + Sync): the coordinator runs
/// every source on its own task and drops the pending future when another
/// source wins or the deadline elapses.
#[async_trait]
pub trait VersionSource: Send + Sync {
    /// Fetch the current version list.
    ///
    /// # Errors
    /// Returns error on transport failure, bad status, undecodable payloads
    /// or an empty result.
    async fn fetch(&self) -> Result<Vec<String>>;

    /// Short identifier used in logs and in `VersionOrigin`.
    fn name(&self) -> &str;
}

/// Build the default HTTP client used by the built-in sources.
///
/// # Errors
/// Returns error if the HTTP client cannot be created.
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| SourceError::Client(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(Duration::from_secs(15));
        assert!(client.is_ok());
    }
}
