//! Error types for version sources.
//!
//! None of these reach a `Generator` caller: the coordinator logs them and
//! moves on to the next tier.

use thiserror::Error;

/// Errors that can occur while fetching versions from a remote source.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Transport-level failure (DNS, connect, TLS, body read)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response
    #[error("unexpected HTTP status from {name}: {status}")]
    Status {
        /// Source name
        name: String,
        /// HTTP status code
        status: u16,
    },

    /// Body could not be decoded
    #[error("failed to decode response from {name}: {message}")]
    Decode {
        /// Source name
        name: String,
        /// Decoder message
        message: String,
    },

    /// Decoded payload contained no releases
    #[error("{name} returned no releases")]
    NoReleases {
        /// Source name
        name: String,
    },

    /// The listing pattern matched nothing, the page layout has probably changed
    #[error("no release entries found on {name} listing, the page format may have changed")]
    NoMatches {
        /// Source name
        name: String,
    },

    /// Entries matched but none had a parsable date
    #[error("no valid releases could be parsed from {name}")]
    NoValidReleases {
        /// Source name
        name: String,
    },

    /// HTTP client construction failure
    #[error("failed to create HTTP client: {0}")]
    Client(String),
}

/// Result type alias for source operations.
pub type Result<T> = std::result::Result<T, SourceError>;
