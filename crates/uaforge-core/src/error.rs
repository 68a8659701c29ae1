//! Core error types for uaforge.
//!
//! Almost every uaforge entry point is total: source failures are absorbed by
//! the fallback tiers and never reach the caller. What remains here are the
//! few failures a caller can actually observe.

use thiserror::Error;

/// Central error type for caller-visible uaforge failures.
#[derive(Error, Debug)]
pub enum ForgeError {
    /// Configuration errors (file loading, parsing, validation)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A numeric crawler type outside the known set
    #[error("unknown crawler type: {0}")]
    UnknownCrawler(i64),

    /// A crawler name that does not match any known crawler
    #[error("unknown crawler name: {0:?}")]
    UnknownCrawlerName(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory path
    #[error("could not determine config directory (XDG base directories not available)")]
    NoConfigDir,

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to serialize config
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// I/O error reading/writing config
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias using `ForgeError`.
pub type Result<T> = std::result::Result<T, ForgeError>;

/// Result type alias for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
