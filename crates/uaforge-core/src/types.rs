//! Shared types used across uaforge crates.

use crate::error::ForgeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Search-engine crawler identities with fixed header templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrawlerType {
    /// Desktop Googlebot
    Google,
    /// Bingbot
    Bing,
    /// YandexBot
    Yandex,
}

impl CrawlerType {
    /// All known crawler types, in numeric order.
    pub const ALL: [CrawlerType; 3] = [CrawlerType::Google, CrawlerType::Bing, CrawlerType::Yandex];

    /// Stable numeric code used by language bindings.
    #[must_use]
    pub fn code(self) -> i64 {
        match self {
            CrawlerType::Google => 0,
            CrawlerType::Bing => 1,
            CrawlerType::Yandex => 2,
        }
    }
}

impl TryFrom<i64> for CrawlerType {
    type Error = ForgeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CrawlerType::Google),
            1 => Ok(CrawlerType::Bing),
            2 => Ok(CrawlerType::Yandex),
            other => Err(ForgeError::UnknownCrawler(other)),
        }
    }
}

impl FromStr for CrawlerType {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" | "googlebot" => Ok(CrawlerType::Google),
            "bing" | "bingbot" => Ok(CrawlerType::Bing),
            "yandex" | "yandexbot" => Ok(CrawlerType::Yandex),
            _ => Err(ForgeError::UnknownCrawlerName(s.to_string())),
        }
    }
}

impl fmt::Display for CrawlerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CrawlerType::Google => "googlebot",
            CrawlerType::Bing => "bingbot",
            CrawlerType::Yandex => "yandexbot",
        };
        write!(f, "{name}")
    }
}

/// Which acquisition tier produced the live version set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "tier", rename_all = "snake_case")]
pub enum VersionOrigin {
    /// Loaded from a fresh disk cache
    DiskCache,
    /// Fetched from a remote source
    Network {
        /// Name of the winning source
        source: String,
    },
    /// Synthesized from the current date
    Approximation,
}

impl fmt::Display for VersionOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionOrigin::DiskCache => write!(f, "disk cache"),
            VersionOrigin::Network { source } => write!(f, "network ({source})"),
            VersionOrigin::Approximation => write!(f, "approximation"),
        }
    }
}
