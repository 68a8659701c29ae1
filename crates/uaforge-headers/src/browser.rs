//! Structured browser details recovered from a User-Agent string.
//!
//! Every field is extracted independently; a missing token falls back to a
//! default instead of failing the whole parse.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static MAJOR_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Chrome/(\d+)").expect("Major version regex is hardcoded and valid"));

static FULL_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"Chrome/(\d+\.\d+\.\d+\.\d+)").expect("Full version regex is hardcoded and valid")
});

static PLATFORM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([^;]+)").expect("Platform regex is hardcoded and valid"));

const EDGE_MARKER: &str = "Edg/";

/// Operating system family reported in client hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Any `Windows ...` platform token
    Windows,
    /// Everything else
    Linux,
}

impl Platform {
    /// Value used in `sec-ch-ua-platform`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Windows => "Windows",
            Platform::Linux => "Linux",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed view of one User-Agent string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserInfo {
    /// The original User-Agent
    pub user_agent: String,
    /// Chromium major version, empty if absent
    pub major_version: String,
    /// Four-part Chromium version, or the major version if absent
    pub full_version: String,
    /// Platform family
    pub platform: Platform,
    /// Product name
    pub brand_name: &'static str,
    /// Brand as announced in `sec-ch-ua`
    pub sec_brand_name: &'static str,
}

impl BrowserInfo {
    /// Parse a User-Agent string.
    #[must_use]
    pub fn parse(user_agent: &str) -> Self {
        let major_version = capture(&MAJOR_VERSION, user_agent).unwrap_or_default();
        let full_version =
            capture(&FULL_VERSION, user_agent).unwrap_or_else(|| major_version.clone());

        let platform = match capture(&PLATFORM, user_agent) {
            Some(token) => match token.split_whitespace().next() {
                Some(os) if !os.eq_ignore_ascii_case("windows") => Platform::Linux,
                _ => Platform::Windows,
            },
            None => Platform::Windows,
        };

        let brand = if user_agent.contains(EDGE_MARKER) {
            "Microsoft Edge"
        } else {
            "Google Chrome"
        };

        Self {
            user_agent: user_agent.to_string(),
            major_version,
            full_version,
            platform,
            brand_name: brand,
            sec_brand_name: brand,
        }
    }
}

fn capture(pattern: &Regex, haystack: &str) -> Option<String> {
    pattern
        .captures(haystack)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
