//! uaforge Headers - request-header synthesis.
//!
//! Turns a User-Agent string into a complete, self-consistent browser header
//! set (client hints, GREASE brand, viewport geometry), and builds minimal
//! header sets for known search-engine crawlers.
//!
//! # Example
//!
//! ```rust
//! use uaforge_headers::{browser_headers, chrome_user_agent};
//!
//! let ua = chrome_user_agent("141.0.7390.108");
//! let headers = browser_headers(&ua, Some("https://api.example.com/v1/data"));
//! assert_eq!(headers["origin"], "https://api.example.com");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod browser;
pub mod client_hints;
pub mod crawler;
pub mod headers;
pub mod screen;
pub mod user_agent;

// Re-export commonly used types
pub use browser::{BrowserInfo, Platform};
pub use client_hints::{sec_ch_ua, GreaseBrand};
pub use crawler::{crawler_headers, crawler_user_agent};
pub use headers::{browser_headers, browser_headers_with, Headers, FALLBACK_REFERER};
pub use screen::{ScreenResolution, Viewport, COMMON_RESOLUTIONS};
pub use user_agent::{chrome_user_agent, edge_user_agent, random_user_agent};
