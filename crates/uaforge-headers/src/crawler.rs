//! Minimal header sets for search-engine crawlers.
//!
//! Sites that take bot verification seriously also check the source IP with
//! a reverse DNS lookup, so these headers only pass where the request really
//! originates from the search engine's network.

use crate::headers::Headers;
use uaforge_core::CrawlerType;

const GOOGLEBOT_FROM: &str = "googlebot(at)google.com";

/// User-Agent for a crawler. Yandex ignores `chrome_version`.
#[must_use]
pub fn crawler_user_agent(crawler: CrawlerType, chrome_version: &str) -> String {
    match crawler {
        CrawlerType::Google => format!(
            "Mozilla/5.0 AppleWebKit/537.36 (KHTML, like Gecko; compatible; Googlebot/2.1; +http://www.google.com/bot.html) Chrome/{chrome_version} Safari/537.36"
        ),
        CrawlerType::Bing => format!(
            "Mozilla/5.0 AppleWebKit/537.36 (KHTML, like Gecko; compatible; bingbot/2.0; +http://www.bing.com/bingbot.htm) Chrome/{chrome_version} Safari/537.36"
        ),
        CrawlerType::Yandex => {
            "Mozilla/5.0 (compatible; YandexBot/3.0; +http://yandex.com/bots)".to_string()
        }
    }
}

/// Header set for a crawler, built around `chrome_version`.
#[must_use]
pub fn crawler_headers(crawler: CrawlerType, chrome_version: &str) -> Headers {
    let mut headers: Headers = [
        (
            "accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        ),
        ("accept-encoding", "gzip, deflate, br"),
        // crawlers overwhelmingly announce US English
        ("accept-language", "en-US,en;q=0.9"),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value.to_string()))
    .collect();

    if crawler == CrawlerType::Google {
        headers.insert("from".to_string(), GOOGLEBOT_FROM.to_string());
    }
    headers.insert(
        "user-agent".to_string(),
        crawler_user_agent(crawler, chrome_version),
    );

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    const VERSION: &str = "141.0.7390.108";

    #[test]
    fn test_google_headers() {
        let headers = crawler_headers(CrawlerType::Google, VERSION);
        assert_eq!(headers["from"], GOOGLEBOT_FROM);
        assert!(headers["user-agent"].contains("Googlebot/2.1"));
        assert!(headers["user-agent"].contains("Chrome/141.0.7390.108 "));
        assert_eq!(headers.len(), 5);
    }

    #[test]
    fn test_bing_headers() {
        let headers = crawler_headers(CrawlerType::Bing, VERSION);
        assert!(!headers.contains_key("from"));
        assert!(headers["user-agent"].contains("bingbot/2.0"));
        assert!(headers["user-agent"].contains(VERSION));
    }

    #[test]
    fn test_yandex_has_no_version() {
        let headers = crawler_headers(CrawlerType::Yandex, VERSION);
        assert!(!headers.contains_key("from"));
        assert_eq!(
            headers["user-agent"],
            "Mozilla/5.0 (compatible; YandexBot/3.0; +http://yandex.com/bots)"
        );
        assert!(!headers["user-agent"].contains(VERSION));
    }

    #[test]
    fn test_common_headers() {
        for crawler in CrawlerType::ALL {
            let headers = crawler_headers(crawler, VERSION);
            assert_eq!(headers["accept-encoding"], "gzip, deflate, br");
            assert_eq!(headers["accept-language"], "en-US,en;q=0.9");
        }
    }
}
