//! Full browser request-header sets derived from a User-Agent.
//!
//! Everything is reconstructed from the User-Agent so the result is
//! self-consistent: client hints announce the same major version and brand
//! as the `user-agent` line, and the viewport fits inside a real screen.

use crate::browser::BrowserInfo;
use crate::client_hints::sec_ch_ua;
use crate::screen::Viewport;
use rand::Rng;
use std::collections::HashMap;
use url::Url;

/// Header name to value, all names lower-case.
pub type Headers = HashMap<String, String>;

/// Referer used when no usable target URL is given.
pub const FALLBACK_REFERER: &str = "https://www.google.com";

const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";

/// `sec-ch-ua-platform-version` for Windows 11 24H2.
const PLATFORM_VERSION: &str = "\"19.0.0\"";

/// Build a browser header set for `user_agent` using the thread-local RNG.
///
/// When `target_url` parses to an absolute URL with a host, `referer` and
/// `origin` are both set to its scheme and host. Otherwise `referer` falls
/// back to [`FALLBACK_REFERER`] and `origin` is left out.
#[must_use]
pub fn browser_headers(user_agent: &str, target_url: Option<&str>) -> Headers {
    browser_headers_with(&mut rand::thread_rng(), user_agent, target_url)
}

/// Same as [`browser_headers`] with a caller-supplied RNG.
pub fn browser_headers_with<R: Rng + ?Sized>(
    rng: &mut R,
    user_agent: &str,
    target_url: Option<&str>,
) -> Headers {
    let info = BrowserInfo::parse(user_agent);
    let origin = target_url.and_then(origin_of);
    let referer = origin
        .clone()
        .unwrap_or_else(|| FALLBACK_REFERER.to_string());
    let viewport = Viewport::random(rng);

    let mut headers: Headers = [
        ("user-agent", info.user_agent.clone()),
        ("accept", ACCEPT.to_string()),
        ("accept-language", "en-US,en;q=0.9".to_string()),
        ("referer", referer),
        ("connection", "keep-alive".to_string()),
        ("sec-ch-ua", sec_ch_ua(rng, &info)),
        ("sec-ch-ua-full-version", quoted(&info.full_version)),
        ("sec-ch-ua-mobile", "?0".to_string()),
        ("sec-ch-ua-platform", quoted(info.platform.as_str())),
        ("sec-ch-ua-arch", quoted("x86")),
        ("sec-ch-ua-bitness", quoted("64")),
        ("sec-ch-ua-form-factors", quoted("Desktop")),
        ("sec-ch-ua-platform-version", PLATFORM_VERSION.to_string()),
        ("sec-ch-ua-model", quoted("")),
        ("sec-ch-viewport-height", quoted(&viewport.height.to_string())),
        ("sec-ch-viewport-width", quoted(&viewport.width.to_string())),
        ("sec-fetch-dest", "document".to_string()),
        ("sec-fetch-mode", "navigate".to_string()),
        ("sec-fetch-site", "same-origin".to_string()),
        ("sec-fetch-user", "?1".to_string()),
        ("upgrade-insecure-requests", "1".to_string()),
        ("priority", "u=0, i".to_string()),
    ]
    .into_iter()
    .map(|(name, value)| (name.to_string(), value))
    .collect();

    if let Some(origin) = origin {
        headers.insert("origin".to_string(), origin);
    }

    headers
}

/// `scheme://host[:port]` of an absolute URL, if it has a host.
fn origin_of(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    let url = Url::parse(raw).ok()?;
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}://{host}:{port}", url.scheme()),
        None => format!("{}://{host}", url.scheme()),
    })
}

fn quoted(value: &str) -> String {
    format!("\"{value}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::{COMMON_RESOLUTIONS, HEIGHT_SUBTRACTIONS, WIDTH_SUBTRACTIONS};
    use crate::user_agent::{chrome_user_agent, edge_user_agent};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn unquote(value: &str) -> &str {
        value.trim_matches('"')
    }

    #[test]
    fn test_without_url_uses_fallback_referer() {
        let headers = browser_headers(&chrome_user_agent("141.0.7390.108"), None);
        assert_eq!(headers["referer"], FALLBACK_REFERER);
        assert!(!headers.contains_key("origin"));
    }

    #[test]
    fn test_with_url_sets_referer_and_origin() {
        let headers = browser_headers(
            &chrome_user_agent("141.0.7390.108"),
            Some("https://api.example.com/v1/data"),
        );
        assert_eq!(headers["referer"], "https://api.example.com");
        assert_eq!(headers["origin"], "https://api.example.com");
    }

    #[test]
    fn test_url_port_is_kept() {
        let headers = browser_headers(
            &chrome_user_agent("141.0.7390.108"),
            Some("http://localhost:8080/login?next=/"),
        );
        assert_eq!(headers["origin"], "http://localhost:8080");
    }

    #[test]
    fn test_unusable_urls_fall_back() {
        for raw in ["", "not a url", "/relative/path", "mailto:someone@example.com"] {
            let headers = browser_headers(&chrome_user_agent("141.0.7390.108"), Some(raw));
            assert_eq!(headers["referer"], FALLBACK_REFERER, "input {raw:?}");
            assert!(!headers.contains_key("origin"), "input {raw:?}");
        }
    }

    #[test]
    fn test_baseline_headers_present() {
        let headers = browser_headers(&edge_user_agent("141.0.3537.57"), None);
        for name in [
            "user-agent",
            "accept",
            "accept-language",
            "connection",
            "sec-fetch-dest",
            "sec-fetch-mode",
            "sec-fetch-site",
            "sec-fetch-user",
            "upgrade-insecure-requests",
            "priority",
            "sec-ch-ua",
            "sec-ch-ua-platform",
            "sec-ch-viewport-height",
            "sec-ch-viewport-width",
        ] {
            assert!(headers.contains_key(name), "missing {name}");
        }
        assert!(headers.keys().all(|k| k == &k.to_lowercase()));
        assert_eq!(headers.len(), 22);
        assert_eq!(headers["sec-ch-ua-platform"], "\"Windows\"");
        assert_eq!(headers["sec-ch-ua-full-version"], "\"141.0.3537.57\"");
    }

    #[test]
    fn test_client_hints_match_user_agent() {
        let mut rng = SmallRng::seed_from_u64(5);
        for version in ["141.0.7390.108", "99.0.4844.51", "152.0.7975.521"] {
            for ua in [chrome_user_agent(version), edge_user_agent(version)] {
                let headers = browser_headers_with(&mut rng, &ua, None);
                let major = version.split('.').next().expect("major");
                assert!(headers["sec-ch-ua"].contains(&format!("\"Chromium\";v=\"{major}\"")));
                assert!(headers["user-agent"].contains(&format!("Chrome/{major}.")));
            }
        }
    }

    #[test]
    fn test_viewport_headers_fit_screen() {
        let mut rng = SmallRng::seed_from_u64(8);
        for _ in 0..200 {
            let headers = browser_headers_with(&mut rng, &chrome_user_agent("141.0.7390.108"), None);
            let height: u32 = unquote(&headers["sec-ch-viewport-height"])
                .parse()
                .expect("numeric height");
            let width: u32 = unquote(&headers["sec-ch-viewport-width"])
                .parse()
                .expect("numeric width");

            assert!(COMMON_RESOLUTIONS.iter().any(|screen| {
                height < screen.height
                    && width < screen.width
                    && HEIGHT_SUBTRACTIONS.contains(&(screen.height - height))
                    && WIDTH_SUBTRACTIONS.contains(&(screen.width - width))
            }));
        }
    }

    #[test]
    fn test_returned_map_is_owned() {
        let mut headers = browser_headers(&chrome_user_agent("141.0.7390.108"), None);
        headers.insert("cookie".to_string(), "a=b".to_string());
        headers.remove("priority");

        let fresh = browser_headers(&chrome_user_agent("141.0.7390.108"), None);
        assert!(fresh.contains_key("priority"));
        assert!(!fresh.contains_key("cookie"));
    }
}
