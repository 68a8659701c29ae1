//! Desktop User-Agent templates.

use rand::seq::SliceRandom;
use rand::Rng;

/// Render the Chrome-only desktop User-Agent for a version.
#[must_use]
pub fn chrome_user_agent(version: &str) -> String {
    format!(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{version} Safari/537.36"
    )
}

/// Render the Edge desktop User-Agent for a version.
///
/// Edge builds share their Chromium version number, so the same value fills
/// both the `Chrome/` and `Edg/` tokens.
#[must_use]
pub fn edge_user_agent(version: &str) -> String {
    format!(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{version} Safari/537.36 Edg/{version}"
    )
}

/// Pick a random version and render it as Chrome or Edge with equal odds.
///
/// Returns `None` when `versions` is empty.
pub fn random_user_agent<R: Rng + ?Sized>(rng: &mut R, versions: &[String]) -> Option<String> {
    let version = versions.choose(rng)?;
    if rng.gen_bool(0.5) {
        Some(chrome_user_agent(version))
    } else {
        Some(edge_user_agent(version))
    }
}
