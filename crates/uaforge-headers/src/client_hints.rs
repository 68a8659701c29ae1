//! `sec-ch-ua` brand list with a GREASE entry.
//!
//! Real Chromium adds one deliberately meaningless brand to the list so that
//! servers cannot hard-code its size or contents. See
//! <https://wicg.github.io/ua-client-hints/#grease>.

use crate::browser::BrowserInfo;
use rand::seq::SliceRandom;
use rand::Rng;

const GREASE_BASE_BRAND: &str = "Not A Brand";

/// Separator characters substituted for spaces. Repeats raise their odds.
const GREASE_CHARS: &[u8] = b" ;;:/??==()__-.";

/// GREASE versions. "99" dominates in the wild.
const GREASE_VERSIONS: [&str; 6] = ["8", "24", "99", "99", "99", "99"];

/// A randomized placeholder brand and its version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreaseBrand {
    /// Obfuscated brand name, e.g. `Not?A_Brand`
    pub brand: String,
    /// Placeholder version
    pub version: &'static str,
}

impl GreaseBrand {
    /// Generate a fresh GREASE brand.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let brand = GREASE_BASE_BRAND
            .chars()
            .map(|c| match (c, GREASE_CHARS.choose(rng)) {
                (' ', Some(&sub)) => char::from(sub),
                _ => c,
            })
            .collect();
        let version = GREASE_VERSIONS.choose(rng).copied().unwrap_or("99");

        Self { brand, version }
    }
}

/// Build the `sec-ch-ua` value for a parsed User-Agent.
///
/// The GREASE entry lands at a random position; Chromium always precedes
/// the browser brand.
pub fn sec_ch_ua<R: Rng + ?Sized>(rng: &mut R, info: &BrowserInfo) -> String {
    let grease = GreaseBrand::generate(rng);

    let mut entries = vec![
        brand_entry("Chromium", &info.major_version),
        brand_entry(info.sec_brand_name, &info.major_version),
    ];
    let position = rng.gen_range(0..=entries.len());
    entries.insert(position, brand_entry(&grease.brand, grease.version));

    entries.join(", ")
}

fn brand_entry(brand: &str, version: &str) -> String {
    format!("\"{brand}\";v=\"{version}\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user_agent::edge_user_agent;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_grease_brand_shape() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..100 {
            let grease = GreaseBrand::generate(&mut rng);
            assert_eq!(grease.brand.len(), GREASE_BASE_BRAND.len());
            assert!(grease.brand.starts_with("Not"));
            assert!(grease.brand.ends_with("Brand"));
            assert!(!grease.brand.contains('"'));
            assert!(GREASE_VERSIONS.contains(&grease.version));
        }
    }

    #[test]
    fn test_grease_varies() {
        let mut rng = SmallRng::seed_from_u64(3);
        let brands: HashSet<_> = (0..50)
            .map(|_| GreaseBrand::generate(&mut rng).brand)
            .collect();
        assert!(brands.len() > 1, "Expected variation in GREASE brands");
    }

    #[test]
    fn test_sec_ch_ua_contains_real_brands() {
        let mut rng = SmallRng::seed_from_u64(11);
        let info = BrowserInfo::parse(&edge_user_agent("141.0.3537.57"));

        let value = sec_ch_ua(&mut rng, &info);
        assert!(value.contains("\"Chromium\";v=\"141\""));
        assert!(value.contains("\"Microsoft Edge\";v=\"141\""));
        assert_eq!(value.matches(";v=").count(), 3);

        let chromium = value.find("Chromium").expect("chromium entry");
        let edge = value.find("Microsoft Edge").expect("edge entry");
        assert!(chromium < edge);
    }
}
