//! Date-based version approximation, the last acquisition tier.
//!
//! Chrome ships a new major roughly every 31 days. Starting from a known
//! anchor release, the major, build and patch components are extrapolated
//! linearly from elapsed days. Every branch is total: out-of-range results
//! saturate at zero instead of failing.

use chrono::{DateTime, Duration, Utc};

/// 2025-05-14T00:00:00Z, release date of Chrome 136.
const ANCHOR_UNIX_SECS: i64 = 1_747_180_800;
const ANCHOR_MAJOR: f64 = 136.0;
const DAYS_PER_MAJOR: f64 = 31.0;

/// Known (major, build) pairs around the anchor.
const KNOWN_BUILDS: [(u32, f64); 4] = [(136, 7103.0), (137, 7151.0), (138, 7204.0), (139, 7258.0)];
const BUILD_STEP_PER_MAJOR: f64 = 52.0;

const PATCH_PER_DAY: f64 = 0.88;
const PATCH_OFFSET: f64 = 62.55;

/// Number of versions produced by [`approximate_versions`].
pub const APPROXIMATION_COUNT: usize = 5;

/// Compute a synthetic `MAJOR.0.BUILD.PATCH` version for the given instant.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn approximate_version(at: DateTime<Utc>) -> String {
    let elapsed_ms = at.timestamp_millis().saturating_sub(ANCHOR_UNIX_SECS * 1000);
    let days = elapsed_ms as f64 / 86_400_000.0;

    let major_exact = ANCHOR_MAJOR + days / DAYS_PER_MAJOR;
    // `as` truncates toward zero and saturates negatives at 0
    let major = major_exact as u32;

    let build = KNOWN_BUILDS
        .iter()
        .find(|(known, _)| *known == major)
        .map_or_else(|| extrapolate_build(major_exact), |(_, build)| *build);

    let patch = (PATCH_PER_DAY * days + PATCH_OFFSET).round();

    format!("{major}.0.{}.{}", build as u32, patch as u32)
}

/// Build number from the nearest edge of the known table.
fn extrapolate_build(major_exact: f64) -> f64 {
    let (first_major, first_build) = KNOWN_BUILDS[0];
    let (last_major, last_build) = KNOWN_BUILDS[KNOWN_BUILDS.len() - 1];

    if major_exact < f64::from(first_major) {
        first_build + BUILD_STEP_PER_MAJOR * (major_exact - f64::from(first_major))
    } else {
        last_build + BUILD_STEP_PER_MAJOR * (major_exact - f64::from(last_major))
    }
}

/// Approximations for `now` and the preceding weeks, most recent first.
#[must_use]
pub fn approximate_versions(now: DateTime<Utc>) -> Vec<String> {
    (0..APPROXIMATION_COUNT)
        .map(|weeks_back| {
            let offset = Duration::weeks(i64::try_from(weeks_back).unwrap_or(0));
            let at = now.checked_sub_signed(offset).unwrap_or(now);
            approximate_version(at)
        })
        .collect()
}
