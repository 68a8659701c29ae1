//! Screen resolutions and viewport geometry.

use rand::seq::SliceRandom;
use rand::Rng;

/// A desktop screen resolution in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenResolution {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

/// Popular desktop resolutions, most common first.
/// <https://gs.statcounter.com/screen-resolution-stats/desktop/worldwide>
pub const COMMON_RESOLUTIONS: [ScreenResolution; 6] = [
    ScreenResolution { width: 1920, height: 1080 }, // ~24%
    ScreenResolution { width: 1366, height: 768 },  // ~11%
    ScreenResolution { width: 1536, height: 864 },  // ~11%
    ScreenResolution { width: 1280, height: 720 },  // ~6%
    ScreenResolution { width: 1440, height: 900 },  // ~4%
    ScreenResolution { width: 2560, height: 1440 }, // ~3%
];

/// Vertical space taken by title bar, toolbars and the OS taskbar.
pub const HEIGHT_SUBTRACTIONS: [u32; 4] = [90, 128, 150, 188];

/// Horizontal space taken by scrollbars, side panels and window borders.
pub const WIDTH_SUBTRACTIONS: [u32; 4] = [2, 4, 64, 128];

/// Renderable area inside a browser window on a given screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Screen the viewport was derived from
    pub screen: ScreenResolution,
    /// Viewport width
    pub width: u32,
    /// Viewport height
    pub height: u32,
}

impl Viewport {
    /// Pick a random screen and carve a plausible viewport out of it.
    ///
    /// The viewport is always strictly smaller than the screen in both
    /// dimensions.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let screen = *COMMON_RESOLUTIONS
            .choose(rng)
            .unwrap_or(&COMMON_RESOLUTIONS[0]);
        let height_cut = *HEIGHT_SUBTRACTIONS.choose(rng).unwrap_or(&HEIGHT_SUBTRACTIONS[0]);
        let width_cut = *WIDTH_SUBTRACTIONS.choose(rng).unwrap_or(&WIDTH_SUBTRACTIONS[0]);

        Self {
            screen,
            width: screen.width - width_cut,
            height: screen.height - height_cut,
        }
    }
}
