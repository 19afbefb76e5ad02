//! Narrative configuration.
//!
//! All tunables live in plain structs whose `Default` is the shipped page.
//! A device-class profile is chosen once at load from the viewport width and
//! never revisited.

use crate::color::{ColorStop, SKY_STOPS};
use crate::sprite::SpawnerSpec;
use crate::zone::{DarkZone, Zone};

/// Device class, selected once from the viewport width at load.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DeviceProfile {
    /// Narrow viewports: fewer items, gentler motion.
    Compact,
    /// Everything else.
    Expanded,
}

impl DeviceProfile {
    /// `Compact` when `viewport_width <= compact_max_width`.
    #[inline]
    pub fn from_viewport_width(viewport_width: f32, compact_max_width: f32) -> Self {
        if viewport_width <= compact_max_width {
            DeviceProfile::Compact
        } else {
            DeviceProfile::Expanded
        }
    }

    #[inline]
    pub fn params(self) -> ProfileParams {
        match self {
            DeviceProfile::Compact => ProfileParams::COMPACT,
            DeviceProfile::Expanded => ProfileParams::EXPANDED,
        }
    }

    #[inline]
    pub fn counts(self) -> FoliageCounts {
        match self {
            DeviceProfile::Compact => FoliageCounts::COMPACT,
            DeviceProfile::Expanded => FoliageCounts::EXPANDED,
        }
    }

    #[inline]
    pub fn is_compact(self) -> bool {
        self == DeviceProfile::Compact
    }
}

/// Parallax multipliers for one device class.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ProfileParams {
    /// Outward drift of regular foliage per unit of scroll.
    pub spread_multiplier: f32,
    /// Zoom of dark-only items at full darkness.
    pub zoom_multiplier: f32,
    /// Outward drift of dark-only items at full darkness.
    pub dark_spread: f32,
    /// Growth of regular foliage per unit of scroll.
    pub scale_multiplier: f32,
}

impl ProfileParams {
    pub const COMPACT: Self = Self {
        spread_multiplier: 60.0,
        zoom_multiplier: 0.6,
        dark_spread: 15.0,
        scale_multiplier: 0.1,
    };

    pub const EXPANDED: Self = Self {
        spread_multiplier: 120.0,
        zoom_multiplier: 1.2,
        dark_spread: 30.0,
        scale_multiplier: 0.2,
    };
}

/// Items per foliage layer for one device class.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FoliageCounts {
    pub background_leaves: usize,
    pub midground_leaves: usize,
    pub foreground_leaves: usize,
    /// Pink flowers; yellow and blue each get 80% of this.
    pub flowers: usize,
    pub trunks: usize,
    pub webs: usize,
    pub bones: usize,
}

impl FoliageCounts {
    pub const COMPACT: Self = Self {
        background_leaves: 10,
        midground_leaves: 15,
        foreground_leaves: 8,
        flowers: 4,
        trunks: 8,
        webs: 4,
        bones: 2,
    };

    pub const EXPANDED: Self = Self {
        background_leaves: 30,
        midground_leaves: 40,
        foreground_leaves: 25,
        flowers: 10,
        trunks: 20,
        webs: 12,
        bones: 5,
    };

    /// Yellow and blue flower count: `floor(flowers * 0.8)`.
    #[inline]
    pub fn secondary_flowers(self) -> usize {
        self.flowers * 4 / 5
    }
}

/// Fractions at which page chrome changes state.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ChromeThresholds {
    /// Entry screen hides once `t` exceeds this.
    pub entry_hidden_after: f32,
    /// Nav bar is dark strictly inside this range.
    pub nav_dark: (f32, f32),
    /// Scroll hint is visible strictly inside this range.
    pub hint_visible: (f32, f32),
}

impl Default for ChromeThresholds {
    fn default() -> Self {
        Self {
            entry_hidden_after: 0.01,
            nav_dark: (0.4, 0.7),
            hint_visible: (0.15, 0.85),
        }
    }
}

/// Top-level configuration for a narrative session.
#[derive(Debug, Clone)]
pub struct NarrativeConfig {
    /// Content sections in document order.
    pub sections: Vec<Zone>,
    pub dark: DarkZone,
    pub fairy: SpawnerSpec,
    pub wraith: SpawnerSpec,
    pub sky: Vec<ColorStop>,
    pub chrome: ChromeThresholds,
    /// Viewport widths at or below this select [`DeviceProfile::Compact`].
    pub compact_max_width: f32,
}

impl NarrativeConfig {
    #[inline]
    pub fn profile_for(&self, viewport_width: f32) -> DeviceProfile {
        DeviceProfile::from_viewport_width(viewport_width, self.compact_max_width)
    }
}

impl Default for NarrativeConfig {
    fn default() -> Self {
        Self {
            sections: vec![
                Zone::new(0.0, 0.22),
                Zone::new(0.22, 0.45),
                Zone::new(0.45, 0.72),
                Zone::new(0.72, 1.0),
            ],
            dark: DarkZone::new(0.38, 0.55, 0.72),
            fairy: SpawnerSpec::fairy(),
            wraith: SpawnerSpec::wraith(),
            sky: SKY_STOPS.to_vec(),
            chrome: ChromeThresholds::default(),
            compact_max_width: 600.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_threshold_is_inclusive() {
        assert_eq!(DeviceProfile::from_viewport_width(600.0, 600.0), DeviceProfile::Compact);
        assert_eq!(DeviceProfile::from_viewport_width(601.0, 600.0), DeviceProfile::Expanded);
        assert_eq!(DeviceProfile::from_viewport_width(320.0, 600.0), DeviceProfile::Compact);
    }

    #[test]
    fn secondary_flowers_floor() {
        assert_eq!(FoliageCounts::COMPACT.secondary_flowers(), 3);
        assert_eq!(FoliageCounts::EXPANDED.secondary_flowers(), 8);
    }

    #[test]
    fn default_sections_tile_the_document() {
        let cfg = NarrativeConfig::default();
        assert_eq!(cfg.sections.first().map(|s| s.start), Some(0.0));
        assert_eq!(cfg.sections.last().map(|s| s.end), Some(1.0));
        for pair in cfg.sections.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }
}
