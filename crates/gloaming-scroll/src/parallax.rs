//! Per-item parallax transform.
//!
//! `transform` is a pure function of `(t, item, params, dark)`: nothing is
//! carried between frames, so re-evaluating any fraction reproduces the same
//! output bit for bit.

use crate::config::ProfileParams;
use crate::foliage::FoliageItem;
use crate::zone::DarkZone;

/// Opacity of dark-only items at full darkness.
pub const DARK_ITEM_MAX_OPACITY: f32 = 0.85;

/// Opacity of flowers while the dark zone is in effect.
pub const FLOWER_DARK_OPACITY: f32 = 0.05;

/// Ceiling for regular foliage opacity inside the dark zone.
pub const FOLIAGE_DARK_OPACITY: f32 = 0.4;

/// Resting scale of dark-only items before darkness grows them.
pub const DARK_ITEM_BASE_SCALE: f32 = 0.3;

/// Render transform for one item.
///
/// Apply as translate, then scale, then rotate.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ItemTransform {
    /// Offset from the base position in px.
    pub translate: (f32, f32),
    pub scale: f32,
    /// Degrees; always the item's base rotation.
    pub rotation: f32,
    pub opacity: f32,
}

/// Computes an item's transform at scroll fraction `t`.
pub fn transform(t: f32, item: &FoliageItem, params: &ProfileParams, dark: &DarkZone) -> ItemTransform {
    let dx = item.base_x - 50.0;
    let dy = item.base_y - 50.0;
    let intensity = dark.intensity(t);

    let (gain, scale, opacity) = if item.dark_only {
        let gain = intensity * params.dark_spread * item.z / 50.0;
        let scale = DARK_ITEM_BASE_SCALE + intensity * item.z * params.zoom_multiplier;
        (gain, scale, intensity * DARK_ITEM_MAX_OPACITY)
    } else {
        let spread_factor = 0.5 + (dx * dx + dy * dy).sqrt() / 70.0;
        let gain = t * params.spread_multiplier * item.z * spread_factor / 50.0;
        let scale = 1.0 + t * item.z * params.scale_multiplier;
        let opacity = if dark.contains(t) {
            if item.is_flower() {
                FLOWER_DARK_OPACITY
            } else {
                (1.0 - intensity) * FOLIAGE_DARK_OPACITY
            }
        } else {
            item.base_opacity
        };
        (gain, scale, opacity)
    };

    ItemTransform {
        translate: (dx * gain, dy * gain),
        scale,
        rotation: item.rotation,
        opacity,
    }
}

/// Transforms for every item, in item order.
pub fn transform_all(
    t: f32,
    items: &[FoliageItem],
    params: &ProfileParams,
    dark: &DarkZone,
) -> Vec<ItemTransform> {
    items.iter().map(|item| transform(t, item, params, dark)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foliage::LayerKind;

    const DARK: DarkZone = DarkZone::new(0.38, 0.55, 0.72);

    fn item(kind: LayerKind, x: f32, y: f32, z: f32, dark_only: bool) -> FoliageItem {
        FoliageItem {
            kind,
            base_x: x,
            base_y: y,
            z,
            rotation: 33.0,
            width: 100.0,
            height: 100.0,
            base_opacity: 0.7,
            blur: 0.0,
            dark_only,
        }
    }

    #[test]
    fn centered_item_never_moves() {
        let leaf = item(LayerKind::MidgroundLeaves, 50.0, 50.0, 2.0, false);
        for t in [0.0, 0.3, 1.0] {
            let tr = transform(t, &leaf, &ProfileParams::EXPANDED, &DARK);
            assert_eq!(tr.translate, (0.0, 0.0));
        }
    }

    #[test]
    fn regular_item_spreads_and_grows_with_scroll() {
        let leaf = item(LayerKind::ForegroundLeaves, 85.0, 50.0, 2.0, false);
        let p = ProfileParams::EXPANDED;
        let tr = transform(0.2, &leaf, &p, &DARK);
        // dx = 35, dist = 35, spread_factor = 1.0
        let expected = 35.0 * (0.2 * 120.0) * 2.0 * 1.0 / 50.0;
        assert!((tr.translate.0 - expected).abs() < 1e-3);
        assert_eq!(tr.translate.1, 0.0);
        assert!((tr.scale - (1.0 + 0.2 * 2.0 * 0.2)).abs() < 1e-6);
        assert_eq!(tr.opacity, 0.7);
        assert_eq!(tr.rotation, 33.0);
    }

    #[test]
    fn top_of_page_is_identity_for_regular_items() {
        let leaf = item(LayerKind::BackgroundLeaves, 10.0, 90.0, 0.8, false);
        let tr = transform(0.0, &leaf, &ProfileParams::COMPACT, &DARK);
        assert_eq!(tr.translate, (0.0, 0.0));
        assert_eq!(tr.scale, 1.0);
        assert_eq!(tr.opacity, leaf.base_opacity);
    }

    #[test]
    fn dark_items_peak_at_dark_peak() {
        let trunk = item(LayerKind::Trunk, 20.0, 80.0, 1.5, true);
        let p = ProfileParams::EXPANDED;
        let tr = transform(0.55, &trunk, &p, &DARK);
        assert_eq!(tr.opacity, DARK_ITEM_MAX_OPACITY);
        assert!((tr.scale - (0.3 + 1.5 * 1.2)).abs() < 1e-6);
        let gain = 30.0 * 1.5 / 50.0;
        assert!((tr.translate.0 - (-30.0 * gain)).abs() < 1e-4);
        assert!((tr.translate.1 - (30.0 * gain)).abs() < 1e-4);
    }

    #[test]
    fn dark_items_hidden_outside_dark_zone() {
        let web = item(LayerKind::Web, 0.0, 0.0, 2.0, true);
        for t in [0.0, 0.2, 0.38, 0.72, 0.9, 1.0] {
            let tr = transform(t, &web, &ProfileParams::EXPANDED, &DARK);
            assert_eq!(tr.opacity, 0.0, "t={t}");
            assert_eq!(tr.scale, DARK_ITEM_BASE_SCALE);
            assert_eq!(tr.translate, (0.0, 0.0));
        }
    }

    #[test]
    fn flowers_nearly_vanish_in_the_dark() {
        let flower = item(LayerKind::YellowFlower, 40.0, 40.0, 3.0, false);
        let leaf = item(LayerKind::MidgroundLeaves, 40.0, 40.0, 3.0, false);
        let p = ProfileParams::EXPANDED;
        assert_eq!(transform(0.5, &flower, &p, &DARK).opacity, FLOWER_DARK_OPACITY);
        assert_eq!(transform(0.55, &leaf, &p, &DARK).opacity, 0.0);
        // Zone edges count as inside: intensity 0 gives the full dark ceiling.
        assert_eq!(transform(0.38, &leaf, &p, &DARK).opacity, FOLIAGE_DARK_OPACITY);
        assert_eq!(transform(0.8, &flower, &p, &DARK).opacity, 0.7);
    }

    #[test]
    fn repeated_evaluation_is_bit_identical() {
        let items = [
            item(LayerKind::Bone, 12.5, 77.0, 2.2, true),
            item(LayerKind::PinkFlower, 61.0, 8.0, 3.1, false),
            item(LayerKind::BackgroundLeaves, -8.0, 104.0, 0.6, false),
        ];
        for p in [ProfileParams::COMPACT, ProfileParams::EXPANDED] {
            for i in 0..=100 {
                let t = i as f32 / 100.0;
                let a = transform_all(t, &items, &p, &DARK);
                let b = transform_all(t, &items, &p, &DARK);
                for (x, y) in a.iter().zip(&b) {
                    assert_eq!(x.translate.0.to_bits(), y.translate.0.to_bits());
                    assert_eq!(x.translate.1.to_bits(), y.translate.1.to_bits());
                    assert_eq!(x.scale.to_bits(), y.scale.to_bits());
                    assert_eq!(x.opacity.to_bits(), y.opacity.to_bits());
                }
            }
        }
    }
}
