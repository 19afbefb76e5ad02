use rand::Rng;

use super::layer::{Distribution, LayerKind, LayerSpec, Span};

/// Immutable placement record for one decorative item.
///
/// Positions are viewport percentages of the item's top-left anchor; the
/// transform engine derives everything else per frame from these fields.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FoliageItem {
    pub kind: LayerKind,
    /// `(x%, y%)` in viewport-relative percentage space.
    pub base_x: f32,
    pub base_y: f32,
    /// Depth; larger items sit closer and react more to scroll.
    pub z: f32,
    /// Fixed rotation in degrees.
    pub rotation: f32,
    /// Width and height in px.
    pub width: f32,
    pub height: f32,
    pub base_opacity: f32,
    pub blur: f32,
    pub dark_only: bool,
}

impl FoliageItem {
    #[inline]
    pub fn is_flower(&self) -> bool {
        self.kind.is_flower()
    }

    /// Paint order among foliage: `floor(z * 10)`.
    #[inline]
    pub fn stacking(&self) -> i32 {
        (self.z * 10.0).floor() as i32
    }
}

/// Vertical items are this many times taller than wide.
pub const VERTICAL_ASPECT: f32 = 2.5;

/// Generates every layer's items in order. Runs once per session.
pub fn generate<R: Rng + ?Sized>(layers: &[LayerSpec], rng: &mut R) -> Vec<FoliageItem> {
    let total: usize = layers.iter().map(|l| l.count).sum();
    let mut items = Vec::with_capacity(total);

    for layer in layers {
        for _ in 0..layer.count {
            items.push(place_item(layer, rng));
        }
    }

    log::info!("foliage layout generated: {} items across {} layers", items.len(), layers.len());
    items
}

fn place_item<R: Rng + ?Sized>(layer: &LayerSpec, rng: &mut R) -> FoliageItem {
    let width = sample(rng, layer.size);
    let (base_x, base_y, rotation) = place(layer.distribution, rng);
    let height = if layer.distribution == Distribution::Vertical {
        width * VERTICAL_ASPECT
    } else {
        width
    };

    FoliageItem {
        kind: layer.kind,
        base_x,
        base_y,
        z: sample(rng, layer.depth),
        rotation,
        width,
        height,
        base_opacity: sample(rng, layer.opacity),
        blur: sample(rng, layer.blur),
        dark_only: layer.dark_only,
    }
}

/// Samples `(x%, y%, rotation°)` for one distribution.
pub fn place<R: Rng + ?Sized>(distribution: Distribution, rng: &mut R) -> (f32, f32, f32) {
    let full_turn = Span::new(0.0, 360.0);

    match distribution {
        Distribution::Full => {
            let x = sample(rng, Span::new(-10.0, 110.0));
            let y = sample(rng, Span::new(-10.0, 110.0));
            (x, y, sample(rng, full_turn))
        }
        Distribution::Edges => {
            let edge: f32 = rng.random();
            let near = Span::new(-5.0, 25.0);
            let across = Span::new(0.0, 100.0);
            let (x, y) = if edge < 0.3 {
                (sample(rng, near), sample(rng, across))
            } else if edge < 0.6 {
                (sample(rng, Span::new(70.0, 105.0)), sample(rng, across))
            } else if edge < 0.8 {
                (sample(rng, across), sample(rng, near))
            } else {
                (sample(rng, across), sample(rng, Span::new(70.0, 105.0)))
            };
            (x, y, sample(rng, full_turn))
        }
        Distribution::Vertical => {
            let x = sample(rng, Span::new(-10.0, 110.0));
            let y = sample(rng, Span::new(20.0, 100.0));
            (x, y, sample(rng, Span::new(-10.0, 10.0)))
        }
        Distribution::Corners => {
            let near = Span::new(-5.0, 20.0);
            let far = Span::new(75.0, 105.0);
            let (xs, ys) = match rng.random_range(0..4u8) {
                0 => (near, near),
                1 => (far, near),
                2 => (near, far),
                _ => (far, far),
            };
            let x = sample(rng, xs);
            let y = sample(rng, ys);
            (x, y, sample(rng, full_turn))
        }
        Distribution::Scattered => {
            let x = sample(rng, Span::new(5.0, 95.0));
            let y = sample(rng, Span::new(5.0, 95.0));
            (x, y, sample(rng, full_turn))
        }
    }
}

// `lo + U[0,1) * (hi - lo)`; tolerates fixed spans where `lo == hi`.
#[inline]
pub(crate) fn sample<R: Rng + ?Sized>(rng: &mut R, span: Span) -> f32 {
    span.lo + rng.random::<f32>() * (span.hi - span.lo)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;
    use crate::config::DeviceProfile;
    use crate::foliage::layers_for;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(0x6c6f_616d)
    }

    #[test]
    fn generates_configured_counts() {
        let layers = layers_for(DeviceProfile::Compact);
        let items = generate(&layers, &mut rng());
        assert_eq!(items.len(), 10 + 15 + 8 + 4 + 3 + 3 + 8 + 4 + 2);
        assert_eq!(items.iter().filter(|i| i.kind == LayerKind::Trunk).count(), 8);
    }

    #[test]
    fn items_respect_layer_ranges() {
        let layers = layers_for(DeviceProfile::Expanded);
        let items = generate(&layers, &mut rng());
        for item in &items {
            let layer = layers.iter().find(|l| l.kind == item.kind).unwrap();
            assert!(layer.size.contains(item.width), "{item:?}");
            assert!(layer.depth.contains(item.z), "{item:?}");
            assert!(layer.opacity.contains(item.base_opacity), "{item:?}");
            assert_eq!(item.dark_only, layer.dark_only);
        }
    }

    #[test]
    fn vertical_items_are_tall_and_upright() {
        let layers = layers_for(DeviceProfile::Expanded);
        let items = generate(&layers, &mut rng());
        for trunk in items.iter().filter(|i| i.kind == LayerKind::Trunk) {
            assert_eq!(trunk.height, trunk.width * VERTICAL_ASPECT);
            assert!(trunk.rotation >= -10.0 && trunk.rotation <= 10.0);
            assert!(trunk.base_y >= 20.0 && trunk.base_y <= 100.0);
        }
    }

    #[test]
    fn distributions_stay_in_their_bounds() {
        let mut r = rng();
        for _ in 0..500 {
            let (x, y, rot) = place(Distribution::Full, &mut r);
            assert!((-10.0..=110.0).contains(&x) && (-10.0..=110.0).contains(&y));
            assert!((0.0..=360.0).contains(&rot));

            let (x, y, _) = place(Distribution::Scattered, &mut r);
            assert!((5.0..=95.0).contains(&x) && (5.0..=95.0).contains(&y));

            let (x, y, _) = place(Distribution::Edges, &mut r);
            let near_edge = x <= 25.0 || x >= 70.0 || y <= 25.0 || y >= 70.0;
            assert!(near_edge, "edge item at ({x}, {y})");

            let (x, y, _) = place(Distribution::Corners, &mut r);
            let corner_x = x <= 20.0 || x >= 75.0;
            let corner_y = y <= 20.0 || y >= 75.0;
            assert!(corner_x && corner_y, "corner item at ({x}, {y})");
        }
    }

    #[test]
    fn edge_weights_favour_sides() {
        let mut r = rng();
        let n = 4000;
        let (mut left_mid, mut top_mid) = (0, 0);
        for _ in 0..n {
            let (x, y, _) = place(Distribution::Edges, &mut r);
            // Only the left band reaches the vertical middle on the left side,
            // and only the top band reaches the horizontal middle at the top.
            if x <= 25.0 && y > 25.0 && y < 70.0 {
                left_mid += 1;
            }
            if y <= 25.0 && x > 25.0 && x < 70.0 {
                top_mid += 1;
            }
        }
        // Expected 0.3 * 0.45 and 0.2 * 0.45.
        let left = left_mid as f32 / n as f32;
        let top = top_mid as f32 / n as f32;
        assert!(left > 0.10 && left < 0.17, "left share {left}");
        assert!(top > 0.06 && top < 0.12, "top share {top}");
    }

    #[test]
    fn stacking_is_depth_times_ten() {
        let item = FoliageItem {
            kind: LayerKind::Bone,
            base_x: 0.0,
            base_y: 0.0,
            z: 2.37,
            rotation: 0.0,
            width: 1.0,
            height: 1.0,
            base_opacity: 0.0,
            blur: 0.0,
            dark_only: true,
        };
        assert_eq!(item.stacking(), 23);
    }
}
