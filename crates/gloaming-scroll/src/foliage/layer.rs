use crate::config::DeviceProfile;

/// What a foliage item depicts. Hosts pick artwork/tint from this.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LayerKind {
    BackgroundLeaves,
    MidgroundLeaves,
    ForegroundLeaves,
    PinkFlower,
    YellowFlower,
    BlueFlower,
    Trunk,
    Web,
    Bone,
}

impl LayerKind {
    #[inline]
    pub fn is_flower(self) -> bool {
        matches!(self, LayerKind::PinkFlower | LayerKind::YellowFlower | LayerKind::BlueFlower)
    }
}

/// Spatial distribution strategy for a layer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Distribution {
    /// Anywhere, slightly overflowing the viewport.
    Full,
    /// Bands along the four viewport edges.
    Edges,
    /// Standing/hanging objects: low half of the page, near-upright.
    Vertical,
    /// Bands around the four corners.
    Corners,
    /// Safely inset from every edge.
    Scattered,
}

/// Closed `[lo, hi]` range sampled uniformly.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Span {
    pub lo: f32,
    pub hi: f32,
}

impl Span {
    #[inline]
    pub const fn new(lo: f32, hi: f32) -> Self {
        Self { lo, hi }
    }

    #[inline]
    pub const fn fixed(v: f32) -> Self {
        Self { lo: v, hi: v }
    }

    #[inline]
    pub fn contains(self, v: f32) -> bool {
        v >= self.lo && v <= self.hi
    }
}

/// Everything needed to populate one layer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayerSpec {
    pub kind: LayerKind,
    pub count: usize,
    /// Width in px.
    pub size: Span,
    /// Depth; larger is closer and moves more.
    pub depth: Span,
    pub opacity: Span,
    /// Blur radius in px.
    pub blur: Span,
    pub distribution: Distribution,
    /// Invisible outside the dark zone.
    pub dark_only: bool,
}

/// The nine layers in back-to-front creation order.
pub fn layers_for(profile: DeviceProfile) -> [LayerSpec; 9] {
    let counts = profile.counts();
    let secondary = counts.secondary_flowers();
    let bg_blur = if profile.is_compact() { Span::fixed(0.0) } else { Span::new(1.0, 3.0) };
    let none = Span::fixed(0.0);

    let flower = |kind, count, size| LayerSpec {
        kind,
        count,
        size,
        depth: Span::new(2.5, 3.5),
        opacity: Span::fixed(0.9),
        blur: none,
        distribution: Distribution::Scattered,
        dark_only: false,
    };

    [
        LayerSpec {
            kind: LayerKind::BackgroundLeaves,
            count: counts.background_leaves,
            size: Span::new(80.0, 150.0),
            depth: Span::new(0.5, 1.0),
            opacity: Span::new(0.4, 0.6),
            blur: bg_blur,
            distribution: Distribution::Full,
            dark_only: false,
        },
        LayerSpec {
            kind: LayerKind::MidgroundLeaves,
            count: counts.midground_leaves,
            size: Span::new(120.0, 220.0),
            depth: Span::new(1.0, 2.0),
            opacity: Span::new(0.6, 0.8),
            blur: none,
            distribution: Distribution::Full,
            dark_only: false,
        },
        LayerSpec {
            kind: LayerKind::ForegroundLeaves,
            count: counts.foreground_leaves,
            size: Span::new(180.0, 320.0),
            depth: Span::new(2.0, 3.5),
            opacity: Span::new(0.8, 1.0),
            blur: none,
            distribution: Distribution::Edges,
            dark_only: false,
        },
        flower(LayerKind::PinkFlower, counts.flowers, Span::new(35.0, 60.0)),
        flower(LayerKind::YellowFlower, secondary, Span::new(30.0, 50.0)),
        flower(LayerKind::BlueFlower, secondary, Span::new(32.0, 55.0)),
        LayerSpec {
            kind: LayerKind::Trunk,
            count: counts.trunks,
            size: Span::new(200.0, 450.0),
            depth: Span::new(0.5, 3.0),
            opacity: none,
            blur: none,
            distribution: Distribution::Vertical,
            dark_only: true,
        },
        LayerSpec {
            kind: LayerKind::Web,
            count: counts.webs,
            size: Span::new(100.0, 200.0),
            depth: Span::new(1.0, 3.0),
            opacity: none,
            blur: none,
            distribution: Distribution::Corners,
            dark_only: true,
        },
        LayerSpec {
            kind: LayerKind::Bone,
            count: counts.bones,
            size: Span::new(60.0, 120.0),
            depth: Span::new(1.5, 3.0),
            opacity: none,
            blur: none,
            distribution: Distribution::Scattered,
            dark_only: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_layers_use_compact_counts() {
        let layers = layers_for(DeviceProfile::Compact);
        let counts: Vec<usize> = layers.iter().map(|l| l.count).collect();
        assert_eq!(counts, vec![10, 15, 8, 4, 3, 3, 8, 4, 2]);
        assert_eq!(layers[0].blur, Span::fixed(0.0));
    }

    #[test]
    fn expanded_background_is_blurred() {
        let layers = layers_for(DeviceProfile::Expanded);
        assert_eq!(layers[0].blur, Span::new(1.0, 3.0));
        assert_eq!(layers.iter().map(|l| l.count).sum::<usize>(), 30 + 40 + 25 + 10 + 8 + 8 + 20 + 12 + 5);
    }

    #[test]
    fn only_trunks_webs_bones_are_dark() {
        for l in layers_for(DeviceProfile::Expanded) {
            let dark = matches!(l.kind, LayerKind::Trunk | LayerKind::Web | LayerKind::Bone);
            assert_eq!(l.dark_only, dark, "{:?}", l.kind);
        }
    }
}
