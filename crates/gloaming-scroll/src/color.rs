//! Sky color interpolation.
//!
//! Colors here are straight sRGB bytes, the form they take in the page palette.
//! Hosts convert to their own (premultiplied, linear, ...) representation.

use std::fmt;

/// 8-bit sRGB color.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from a `0xRRGGBB` literal.
    #[inline]
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({},{},{})", self.r, self.g, self.b)
    }
}

/// A single stop on the sky ramp.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStop {
    /// Scroll fraction in `[0, 1]`.
    pub position: f32,
    pub color: Rgb,
}

impl ColorStop {
    #[inline]
    pub const fn new(position: f32, color: Rgb) -> Self {
        Self { position, color }
    }
}

/// Sky ramp: parchment, sage, dusk, night, night, dusk, sage, parchment.
pub const SKY_STOPS: [ColorStop; 9] = [
    ColorStop::new(0.0, Rgb::from_hex(0xf8f4ef)),
    ColorStop::new(0.2, Rgb::from_hex(0xe8f0e8)),
    ColorStop::new(0.35, Rgb::from_hex(0xd0e0d0)),
    ColorStop::new(0.45, Rgb::from_hex(0x4a5060)),
    ColorStop::new(0.55, Rgb::from_hex(0x1a1a28)),
    ColorStop::new(0.65, Rgb::from_hex(0x1a1a28)),
    ColorStop::new(0.75, Rgb::from_hex(0x5a6070)),
    ColorStop::new(0.85, Rgb::from_hex(0xe0e8e0)),
    ColorStop::new(1.0, Rgb::from_hex(0xf8f4ef)),
];

/// Piecewise-linear color lookup over ordered stops.
///
/// The first bracket with `lo.position <= t <= hi.position` wins, so a `t` that
/// lands exactly on a stop resolves to that stop's color. Outside the stop
/// range the nearest endpoint color is returned. An empty slice yields black.
pub fn interpolate(stops: &[ColorStop], t: f32) -> Rgb {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return Rgb::default();
    };

    let (lo, hi) = stops
        .windows(2)
        .find(|w| t >= w[0].position && t <= w[1].position)
        .map(|w| (w[0], w[1]))
        .unwrap_or_else(|| if t < first.position { (*first, *first) } else { (*last, *last) });

    let span = hi.position - lo.position;
    let u = if span == 0.0 { 0.0 } else { (t - lo.position) / span };

    Rgb::new(
        lerp_channel(lo.color.r, hi.color.r, u),
        lerp_channel(lo.color.g, hi.color.g, u),
        lerp_channel(lo.color.b, hi.color.b, u),
    )
}

#[inline]
fn lerp_channel(a: u8, b: u8, u: f32) -> u8 {
    let v = a as f32 + (b as f32 - a as f32) * u;
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_literal_splits_channels() {
        assert_eq!(Rgb::from_hex(0x1a1a28), Rgb::new(0x1a, 0x1a, 0x28));
        assert_eq!(Rgb::from_hex(0xf8f4ef).to_string(), "rgb(248,244,239)");
    }

    #[test]
    fn exact_stop_positions_return_stop_colors() {
        for stop in SKY_STOPS {
            assert_eq!(interpolate(&SKY_STOPS, stop.position), stop.color, "at {}", stop.position);
        }
    }

    #[test]
    fn midpoint_rounds_to_nearest() {
        let stops = [
            ColorStop::new(0.0, Rgb::new(0, 0, 0)),
            ColorStop::new(1.0, Rgb::new(255, 10, 3)),
        ];
        // 127.5 -> 128, 5.0 -> 5, 1.5 -> 2
        assert_eq!(interpolate(&stops, 0.5), Rgb::new(128, 5, 2));
    }

    #[test]
    fn out_of_range_clamps_to_endpoints() {
        let stops = [
            ColorStop::new(0.2, Rgb::new(10, 20, 30)),
            ColorStop::new(0.8, Rgb::new(200, 100, 50)),
        ];
        assert_eq!(interpolate(&stops, 0.0), Rgb::new(10, 20, 30));
        assert_eq!(interpolate(&stops, -3.0), Rgb::new(10, 20, 30));
        assert_eq!(interpolate(&stops, 0.95), Rgb::new(200, 100, 50));
    }

    #[test]
    fn zero_width_bracket_uses_lower_color() {
        let stops = [
            ColorStop::new(0.0, Rgb::new(0, 0, 0)),
            ColorStop::new(0.5, Rgb::new(100, 100, 100)),
            ColorStop::new(0.5, Rgb::new(200, 200, 200)),
            ColorStop::new(1.0, Rgb::new(255, 255, 255)),
        ];
        assert_eq!(interpolate(&stops, 0.5), Rgb::new(100, 100, 100));
    }

    #[test]
    fn flat_night_plateau() {
        assert_eq!(interpolate(&SKY_STOPS, 0.6), Rgb::from_hex(0x1a1a28));
    }

    #[test]
    fn sweep_stays_in_channel_range() {
        for i in 0..=1000 {
            let t = i as f32 / 1000.0;
            let c = interpolate(&SKY_STOPS, t);
            // u8 already bounds the range; check the ramp stays between its neighbours.
            let lo = SKY_STOPS.iter().rev().find(|s| s.position <= t).map(|s| s.color.r);
            let hi = SKY_STOPS.iter().find(|s| s.position >= t).map(|s| s.color.r);
            if let (Some(lo), Some(hi)) = (lo, hi) {
                assert!(c.r >= lo.min(hi) && c.r <= lo.max(hi), "t={t}: {c}");
            }
        }
    }

    #[test]
    fn empty_stops_are_black() {
        assert_eq!(interpolate(&[], 0.5), Rgb::default());
    }
}
