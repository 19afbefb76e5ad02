/// Linear, premultiplied RGBA.
///
/// Renderers blend with `One, OneMinusSrcAlpha`, so `r`, `g` and `b` must
/// already be multiplied by `a`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn transparent() -> Self {
        Self { r: 0.0, g: 0.0, b: 0.0, a: 0.0 }
    }

    #[inline]
    pub const fn from_premul(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// From straight-alpha linear components.
    #[inline]
    pub fn from_linear(r: f32, g: f32, b: f32, a: f32) -> Self {
        let a = a.clamp(0.0, 1.0);
        Self {
            r: r.clamp(0.0, 1.0) * a,
            g: g.clamp(0.0, 1.0) * a,
            b: b.clamp(0.0, 1.0) * a,
            a,
        }
    }

    /// From sRGB bytes and a straight alpha in `[0, 1]`.
    #[inline]
    pub fn from_srgb8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self::from_linear(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a)
    }

    /// From a `0xRRGGBB` sRGB literal, fully opaque.
    #[inline]
    pub fn from_hex(hex: u32) -> Self {
        Self::from_srgb8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 1.0)
    }

    /// Scales opacity by `f`, keeping premultiplication intact.
    #[inline]
    pub fn faded(self, f: f32) -> Self {
        let f = f.clamp(0.0, 1.0);
        Self {
            r: self.r * f,
            g: self.g * f,
            b: self.b * f,
            a: self.a * f,
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Clear color for a render pass.
    #[inline]
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

/// sRGB transfer function, decoded.
#[inline]
pub fn srgb_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn srgb_endpoints_are_exact() {
        assert_eq!(srgb_to_linear(0), 0.0);
        assert!((srgb_to_linear(255) - 1.0).abs() < 1e-6);
        assert!((srgb_to_linear(128) - 0.2158).abs() < 1e-3);
    }

    #[test]
    fn premultiplies() {
        let c = Color::from_linear(1.0, 0.5, 0.0, 0.5);
        assert_eq!(c, Color::from_premul(0.5, 0.25, 0.0, 0.5));
        assert_eq!(c.faded(0.5).a, 0.25);
        assert_eq!(c.faded(2.0), c);
    }

    #[test]
    fn hex_is_opaque() {
        let c = Color::from_hex(0xffffff);
        assert_eq!(c.a, 1.0);
        assert!((c.r - 1.0).abs() < 1e-6);
    }
}
