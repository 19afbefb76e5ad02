/// Viewport size in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Converts viewport percentages to logical pixels.
    #[inline]
    pub fn percent(self, x: f32, y: f32) -> crate::coords::Vec2 {
        crate::coords::Vec2::new(self.width * x / 100.0, self.height * y / 100.0)
    }
}
