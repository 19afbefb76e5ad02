use crate::coords::{Rect, Vec2};
use crate::paint::Color;

use super::{DrawCmd, DrawList, ZIndex};

/// Silhouette cut out of a quad by the fragment shader.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum QuadShape {
    Rect,
    Ellipse,
    /// Pointed at both ends along the local Y axis.
    Leaf,
}

impl QuadShape {
    #[inline]
    pub(crate) fn shader_id(self) -> f32 {
        match self {
            QuadShape::Rect => 0.0,
            QuadShape::Ellipse => 1.0,
            QuadShape::Leaf => 2.0,
        }
    }
}

/// A rotated, scaled, tinted quad.
///
/// The quad is `size` logical pixels, centered on `center`, scaled by
/// `scale` and rotated `rotation` degrees clockwise about its center.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadCmd {
    pub center: Vec2,
    pub size: Vec2,
    pub scale: f32,
    pub rotation: f32,
    pub color: Color,
    pub shape: QuadShape,
    /// Edge feather in logical pixels; larger values look blurred.
    pub softness: f32,
}

impl QuadCmd {
    #[inline]
    pub fn new(center: Vec2, size: Vec2, color: Color, shape: QuadShape) -> Self {
        Self {
            center,
            size,
            scale: 1.0,
            rotation: 0.0,
            color,
            shape,
            softness: 1.0,
        }
    }

    #[inline]
    pub fn scaled(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    #[inline]
    pub fn rotated(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    #[inline]
    pub fn soft(mut self, softness: f32) -> Self {
        self.softness = softness.max(1.0);
        self
    }

    /// Nothing would reach the screen.
    #[inline]
    pub fn is_invisible(&self) -> bool {
        self.color.a <= 0.0 || self.scale <= 0.0 || self.size.x <= 0.0 || self.size.y <= 0.0
    }
}

impl DrawList {
    #[inline]
    pub fn push_quad(&mut self, z: ZIndex, quad: QuadCmd) {
        self.push(z, DrawCmd::Quad(quad));
    }

    /// Axis-aligned solid rectangle.
    #[inline]
    pub fn push_rect(&mut self, z: ZIndex, rect: Rect, color: Color) {
        self.push_quad(z, QuadCmd::new(rect.center(), rect.size, color, QuadShape::Rect));
    }

    #[inline]
    pub fn push_ellipse(&mut self, z: ZIndex, center: Vec2, size: Vec2, color: Color) {
        self.push_quad(z, QuadCmd::new(center, size, color, QuadShape::Ellipse));
    }
}
