//! Geometry in logical pixels: origin top-left, +X right, +Y down.
//!
//! Shaders convert to NDC with a viewport uniform.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
