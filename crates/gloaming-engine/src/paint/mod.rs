//! Colors as the renderers consume them.

mod color;

pub use color::Color;
