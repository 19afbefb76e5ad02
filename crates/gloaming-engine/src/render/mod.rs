//! GPU rendering.
//!
//! Renderers consume a [`DrawList`](crate::scene::DrawList) and own their
//! pipelines and buffers. Geometry arrives in logical pixels; the vertex
//! shader maps it to NDC with a viewport uniform.

mod ctx;
mod quad;

pub use ctx::{RenderCtx, RenderTarget};
pub use quad::QuadRenderer;
