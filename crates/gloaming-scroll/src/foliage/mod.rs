//! Procedural foliage layout.
//!
//! Each layer contributes a fixed number of items placed by one of five
//! distribution strategies. The layout is built once at startup and stays
//! static for the session, including across viewport resizes.

mod layer;
mod layout;

pub use layer::{layers_for, Distribution, LayerKind, LayerSpec, Span};
pub use layout::{generate, place, FoliageItem, VERTICAL_ASPECT};

pub(crate) use layout::sample;
