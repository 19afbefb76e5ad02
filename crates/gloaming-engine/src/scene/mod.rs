//! Renderer-agnostic draw stream.
//!
//! Items are painted back to front by z-index, then by insertion order.

mod cmd;
mod key;
mod list;
mod quad;
mod z_index;

pub use cmd::DrawCmd;
pub use key::SortKey;
pub use list::{DrawItem, DrawList};
pub use quad::{QuadCmd, QuadShape};
pub use z_index::ZIndex;
