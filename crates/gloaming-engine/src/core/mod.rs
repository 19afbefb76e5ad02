//! Contract between the window runtime and the application.
//!
//! The runtime calls into an [`App`] with a [`FrameCtx`] once per redraw;
//! apps never see winit's event loop directly.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
