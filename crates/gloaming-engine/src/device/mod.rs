//! wgpu device and window surface.
//!
//! Creates the instance, adapter, device and queue, keeps the surface
//! configured across resizes, and hands out one encoder per frame.

mod gpu;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
