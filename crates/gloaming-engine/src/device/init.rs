/// GPU setup options.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Use an sRGB swapchain format when the surface offers one.
    pub prefer_srgb: bool,

    /// Swap behavior. `Fifo` is vsync and always available.
    pub present_mode: wgpu::PresentMode,

    /// Alpha compositing mode; falls back to the first supported mode.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub power_preference: wgpu::PowerPreference,

    pub required_features: wgpu::Features,

    pub required_limits: wgpu::Limits,

    /// Frames the presentation engine may queue. A hint only.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            // The scene is a few hundred quads; the integrated GPU is plenty.
            power_preference: wgpu::PowerPreference::LowPower,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            desired_maximum_frame_latency: 2,
        }
    }
}
