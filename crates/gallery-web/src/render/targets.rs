use super::helpers;
use wgpu;

/// Size-dependent render targets.
///
/// - `depth_*` backs the main pass into the swapchain.
/// - `reflection_*` receive the mirrored scene the floor samples from, at the
///   reflector's target size and in the surface format.
pub(crate) struct RenderTargets {
    _depth_tex: wgpu::Texture,
    pub(crate) depth_view: wgpu::TextureView,
    _reflection_tex: wgpu::Texture,
    pub(crate) reflection_view: wgpu::TextureView,
    _reflection_depth_tex: wgpu::Texture,
    pub(crate) reflection_depth_view: wgpu::TextureView,
    pub(crate) reflection_size: (u32, u32),
}

impl RenderTargets {
    pub(crate) fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        reflection_size: (u32, u32),
    ) -> Self {
        let (_depth_tex, depth_view) = helpers::create_depth_texture(device, "depth", width, height);
        let (rw, rh) = reflection_size;
        let (_reflection_tex, reflection_view) = helpers::create_color_texture_device(
            device,
            "reflection",
            rw,
            rh,
            format,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        );
        let (_reflection_depth_tex, reflection_depth_view) =
            helpers::create_depth_texture(device, "reflection_depth", rw, rh);
        Self {
            _depth_tex,
            depth_view,
            _reflection_tex,
            reflection_view,
            _reflection_depth_tex,
            reflection_depth_view,
            reflection_size,
        }
    }

    pub(crate) fn recreate(
        &mut self,
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        reflection_size: (u32, u32),
    ) {
        *self = Self::new(device, format, width, height, reflection_size);
    }
}
