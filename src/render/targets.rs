use super::helpers::{self, DEPTH_FORMAT, HDR_FORMAT};

/// Offscreen targets for the frame.
///
/// - `hdr_*` holds the lit scene in Rgba16Float; `depth_view` is its depth.
/// - `bloom_*` are half-res ping-pong buffers for bright-pass and blur.
pub(crate) struct RenderTargets {
    pub(crate) hdr_view: wgpu::TextureView,
    pub(crate) depth_view: wgpu::TextureView,
    pub(crate) bloom_a_view: wgpu::TextureView,
    pub(crate) bloom_b_view: wgpu::TextureView,
    // Kept alive for the views above.
    _textures: [wgpu::Texture; 4],
}

impl RenderTargets {
    pub(crate) fn new(device: &wgpu::Device, width: u32, height: u32) -> Self {
        let usage = wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING;
        let (hdr, hdr_view) =
            helpers::create_texture(device, "hdr_tex", width, height, HDR_FORMAT, usage);
        let (depth, depth_view) = helpers::create_texture(
            device,
            "depth_tex",
            width,
            height,
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );
        let bw = (width.max(1) / 2).max(1);
        let bh = (height.max(1) / 2).max(1);
        let (bloom_a, bloom_a_view) =
            helpers::create_texture(device, "bloom_a", bw, bh, HDR_FORMAT, usage);
        let (bloom_b, bloom_b_view) =
            helpers::create_texture(device, "bloom_b", bw, bh, HDR_FORMAT, usage);
        Self {
            hdr_view,
            depth_view,
            bloom_a_view,
            bloom_b_view,
            _textures: [hdr, depth, bloom_a, bloom_b],
        }
    }
}
