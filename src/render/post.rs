use super::helpers::{make_post_pipeline, HDR_FORMAT};
use super::targets::RenderTargets;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    pub(crate) resolution: [f32; 2],
    pub(crate) exposure: f32,
    pub(crate) threshold: f32,
    pub(crate) blur_dir: [f32; 2],
    pub(crate) bloom_strength: f32,
    pub(crate) _pad: f32,
}

/// Bind groups that reference the current render targets; rebuilt on resize.
pub(crate) struct PostBindGroups {
    bright: wgpu::BindGroup,
    blur_h: wgpu::BindGroup,
    blur_v: wgpu::BindGroup,
    composite: wgpu::BindGroup,
    composite_bloom: wgpu::BindGroup,
}

pub(crate) struct PostResources {
    bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    bgl1: wgpu::BindGroupLayout, // tex+sampler
    sampler: wgpu::Sampler,
    // One uniform buffer per pass: queue writes land before submit, so a
    // shared buffer would leave every pass with the last write.
    uniforms: [wgpu::Buffer; 4],
    bright: wgpu::RenderPipeline,
    blur: wgpu::RenderPipeline,
    composite: wgpu::RenderPipeline,
    groups: PostBindGroups,
}

const PASS_BRIGHT: usize = 0;
const PASS_BLUR_H: usize = 1;
const PASS_BLUR_V: usize = 2;
const PASS_COMPOSITE: usize = 3;

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

impl PostResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        swap_format: wgpu::TextureFormat,
        targets: &RenderTargets,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::POST_WGSL.into()),
        });
        let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl0"),
            entries: &[
                texture_entry(0),
                sampler_entry(1),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });
        let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl1"),
            entries: &[texture_entry(0), sampler_entry(1)],
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("post_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let uniforms = std::array::from_fn(|_| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("post_uniforms"),
                size: std::mem::size_of::<PostUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        });
        let pl_single = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("post_pl_single"),
            bind_group_layouts: &[&bgl0],
            push_constant_ranges: &[],
        });
        let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("post_pl_composite"),
            bind_group_layouts: &[&bgl0, &bgl1],
            push_constant_ranges: &[],
        });
        let bright = make_post_pipeline(device, &pl_single, &shader, "fs_bright", HDR_FORMAT);
        let blur = make_post_pipeline(device, &pl_single, &shader, "fs_blur", HDR_FORMAT);
        let composite =
            make_post_pipeline(device, &pl_composite, &shader, "fs_composite", swap_format);
        let groups = build_groups(device, &bgl0, &bgl1, &sampler, &uniforms, targets);
        Self {
            bgl0,
            bgl1,
            sampler,
            uniforms,
            bright,
            blur,
            composite,
            groups,
        }
    }

    pub(crate) fn rebuild(&mut self, device: &wgpu::Device, targets: &RenderTargets) {
        self.groups = build_groups(
            device,
            &self.bgl0,
            &self.bgl1,
            &self.sampler,
            &self.uniforms,
            targets,
        );
    }

    /// Bright-pass, two blur passes, then composite into `output`.
    pub(crate) fn run(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        targets: &RenderTargets,
        output: &wgpu::TextureView,
        size: (u32, u32),
        params: PostUniforms,
    ) {
        let half = [(size.0 / 2).max(1) as f32, (size.1 / 2).max(1) as f32];
        let write = |pass: usize, blur_dir: [f32; 2]| {
            let u = PostUniforms {
                resolution: half,
                blur_dir,
                ..params
            };
            queue.write_buffer(&self.uniforms[pass], 0, bytemuck::bytes_of(&u));
        };
        write(PASS_BRIGHT, [0.0, 0.0]);
        write(PASS_BLUR_H, [1.0, 0.0]);
        write(PASS_BLUR_V, [0.0, 1.0]);
        write(PASS_COMPOSITE, [0.0, 0.0]);

        let g = &self.groups;
        blit(encoder, "bright_pass", &targets.bloom_a_view, &self.bright, &g.bright, None);
        blit(encoder, "blur_h", &targets.bloom_b_view, &self.blur, &g.blur_h, None);
        blit(encoder, "blur_v", &targets.bloom_a_view, &self.blur, &g.blur_v, None);
        blit(
            encoder,
            "composite",
            output,
            &self.composite,
            &g.composite,
            Some(&g.composite_bloom),
        );
    }
}

fn build_groups(
    device: &wgpu::Device,
    bgl0: &wgpu::BindGroupLayout,
    bgl1: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    uniforms: &[wgpu::Buffer; 4],
    targets: &RenderTargets,
) -> PostBindGroups {
    let with_uniform = |label: &str, view: &wgpu::TextureView, pass: usize| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniforms[pass].as_entire_binding(),
                },
            ],
        })
    };
    PostBindGroups {
        bright: with_uniform("post_bright", &targets.hdr_view, PASS_BRIGHT),
        blur_h: with_uniform("post_blur_h", &targets.bloom_a_view, PASS_BLUR_H),
        blur_v: with_uniform("post_blur_v", &targets.bloom_b_view, PASS_BLUR_V),
        composite: with_uniform("post_composite", &targets.hdr_view, PASS_COMPOSITE),
        composite_bloom: device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("post_composite_bloom"),
            layout: bgl1,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }),
    }
}

fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
