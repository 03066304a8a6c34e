use crate::core::environment::EnvironmentMap;
use crate::core::model::{MaterialFactors, ModelAsset, Vertex};
use crate::core::scene::{NodeId, SceneSlots};
use crate::core::{WAVEFORM_HEIGHT, WAVEFORM_WIDTH};
use glam::Mat4;
use wgpu::util::DeviceExt;

use super::helpers::{self, DEPTH_FORMAT, HDR_FORMAT};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct FrameUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) eye: [f32; 4],
    pub(crate) ambient: [f32; 4],
    pub(crate) light_dir: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct DrawUniforms {
    model: [[f32; 4]; 4],
    normal_mat: [[f32; 4]; 4],
    base_color: [f32; 4],
    emissive: [f32; 4],
    params: [f32; 4],
}

const VERTEX_ATTRS: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

struct GpuGeometry {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    material: MaterialFactors,
}

struct GpuDraw {
    node: NodeId,
    mesh: usize,
    primitive: usize,
    display: bool,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Uploaded model: geometry per mesh plus one draw per (node, primitive).
pub(crate) struct GpuModel {
    geometry: Vec<Vec<GpuGeometry>>,
    draws: Vec<GpuDraw>,
}

pub(crate) struct SceneResources {
    pipeline: wgpu::RenderPipeline,
    frame_bgl: wgpu::BindGroupLayout,
    draw_bgl: wgpu::BindGroupLayout,
    frame_buffer: wgpu::Buffer,
    frame_bg: wgpu::BindGroup,
    _env_texture: wgpu::Texture,
    env_view: wgpu::TextureView,
    env_present: bool,
    ambient: [f32; 3],
    display_texture: wgpu::Texture,
    display_view: wgpu::TextureView,
    display_sampler: wgpu::Sampler,
}

impl SceneResources {
    pub(crate) fn new(device: &wgpu::Device, queue: &wgpu::Queue, ambient: [f32; 3]) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(crate::core::SCENE_WGSL.into()),
        });
        let uniform_entry = |binding: u32, visibility: wgpu::ShaderStages| wgpu::BindGroupLayoutEntry {
            binding,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let texture_entry = |binding: u32, filterable: bool| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable },
            },
            count: None,
        };
        let frame_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_frame_bgl"),
            entries: &[
                uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                texture_entry(1, false),
                texture_entry(2, true),
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let draw_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_draw_bgl"),
            entries: &[uniform_entry(0, wgpu::ShaderStages::VERTEX_FRAGMENT)],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&frame_bgl, &draw_bgl],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &VERTEX_ATTRS,
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: HDR_FORMAT,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let (_env_texture, env_view) =
            upload_environment(device, queue, &EnvironmentMap::uniform(ambient, 1, 1));
        let (display_texture, display_view) = helpers::create_texture(
            device,
            "display_tex",
            WAVEFORM_WIDTH,
            WAVEFORM_HEIGHT,
            wgpu::TextureFormat::Rgba8UnormSrgb,
            wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        );
        let display_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("display_sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let frame_bg = build_frame_bg(
            device,
            &frame_bgl,
            &frame_buffer,
            &env_view,
            &display_view,
            &display_sampler,
        );
        Self {
            pipeline,
            frame_bgl,
            draw_bgl,
            frame_buffer,
            frame_bg,
            _env_texture,
            env_view,
            env_present: false,
            ambient,
            display_texture,
            display_view,
            display_sampler,
        }
    }

    pub(crate) fn set_environment(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        env: &EnvironmentMap,
    ) {
        (self._env_texture, self.env_view) = upload_environment(device, queue, env);
        self.env_present = true;
        self.ambient = env.average();
        self.frame_bg = build_frame_bg(
            device,
            &self.frame_bgl,
            &self.frame_buffer,
            &self.env_view,
            &self.display_view,
            &self.display_sampler,
        );
    }

    pub(crate) fn upload_display(&self, queue: &wgpu::Queue, rgba: &[u8]) {
        helpers::upload_rgba(
            queue,
            &self.display_texture,
            rgba,
            WAVEFORM_WIDTH,
            WAVEFORM_HEIGHT,
            4,
        );
    }

    pub(crate) fn write_frame(&self, queue: &wgpu::Queue, view_proj: Mat4, eye: glam::Vec3) {
        let u = FrameUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            eye: eye.extend(1.0).to_array(),
            ambient: [
                self.ambient[0],
                self.ambient[1],
                self.ambient[2],
                if self.env_present { 1.0 } else { 0.0 },
            ],
            light_dir: [0.4, 0.8, 0.6, 0.0],
        };
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&u));
    }

    pub(crate) fn upload_model(
        &self,
        device: &wgpu::Device,
        model: &ModelAsset,
        slots: &SceneSlots,
    ) -> GpuModel {
        let geometry: Vec<Vec<GpuGeometry>> = model
            .meshes
            .iter()
            .map(|mesh| {
                mesh.primitives
                    .iter()
                    .map(|p| GpuGeometry {
                        vertex_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                            label: Some("mesh_vertices"),
                            contents: bytemuck::cast_slice(&p.vertices),
                            usage: wgpu::BufferUsages::VERTEX,
                        }),
                        index_buffer: device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                            label: Some("mesh_indices"),
                            contents: bytemuck::cast_slice(&p.indices),
                            usage: wgpu::BufferUsages::INDEX,
                        }),
                        index_count: p.indices.len() as u32,
                        material: p.material,
                    })
                    .collect()
            })
            .collect();

        let mut draws = Vec::new();
        for (node_id, node) in model.graph.nodes.iter().enumerate() {
            let Some(mesh) = node.mesh.filter(|m| *m < geometry.len()) else {
                continue;
            };
            let display = slots.is_speaker(&model.graph, node_id);
            for primitive in 0..geometry[mesh].len() {
                let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
                    label: Some("draw_uniforms"),
                    size: std::mem::size_of::<DrawUniforms>() as u64,
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                    mapped_at_creation: false,
                });
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some("draw_bg"),
                    layout: &self.draw_bgl,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    }],
                });
                draws.push(GpuDraw {
                    node: node_id,
                    mesh,
                    primitive,
                    display,
                    uniform_buffer,
                    bind_group,
                });
            }
        }
        log::info!("[render] uploaded {} draws", draws.len());
        GpuModel { geometry, draws }
    }

    /// Draw `model` with per-node world matrices into the HDR target.
    pub(crate) fn draw(
        &self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        color: &wgpu::TextureView,
        depth: &wgpu::TextureView,
        clear: wgpu::Color,
        model: Option<(&GpuModel, &[Mat4])>,
    ) {
        if let Some((gpu, globals)) = model {
            for d in &gpu.draws {
                let world = globals.get(d.node).copied().unwrap_or(Mat4::IDENTITY);
                let m = gpu.geometry[d.mesh][d.primitive].material;
                let u = DrawUniforms {
                    model: world.to_cols_array_2d(),
                    normal_mat: world.inverse().transpose().to_cols_array_2d(),
                    base_color: m.base_color,
                    emissive: [
                        m.emissive[0],
                        m.emissive[1],
                        m.emissive[2],
                        if d.display { 1.0 } else { 0.0 },
                    ],
                    params: [m.metallic, m.roughness, 0.0, 0.0],
                };
                queue.write_buffer(&d.uniform_buffer, 0, bytemuck::bytes_of(&u));
            }
        }

        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("scene_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        let Some((gpu, _)) = model else {
            return;
        };
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.frame_bg, &[]);
        for d in &gpu.draws {
            let g = &gpu.geometry[d.mesh][d.primitive];
            rpass.set_bind_group(1, &d.bind_group, &[]);
            rpass.set_vertex_buffer(0, g.vertex_buffer.slice(..));
            rpass.set_index_buffer(g.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..g.index_count, 0, 0..1);
        }
    }
}

fn upload_environment(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    env: &EnvironmentMap,
) -> (wgpu::Texture, wgpu::TextureView) {
    let (tex, view) = helpers::create_texture(
        device,
        "environment_tex",
        env.width,
        env.height,
        wgpu::TextureFormat::Rgba32Float,
        wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
    );
    helpers::upload_rgba(
        queue,
        &tex,
        bytemuck::cast_slice(&env.texels),
        env.width,
        env.height,
        16,
    );
    (tex, view)
}

fn build_frame_bg(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    frame_buffer: &wgpu::Buffer,
    env_view: &wgpu::TextureView,
    display_view: &wgpu::TextureView,
    display_sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene_frame_bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(env_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(display_view),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::Sampler(display_sampler),
            },
        ],
    })
}
