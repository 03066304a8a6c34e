use crate::core::environment::EnvironmentMap;
use crate::core::model::ModelAsset;
use crate::core::scene::SceneSlots;
use crate::core::{AMBIENT_FALLBACK, BLOOM_STRENGTH, BLOOM_THRESHOLD, EXPOSURE};
use glam::{Mat4, Vec3};
use web_sys as web;

mod helpers;
mod mesh;
mod post;
mod targets;

pub(crate) use mesh::GpuModel;
use mesh::SceneResources;
use post::{PostResources, PostUniforms};
use targets::RenderTargets;

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,
    scene: SceneResources,
    post: PostResources,
    clear_color: wgpu::Color,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);
        let scene = SceneResources::new(&device, &queue, AMBIENT_FALLBACK);
        let post = PostResources::new(&device, format, &targets);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            scene,
            post,
            clear_color: wgpu::Color {
                r: 0.02,
                g: 0.02,
                b: 0.03,
                a: 1.0,
            },
        })
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.config.width || height != self.config.height {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets = RenderTargets::new(&self.device, width, height);
            self.post.rebuild(&self.device, &self.targets);
        }
    }

    pub fn set_environment(&mut self, env: &EnvironmentMap) {
        self.scene.set_environment(&self.device, &self.queue, env);
    }

    pub(crate) fn upload_model(&self, model: &ModelAsset, slots: &SceneSlots) -> GpuModel {
        self.scene.upload_model(&self.device, model, slots)
    }

    pub fn upload_display(&self, rgba: &[u8]) {
        self.scene.upload_display(&self.queue, rgba);
    }

    pub(crate) fn render(
        &mut self,
        view_proj: Mat4,
        eye: Vec3,
        model: Option<(&GpuModel, &[Mat4])>,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        self.scene.write_frame(&self.queue, view_proj, eye);
        self.scene.draw(
            &self.queue,
            &mut encoder,
            &self.targets.hdr_view,
            &self.targets.depth_view,
            self.clear_color,
            model,
        );
        self.post.run(
            &self.queue,
            &mut encoder,
            &self.targets,
            &view,
            self.size(),
            PostUniforms {
                resolution: [0.0, 0.0],
                exposure: EXPOSURE,
                threshold: BLOOM_THRESHOLD,
                blur_dir: [0.0, 0.0],
                bloom_strength: BLOOM_STRENGTH,
                _pad: 0.0,
            },
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
