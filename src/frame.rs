use crate::audio::AudioPipeline;
use crate::core::anim::ClipAction;
use crate::core::buttons::plan_cue;
use crate::core::environment::EnvironmentMap;
use crate::core::layout::{fit_scale, Placement, Viewport};
use crate::core::model::ModelAsset;
use crate::core::playback::{ButtonCue, PlaybackMachine};
use crate::core::pointer::{smooth_step, ModelRotation};
use crate::core::projection::{overlay_position, Camera};
use crate::core::scene::{euler_to_quat, Aabb, ButtonRegistry, ButtonSlot, NodeOverride, SceneSlots};
use crate::core::tween::TweenScheduler;
use crate::core::waveform::WaveformCanvas;
use crate::core::{MODEL_FIT_EXTENT, OVERLAY_OFFSET_PX, WAVEFORM_HEIGHT, WAVEFORM_WIDTH};
use crate::overlay::Overlay;
use crate::render::{GpuModel, GpuState};
use glam::{Mat4, Vec3};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// The loaded model with everything derived from it at load time.
pub struct LoadedModel {
    pub asset: ModelAsset,
    pub slots: SceneSlots,
    pub registry: ButtonRegistry,
    gpu: Option<GpuModel>,
    /// Normalises the authored size before the layout scale is applied.
    pub base_scale: f32,
    /// Current Euler rotation of each button, written by tweens.
    buttons: [Option<Vec3>; 2],
}

impl LoadedModel {
    fn button_index(slot: ButtonSlot) -> usize {
        match slot {
            ButtonSlot::Play => 0,
            ButtonSlot::Pause => 1,
        }
    }

    pub fn button_rotation(&self, slot: ButtonSlot) -> Option<Vec3> {
        self.buttons[Self::button_index(slot)]
    }
}

pub struct Viewer {
    pub canvas: web::HtmlCanvasElement,
    pub overlay: Overlay,
    pub audio: Option<AudioPipeline>,
    pub gpu: Option<GpuState>,
    pub camera: Camera,

    pub machine: PlaybackMachine,
    pub model: Option<LoadedModel>,
    pub mixer: Option<ClipAction>,
    pub tweens: TweenScheduler<ButtonSlot>,
    pub placement: Option<Placement>,

    pub rotation: ModelRotation,
    pub target_rotation: ModelRotation,

    pub waveform: WaveformCanvas,
    pub frequencies: Vec<u8>,
    /// World-space bounds from the most recent frame; anchors the overlay.
    pub world_bounds: Aabb,
    /// Node world matrices from the most recent frame, used for click picking.
    globals: Vec<Mat4>,

    clock: Instant,
    last_instant: Instant,
}

impl Viewer {
    pub fn new(canvas: web::HtmlCanvasElement, overlay: Overlay, gpu: Option<GpuState>) -> Self {
        let now = Instant::now();
        Self {
            canvas,
            overlay,
            audio: None,
            gpu,
            camera: Camera::default(),
            machine: PlaybackMachine::new(),
            model: None,
            mixer: None,
            tweens: TweenScheduler::new(),
            placement: None,
            rotation: ModelRotation::default(),
            target_rotation: ModelRotation::default(),
            waveform: WaveformCanvas::new(WAVEFORM_WIDTH, WAVEFORM_HEIGHT),
            frequencies: Vec::new(),
            world_bounds: Aabb::EMPTY,
            globals: Vec::new(),
            clock: now,
            last_instant: now,
        }
    }

    /// Seconds since the viewer was created; the tween time base.
    pub fn now_sec(&self) -> f64 {
        self.clock.elapsed().as_secs_f64()
    }

    pub fn install_model(&mut self, asset: ModelAsset) {
        let slots = SceneSlots::resolve(&asset.graph);
        let missing = slots.missing();
        if !missing.is_empty() {
            log::warn!("[assets] model lacks nodes: {}", missing.join(", "));
        }
        let registry = ButtonRegistry::capture(&asset.graph, &slots);
        let buttons = [
            registry.get(ButtonSlot::Play).map(|b| b.initial),
            registry.get(ButtonSlot::Pause).map(|b| b.initial),
        ];
        self.mixer = asset.clips.first().cloned().map(ClipAction::new);
        if self.mixer.is_none() {
            log::warn!("[assets] model has no animation clips; tape stays still");
        }
        let gpu = self.gpu.as_ref().map(|g| g.upload_model(&asset, &slots));
        let base_scale = fit_scale(&asset.bounds, MODEL_FIT_EXTENT);
        self.model = Some(LoadedModel {
            asset,
            slots,
            registry,
            gpu,
            base_scale,
            buttons,
        });
        self.overlay.set_label(self.machine.label());
        self.overlay.show();
    }

    pub fn install_environment(&mut self, env: &EnvironmentMap) {
        if let Some(g) = &mut self.gpu {
            g.set_environment(env);
        }
    }

    /// Re-solve placement for `viewport` and move the overlay right away.
    pub fn apply_layout(&mut self, viewport: &Viewport) {
        let Some(model) = &self.model else {
            return;
        };
        let placement = Placement::solve(viewport, &model.asset.bounds, model.base_scale);
        log::debug!(
            "[layout] {:?} scale={:.2} roll={:.2}",
            placement.bucket,
            placement.scale,
            placement.roll
        );
        self.placement = Some(placement);
        self.update_world_bounds();
        self.update_overlay();
    }

    /// Distance of the pause button from its registered rotation.
    pub fn pause_deviation(&self) -> Option<f32> {
        let model = self.model.as_ref()?;
        let initial = model.registry.get(ButtonSlot::Pause)?.initial;
        let current = model.button_rotation(ButtonSlot::Pause)?;
        Some((current - initial).abs().max_element())
    }

    pub fn resume_tape(&mut self) {
        if let Some(m) = &mut self.mixer {
            m.play();
        }
    }

    pub fn pause_tape(&mut self) {
        if let Some(m) = &mut self.mixer {
            m.pause();
        }
    }

    /// Start the button tween for `cue`. Missing buttons are skipped.
    pub fn cue_button(&mut self, cue: ButtonCue) {
        let now = self.now_sec();
        let Some(model) = &self.model else {
            return;
        };
        let Some(step) = plan_cue(cue, &model.registry) else {
            return;
        };
        if let Some(current) = model.button_rotation(step.slot) {
            step.schedule(&mut self.tweens, current, now);
        }
    }

    fn model_matrix(&self) -> Mat4 {
        match (&self.model, &self.placement) {
            (Some(model), Some(p)) => p.model_matrix(model.base_scale, self.rotation.x, self.rotation.y),
            _ => Mat4::IDENTITY,
        }
    }

    /// Per-node overrides for this frame: tape clip first, buttons on top.
    fn overrides(&self) -> Vec<NodeOverride> {
        let Some(model) = &self.model else {
            return Vec::new();
        };
        let mut overrides = vec![NodeOverride::default(); model.asset.graph.nodes.len()];
        if let Some(mixer) = &self.mixer {
            mixer.apply(&mut overrides);
        }
        for slot in [ButtonSlot::Play, ButtonSlot::Pause] {
            if let (Some(node), Some(euler)) = (model.slots.button(slot), model.button_rotation(slot)) {
                if let Some(o) = overrides.get_mut(node) {
                    o.rotation = Some(euler_to_quat(euler));
                }
            }
        }
        overrides
    }

    fn globals(&self) -> Vec<Mat4> {
        match &self.model {
            Some(model) => model
                .asset
                .graph
                .global_transforms(self.model_matrix(), &self.overrides()),
            None => Vec::new(),
        }
    }

    fn world_bounds_for(&self, globals: &[Mat4]) -> Aabb {
        let Some(model) = &self.model else {
            return Aabb::EMPTY;
        };
        let mut bounds = Aabb::EMPTY;
        for (node, m) in model.asset.graph.nodes.iter().zip(globals) {
            if let Some(mesh) = node.mesh.and_then(|i| model.asset.meshes.get(i)) {
                if !mesh.bounds.is_empty() {
                    bounds = bounds.union(&mesh.bounds.transformed(m));
                }
            }
        }
        bounds
    }

    fn update_world_bounds(&mut self) {
        self.globals = self.globals();
        self.world_bounds = self.world_bounds_for(&self.globals);
    }

    /// Project the bottom centre of the model bounds and move the overlay
    /// there, in viewport CSS pixels.
    pub fn update_overlay(&self) {
        if self.model.is_none() || self.world_bounds.is_empty() {
            return;
        }
        let rect = self.canvas.get_bounding_client_rect();
        let (w, h) = (rect.width() as f32, rect.height() as f32);
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let view_proj = self.camera.view_proj(w / h);
        if let Some(p) = overlay_position(
            self.world_bounds.bottom_center(),
            &view_proj,
            w,
            h,
            OVERLAY_OFFSET_PX,
        ) {
            let client = p + glam::Vec2::new(rect.left() as f32, rect.top() as f32);
            self.overlay.set_position(client);
        }
    }

    /// Ray-cast a click at backing pixel `(px, py)` against the model's triangles.
    pub fn hit_test(&self, px: f32, py: f32) -> bool {
        let Some(model) = &self.model else {
            return false;
        };
        let (w, h) = (self.canvas.width() as f32, self.canvas.height() as f32);
        let (origin, dir) = self.camera.screen_ray(px, py, w, h);
        model.asset.ray_hit(&self.globals, origin, dir).is_some()
    }

    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        if let Some(m) = &mut self.mixer {
            m.advance(dt_sec);
        }

        let now_sec = self.now_sec();
        if let Some(model) = &mut self.model {
            let buttons = &mut model.buttons;
            self.tweens.advance(now_sec, |slot, value| {
                buttons[LoadedModel::button_index(slot)] = Some(value);
            });
        }

        let playing = self.machine.is_playing();
        if playing {
            if let Some(audio) = &self.audio {
                audio.read_frequencies(&mut self.frequencies);
            }
        }
        self.waveform.draw(playing, &self.frequencies);
        if let (Some(g), Some(rgba)) = (&self.gpu, self.waveform.take_dirty()) {
            g.upload_display(rgba);
        }

        self.rotation = smooth_step(self.rotation, self.target_rotation);

        self.update_world_bounds();
        self.update_overlay();

        let w = self.canvas.width();
        let h = self.canvas.height();
        let aspect = w.max(1) as f32 / h.max(1) as f32;
        let view_proj = self.camera.view_proj(aspect);
        let eye = self.camera.eye;
        let model = self.model.as_ref().and_then(|m| m.gpu.as_ref());
        if let Some(g) = &mut self.gpu {
            g.resize_if_needed(w, h);
            let draw = model.map(|gm| (gm, self.globals.as_slice()));
            if let Err(e) = g.render(view_proj, eye, draw) {
                log::error!("render error: {:?}", e);
            }
        }
    }
}

pub fn start_loop(viewer: Rc<RefCell<Viewer>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        viewer.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
