#![cfg(target_arch = "wasm32")]
use crate::config::ViewerConfig;
use crate::control::SharedViewer;
use crate::core::playback::PlaybackEvent;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod audio;
mod config;
mod control;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

fn read_config(container: &web::Element) -> ViewerConfig {
    let dataset = container
        .dyn_ref::<web::HtmlElement>()
        .map(|el| el.dataset());
    ViewerConfig::default().with_overrides(|key| dataset.as_ref().and_then(|d| d.get(key)))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let container = dom::window_document()
        .and_then(|d| d.get_element_by_id(config::DEFAULT_CONTAINER_ID));
    let cfg = container
        .as_ref()
        .map(read_config)
        .unwrap_or_default();
    console_log::init_with_level(cfg.log_level).ok();
    log::info!("boombox-viewer starting");

    spawn_local(async move {
        if let Err(e) = init(cfg).await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init(cfg: ViewerConfig) -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let container = document
        .get_element_by_id(&cfg.container_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", cfg.container_id))?;
    let canvas = dom::mount_canvas(&document, &container)?;
    dom::sync_canvas_backing_size(&canvas);

    let overlay = overlay::Overlay::find(&document, &cfg.cursor_id, &cfg.cursor_text_id);
    overlay.hide();

    let gpu = match render::GpuState::new(&canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    };

    let viewer: SharedViewer = Rc::new(RefCell::new(frame::Viewer::new(canvas, overlay, gpu)));

    match audio::AudioPipeline::new(&cfg.audio_url) {
        Ok(pipeline) => {
            let on_end = viewer.clone();
            pipeline.on_ended(move || control::dispatch(&on_end, PlaybackEvent::Ended));
            viewer.borrow_mut().audio = Some(pipeline);
        }
        Err(e) => log::error!("[audio] setup failed: {:?}", e),
    }

    events::wire_input_handlers(viewer.clone(), &document, &cfg.cursor_id);
    events::wire_global_keydown(viewer.clone());
    events::wire_viewport_changes(viewer.clone());

    spawn_model_load(viewer.clone(), cfg.model_url.clone());
    spawn_environment_load(viewer.clone(), cfg.environment_url.clone());

    frame::start_loop(viewer);
    Ok(())
}

fn spawn_model_load(viewer: SharedViewer, url: String) {
    spawn_local(async move {
        match assets::load_model(&url).await {
            Ok(model) => {
                let mut v = viewer.borrow_mut();
                v.install_model(model);
                if let Some(viewport) = dom::viewport() {
                    v.apply_layout(&viewport);
                }
            }
            Err(e) => log::error!("[assets] model {} failed: {:?}", url, e),
        }
    });
}

fn spawn_environment_load(viewer: SharedViewer, url: String) {
    spawn_local(async move {
        match assets::load_environment(&url).await {
            Ok(env) => viewer.borrow_mut().install_environment(&env),
            Err(e) => log::error!("[assets] environment {} failed: {:?}", url, e),
        }
    });
}
