use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::core::layout::Viewport;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Click listener on an element by id. The handler gets the event so it can
/// stop propagation before the window-level fallback sees it.
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut(web::MouseEvent) + 'static,
) -> bool {
    let Some(el) = document.get_element_by_id(element_id) else {
        return false;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| handler(ev)) as Box<dyn FnMut(_)>);
    let ok = el
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        .is_ok();
    closure.forget();
    ok
}

/// Window-level listener for a plain event name.
pub fn add_window_listener<E>(event: &str, mut handler: impl FnMut(E) + 'static)
where
    E: JsCast + 'static,
{
    let Some(window) = web::window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move |ev: web::Event| {
        if let Ok(ev) = ev.dyn_into::<E>() {
            handler(ev);
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

/// Create the render canvas inside the container, filling it.
pub fn mount_canvas(
    document: &web::Document,
    container: &web::Element,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let style = canvas.style();
    _ = style.set_property("width", "100%");
    _ = style.set_property("height", "100%");
    _ = style.set_property("display", "block");
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(canvas)
}

/// Current viewport: inner size in CSS pixels, touch capability and the
/// portrait media query.
pub fn viewport() -> Option<Viewport> {
    let window = web::window()?;
    let width = window.inner_width().ok()?.as_f64()? as f32;
    let height = window.inner_height().ok()?.as_f64()? as f32;
    let touch = window.navigator().max_touch_points() > 0;
    let portrait = window
        .match_media("(orientation: portrait)")
        .ok()
        .flatten()
        .map(|mq| mq.matches());
    Some(Viewport {
        width,
        height,
        touch,
        portrait,
    })
}

/// Enter fullscreen on `el`, or leave it if something is already fullscreen.
pub fn toggle_fullscreen(document: &web::Document, el: &web::Element) {
    if document.fullscreen_element().is_some() {
        document.exit_fullscreen();
    } else if let Err(e) = el.request_fullscreen() {
        log::warn!("fullscreen request rejected: {:?}", e);
    }
}

pub fn exit_fullscreen(document: &web::Document) {
    if document.fullscreen_element().is_some() {
        document.exit_fullscreen();
    }
}
