use crate::control::{dispatch, SharedViewer};
use crate::core::playback::PlaybackEvent;
use crate::core::pointer::{normalized_pointer, target_rotation};
use crate::dom;
use crate::input;
use web_sys as web;

pub fn wire_input_handlers(viewer: SharedViewer, document: &web::Document, cursor_id: &str) {
    wire_pointermove(&viewer);
    wire_overlay_click(&viewer, document, cursor_id);
    wire_window_click(&viewer);
}

fn wire_pointermove(viewer: &SharedViewer) {
    let viewer = viewer.clone();
    dom::add_window_listener("pointermove", move |ev: web::PointerEvent| {
        if let Some((x, y, w, h)) = input::pointer_client(&ev) {
            let [nx, ny] = normalized_pointer(x, y, w, h);
            viewer.borrow_mut().target_rotation = target_rotation(nx, ny);
        }
    });
}

fn wire_overlay_click(viewer: &SharedViewer, document: &web::Document, cursor_id: &str) {
    let viewer = viewer.clone();
    let wired = dom::add_click_listener(document, cursor_id, move |ev| {
        ev.stop_propagation();
        dispatch(&viewer, PlaybackEvent::Toggle);
    });
    if !wired {
        log::warn!("[overlay] #{} not found; only model clicks toggle", cursor_id);
    }
}

fn wire_window_click(viewer: &SharedViewer) {
    let viewer = viewer.clone();
    dom::add_window_listener("click", move |ev: web::MouseEvent| {
        let hit = {
            let v = viewer.borrow();
            let pos = input::mouse_canvas_px(&ev, &v.canvas);
            v.hit_test(pos.x, pos.y)
        };
        if hit {
            dispatch(&viewer, PlaybackEvent::Toggle);
        }
    });
}

/// Resize and orientation changes re-sync the canvas and re-apply layout.
pub fn wire_viewport_changes(viewer: SharedViewer) {
    for event in ["resize", "orientationchange"] {
        let viewer = viewer.clone();
        dom::add_window_listener(event, move |_ev: web::Event| {
            let mut v = viewer.borrow_mut();
            dom::sync_canvas_backing_size(&v.canvas);
            if let Some(viewport) = dom::viewport() {
                v.apply_layout(&viewport);
            }
        });
    }
}
