use crate::control::{dispatch, SharedViewer};
use crate::core::playback::PlaybackEvent;
use crate::dom;
use crate::input::{key_action, KeyAction};
use web_sys as web;

pub fn wire_global_keydown(viewer: SharedViewer) {
    dom::add_window_listener("keydown", move |ev: web::KeyboardEvent| {
        if ev.repeat() {
            return;
        }
        let Some(action) = key_action(&ev.key()) else {
            return;
        };
        match action {
            KeyAction::TogglePlayback => {
                ev.prevent_default();
                dispatch(&viewer, PlaybackEvent::Toggle);
            }
            KeyAction::ToggleFullscreen => {
                let canvas = viewer.borrow().canvas.clone();
                if let Some(doc) = dom::window_document() {
                    dom::toggle_fullscreen(&doc, &canvas);
                }
            }
            KeyAction::ExitFullscreen => {
                if let Some(doc) = dom::window_document() {
                    dom::exit_fullscreen(&doc);
                }
            }
        }
    });
}
