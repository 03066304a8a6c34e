use crate::core::playback::{Effect, PlaybackEvent};
use crate::frame::Viewer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;

pub type SharedViewer = Rc<RefCell<Viewer>>;

/// Feed `event` to the playback machine and carry out its effects.
///
/// `RequestPlay` is asynchronous: its outcome comes back later as
/// `PlayStarted` or `PlayFailed`.
pub fn dispatch(viewer: &SharedViewer, event: PlaybackEvent) {
    let effects = viewer.borrow_mut().machine.handle(event);
    log::debug!("[playback] {:?} -> {:?}", event, effects.as_slice());
    for effect in effects {
        match effect {
            Effect::RequestPlay => request_play(viewer),
            Effect::PauseAudio => {
                if let Some(audio) = &viewer.borrow().audio {
                    audio.pause();
                }
            }
            Effect::ResumeTape => viewer.borrow_mut().resume_tape(),
            Effect::PauseTape => viewer.borrow_mut().pause_tape(),
            Effect::Cue(cue) => viewer.borrow_mut().cue_button(cue),
            Effect::SetLabel(text) => viewer.borrow().overlay.set_label(text),
        }
    }
}

fn request_play(viewer: &SharedViewer) {
    let Some(audio) = viewer.borrow().audio.clone() else {
        log::warn!("[playback] no audio pipeline; ignoring play request");
        return;
    };
    let viewer = viewer.clone();
    spawn_local(async move {
        match audio.start().await {
            Ok(()) => {
                let pause_deviation = viewer.borrow().pause_deviation();
                dispatch(&viewer, PlaybackEvent::PlayStarted { pause_deviation });
            }
            Err(e) => {
                log::warn!("[audio] playback failed to start: {:?}", e);
                dispatch(&viewer, PlaybackEvent::PlayFailed);
            }
        }
    });
}
