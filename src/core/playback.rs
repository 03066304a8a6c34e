// Playback state machine.
//
// `PlaybackMachine::handle` is the only place the play/pause state changes.
// It returns the side effects the browser layer has to carry out; starting
// audio is asynchronous, so a toggle from `Paused` only requests playback
// and the state flips once the host reports `PlayStarted`.

use super::constants::BUTTON_DEADBAND;
use smallvec::{smallvec, SmallVec};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlaybackEvent {
    /// Overlay click, model hit or keyboard shortcut.
    Toggle,
    /// The audio element's play promise resolved. Carries the pause button's
    /// current distance from its registered rotation, if the button exists.
    PlayStarted { pause_deviation: Option<f32> },
    /// The play promise rejected (autoplay policy, network, decode).
    PlayFailed,
    /// Natural end of track.
    Ended,
}

/// Visual cue for the physical buttons on the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonCue {
    /// Press the play button and let it spring back.
    PressPlay,
    /// Return the pause button to its resting rotation.
    ReleasePause,
    /// Hold the pause button down.
    PressPause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Resume the audio context if suspended, then start the element.
    RequestPlay,
    PauseAudio,
    ResumeTape,
    PauseTape,
    Cue(ButtonCue),
    SetLabel(&'static str),
}

pub type Effects = SmallVec<[Effect; 4]>;

pub const LABEL_PLAY: &str = "PLAY";
pub const LABEL_PAUSE: &str = "PAUSE";

#[derive(Debug, Clone, Copy, Default)]
pub struct PlaybackMachine {
    state: PlaybackState,
}

impl PlaybackMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Overlay text matching the current state.
    pub fn label(&self) -> &'static str {
        match self.state {
            PlaybackState::Paused => LABEL_PLAY,
            PlaybackState::Playing => LABEL_PAUSE,
        }
    }

    pub fn handle(&mut self, event: PlaybackEvent) -> Effects {
        match (self.state, event) {
            (PlaybackState::Paused, PlaybackEvent::Toggle) => smallvec![Effect::RequestPlay],
            (PlaybackState::Playing, PlaybackEvent::Toggle | PlaybackEvent::Ended) => {
                self.state = PlaybackState::Paused;
                smallvec![
                    Effect::PauseAudio,
                    Effect::PauseTape,
                    Effect::Cue(ButtonCue::PressPause),
                    Effect::SetLabel(LABEL_PLAY),
                ]
            }
            (_, PlaybackEvent::PlayStarted { pause_deviation }) => {
                self.state = PlaybackState::Playing;
                smallvec![
                    Effect::ResumeTape,
                    Effect::Cue(play_cue(pause_deviation)),
                    Effect::SetLabel(LABEL_PAUSE),
                ]
            }
            (_, PlaybackEvent::PlayFailed) | (PlaybackState::Paused, PlaybackEvent::Ended) => {
                SmallVec::new()
            }
        }
    }
}

/// A pause button still held down gets released; otherwise the play button
/// receives the press.
pub fn play_cue(pause_deviation: Option<f32>) -> ButtonCue {
    match pause_deviation {
        Some(d) if d.abs() > BUTTON_DEADBAND => ButtonCue::ReleasePause,
        _ => ButtonCue::PressPlay,
    }
}
