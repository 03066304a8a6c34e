// Host-side tests for the playback state machine.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod playback {
    include!("../src/core/playback.rs");
}

use playback::*;

fn started(m: &mut PlaybackMachine, dev: Option<f32>) -> Effects {
    m.handle(PlaybackEvent::PlayStarted {
        pause_deviation: dev,
    })
}

#[test]
fn starts_paused_with_play_label() {
    let m = PlaybackMachine::new();
    assert_eq!(m.state(), PlaybackState::Paused);
    assert!(!m.is_playing());
    assert_eq!(m.label(), "PLAY");
}

#[test]
fn toggle_from_paused_only_requests_play() {
    let mut m = PlaybackMachine::new();
    let fx = m.handle(PlaybackEvent::Toggle);
    assert_eq!(fx.as_slice(), &[Effect::RequestPlay]);
    // State flips only once the play promise resolves
    assert_eq!(m.state(), PlaybackState::Paused);
}

#[test]
fn play_started_resumes_tape_and_presses_play() {
    let mut m = PlaybackMachine::new();
    m.handle(PlaybackEvent::Toggle);
    let fx = started(&mut m, Some(0.0));
    assert_eq!(
        fx.as_slice(),
        &[
            Effect::ResumeTape,
            Effect::Cue(ButtonCue::PressPlay),
            Effect::SetLabel(LABEL_PAUSE),
        ]
    );
    assert!(m.is_playing());
    assert_eq!(m.label(), "PAUSE");
}

#[test]
fn held_pause_button_is_released_instead() {
    let mut m = PlaybackMachine::new();
    let fx = started(&mut m, Some(0.25));
    assert!(fx.contains(&Effect::Cue(ButtonCue::ReleasePause)));
    assert!(!fx.contains(&Effect::Cue(ButtonCue::PressPlay)));
}

#[test]
fn play_cue_deadband() {
    assert_eq!(play_cue(None), ButtonCue::PressPlay);
    assert_eq!(play_cue(Some(0.0)), ButtonCue::PressPlay);
    assert_eq!(play_cue(Some(0.1)), ButtonCue::PressPlay);
    assert_eq!(play_cue(Some(0.11)), ButtonCue::ReleasePause);
    assert_eq!(play_cue(Some(-0.2)), ButtonCue::ReleasePause);
}

#[test]
fn toggle_from_playing_pauses_everything_once() {
    let mut m = PlaybackMachine::new();
    started(&mut m, None);
    let fx = m.handle(PlaybackEvent::Toggle);
    assert_eq!(
        fx.as_slice(),
        &[
            Effect::PauseAudio,
            Effect::PauseTape,
            Effect::Cue(ButtonCue::PressPause),
            Effect::SetLabel(LABEL_PLAY),
        ]
    );
    assert_eq!(m.state(), PlaybackState::Paused);
    // A second toggle requests play again rather than pausing twice
    assert_eq!(
        m.handle(PlaybackEvent::Toggle).as_slice(),
        &[Effect::RequestPlay]
    );
}

#[test]
fn ended_matches_explicit_pause() {
    let mut a = PlaybackMachine::new();
    let mut b = PlaybackMachine::new();
    started(&mut a, None);
    started(&mut b, None);
    let by_toggle = a.handle(PlaybackEvent::Toggle);
    let by_end = b.handle(PlaybackEvent::Ended);
    assert_eq!(by_toggle, by_end);
    assert_eq!(a.state(), b.state());
    assert_eq!(a.label(), b.label());
}

#[test]
fn failed_play_leaves_state_paused() {
    let mut m = PlaybackMachine::new();
    m.handle(PlaybackEvent::Toggle);
    let fx = m.handle(PlaybackEvent::PlayFailed);
    assert!(fx.is_empty());
    assert_eq!(m.state(), PlaybackState::Paused);
    assert_eq!(m.label(), "PLAY");
}

#[test]
fn ended_while_paused_is_ignored() {
    let mut m = PlaybackMachine::new();
    assert!(m.handle(PlaybackEvent::Ended).is_empty());
    assert_eq!(m.state(), PlaybackState::Paused);
}
