// Button motion for playback cues.
//
// A cue resolves against the registry into a `ButtonMove`. Every target is
// composed from the registered rotation, so repeated presses never drift.

use glam::Vec3;

use super::constants::{BUTTON_PRESS_ANGLE, BUTTON_PRESS_SEC, BUTTON_RELEASE_SEC};
use super::playback::ButtonCue;
use super::scene::{ButtonRegistry, ButtonSlot};
use super::tween::{AxisTargets, Completion, TweenScheduler};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonMove {
    pub slot: ButtonSlot,
    /// X rotation the button tweens to, in radians.
    pub target_x: f32,
    pub duration_sec: f32,
    /// Registered X rotation to spring back to once the press lands.
    pub release_to: Option<f32>,
}

/// Resolve `cue` into a move. Buttons missing from the registry yield `None`.
pub fn plan_cue(cue: ButtonCue, registry: &ButtonRegistry) -> Option<ButtonMove> {
    let (slot, offset, duration_sec, spring_back) = match cue {
        ButtonCue::PressPlay => (ButtonSlot::Play, BUTTON_PRESS_ANGLE, BUTTON_PRESS_SEC, true),
        ButtonCue::ReleasePause => (ButtonSlot::Pause, 0.0, BUTTON_RELEASE_SEC, false),
        ButtonCue::PressPause => (ButtonSlot::Pause, BUTTON_PRESS_ANGLE, BUTTON_PRESS_SEC, false),
    };
    let rest_x = registry.get(slot)?.initial.x;
    Some(ButtonMove {
        slot,
        target_x: rest_x + offset,
        duration_sec,
        release_to: spring_back.then_some(rest_x),
    })
}

impl ButtonMove {
    /// Queue the move on `tweens`, starting from the button's `current` rotation.
    pub fn schedule(self, tweens: &mut TweenScheduler<ButtonSlot>, current: Vec3, now_sec: f64) {
        let slot = self.slot;
        let on_complete = self.release_to.map(|rest_x| {
            Box::new(move |tweens: &mut TweenScheduler<ButtonSlot>, end: Vec3, at: f64| {
                tweens.animate(slot, end, AxisTargets::x(rest_x), BUTTON_RELEASE_SEC, at, None);
            }) as Completion<ButtonSlot>
        });
        tweens.animate(
            slot,
            current,
            AxisTargets::x(self.target_x),
            self.duration_sec,
            now_sec,
            on_complete,
        );
    }
}
