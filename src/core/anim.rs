// Keyframe clips and the looping action that plays the tape mechanism.

use fnv::FnvHashMap;
use glam::{Quat, Vec3};

use super::scene::{NodeId, NodeOverride};

#[derive(Debug, Clone, Default)]
pub struct TrackVec3 {
    pub times: Vec<f32>,
    pub values: Vec<Vec3>,
}

#[derive(Debug, Clone, Default)]
pub struct TrackQuat {
    pub times: Vec<f32>,
    pub values: Vec<Quat>,
}

#[derive(Debug, Clone, Default)]
pub struct AnimClip {
    pub name: String,
    pub duration: f32,
    pub translations: FnvHashMap<NodeId, TrackVec3>,
    pub rotations: FnvHashMap<NodeId, TrackQuat>,
    pub scales: FnvHashMap<NodeId, TrackVec3>,
}

/// Index `i` such that `times[i] <= t < times[i + 1]`, plus the blend factor.
fn locate(times: &[f32], t: f32) -> Option<(usize, f32)> {
    let last = times.len().checked_sub(1)?;
    if last == 0 || t <= times[0] {
        return Some((0, 0.0));
    }
    if t >= times[last] {
        return Some((last, 0.0));
    }
    let i = times.partition_point(|k| *k <= t).saturating_sub(1).min(last - 1);
    let span = times[i + 1] - times[i];
    let f = if span > 0.0 { (t - times[i]) / span } else { 0.0 };
    Some((i, f))
}

pub fn sample_vec3(track: &TrackVec3, t: f32) -> Option<Vec3> {
    let (i, f) = locate(&track.times, t)?;
    let a = *track.values.get(i)?;
    Some(match track.values.get(i + 1) {
        Some(b) if f > 0.0 => a.lerp(*b, f),
        _ => a,
    })
}

pub fn sample_quat(track: &TrackQuat, t: f32) -> Option<Quat> {
    let (i, f) = locate(&track.times, t)?;
    let a = *track.values.get(i)?;
    Some(match track.values.get(i + 1) {
        Some(b) if f > 0.0 => a.slerp(*b, f),
        _ => a,
    })
}

/// Looping playback of one clip. Created paused.
#[derive(Debug, Clone)]
pub struct ClipAction {
    clip: AnimClip,
    time: f32,
    paused: bool,
}

impl ClipAction {
    pub fn new(clip: AnimClip) -> Self {
        Self {
            clip,
            time: 0.0,
            paused: true,
        }
    }

    pub fn clip(&self) -> &AnimClip {
        &self.clip
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn play(&mut self) {
        self.paused = false;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn advance(&mut self, dt_sec: f32) {
        if self.paused || dt_sec <= 0.0 {
            return;
        }
        self.time += dt_sec;
        if self.clip.duration > 0.0 {
            self.time %= self.clip.duration;
        } else {
            self.time = 0.0;
        }
    }

    /// Write the sampled channels into `overrides` (indexed by node).
    pub fn apply(&self, overrides: &mut [NodeOverride]) {
        let t = self.time;
        for (node, track) in &self.clip.translations {
            if let (Some(o), Some(v)) = (overrides.get_mut(*node), sample_vec3(track, t)) {
                o.translation = Some(v);
            }
        }
        for (node, track) in &self.clip.rotations {
            if let (Some(o), Some(q)) = (overrides.get_mut(*node), sample_quat(track, t)) {
                o.rotation = Some(q);
            }
        }
        for (node, track) in &self.clip.scales {
            if let (Some(o), Some(v)) = (overrides.get_mut(*node), sample_vec3(track, t)) {
                o.scale = Some(v);
            }
        }
    }
}
