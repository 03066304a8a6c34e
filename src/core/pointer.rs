use super::constants::{POINTER_MAX_PITCH_DEG, POINTER_MAX_YAW_DEG, ROTATION_SMOOTHING};

/// Rotation of the model in radians: `x` tilts (pitch), `y` turns (yaw).
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ModelRotation {
    pub x: f32,
    pub y: f32,
}

/// Map a client-space pointer position to normalised coordinates in [-1, 1],
/// +x to the right and +y downward. Degenerate viewports map to the centre.
#[inline]
pub fn normalized_pointer(client_x: f32, client_y: f32, width: f32, height: f32) -> [f32; 2] {
    if width <= 0.0 || height <= 0.0 {
        return [0.0, 0.0];
    }
    [
        ((client_x / width) * 2.0 - 1.0).clamp(-1.0, 1.0),
        ((client_y / height) * 2.0 - 1.0).clamp(-1.0, 1.0),
    ]
}

/// Target rotation for a normalised pointer position: linear in both axes and
/// clamped to the yaw/pitch limits at the viewport edges.
#[inline]
pub fn target_rotation(nx: f32, ny: f32) -> ModelRotation {
    ModelRotation {
        x: ny.clamp(-1.0, 1.0) * POINTER_MAX_PITCH_DEG.to_radians(),
        y: nx.clamp(-1.0, 1.0) * POINTER_MAX_YAW_DEG.to_radians(),
    }
}

/// First-order low-pass toward `target`, one step per frame.
#[inline]
pub fn smooth_step(current: ModelRotation, target: ModelRotation) -> ModelRotation {
    ModelRotation {
        x: current.x + (target.x - current.x) * ROTATION_SMOOTHING,
        y: current.y + (target.y - current.y) * ROTATION_SMOOTHING,
    }
}
