// Viewport classification and model placement.
//
// Placement is solved from scratch on every call (authored bounds in, final
// transform out), so applying it repeatedly for the same viewport never
// accumulates scale, rotation or offset.

use super::constants::{NARROW_BREAKPOINT_PX, SCALE_DESKTOP, SCALE_TOUCH_NARROW, SCALE_TOUCH_WIDE};
use super::scene::Aabb;
use glam::{Mat4, Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub touch: bool,
    /// Result of the `(orientation: portrait)` media query, when available.
    pub portrait: Option<bool>,
}

impl Viewport {
    pub fn is_portrait(&self) -> bool {
        self.portrait.unwrap_or(self.height > self.width)
    }

    pub fn is_narrow(&self) -> bool {
        self.width < NARROW_BREAKPOINT_PX
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutBucket {
    TouchPortraitOrNarrow,
    TouchWide,
    Desktop,
}

pub fn classify(viewport: &Viewport) -> LayoutBucket {
    match (viewport.touch, viewport.is_portrait() || viewport.is_narrow()) {
        (true, true) => LayoutBucket::TouchPortraitOrNarrow,
        (true, false) => LayoutBucket::TouchWide,
        (false, _) => LayoutBucket::Desktop,
    }
}

impl LayoutBucket {
    pub fn scale(self) -> f32 {
        match self {
            LayoutBucket::TouchPortraitOrNarrow => SCALE_TOUCH_NARROW,
            LayoutBucket::TouchWide => SCALE_TOUCH_WIDE,
            LayoutBucket::Desktop => SCALE_DESKTOP,
        }
    }

    /// Rotation about the model's primary (Z) axis.
    pub fn roll(self) -> f32 {
        match self {
            LayoutBucket::TouchPortraitOrNarrow => std::f32::consts::FRAC_PI_2,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub bucket: LayoutBucket,
    pub scale: f32,
    pub roll: f32,
    /// Translation that brings the transformed bounds' centre to the origin.
    pub offset: Vec3,
}

impl Placement {
    /// `base_scale` normalises the authored model size; the bucket scale is
    /// applied on top of it.
    pub fn solve(viewport: &Viewport, local_bounds: &Aabb, base_scale: f32) -> Self {
        let bucket = classify(viewport);
        let scale = bucket.scale();
        let roll = bucket.roll();
        let linear = Mat4::from_scale_rotation_translation(
            Vec3::splat(scale * base_scale),
            Quat::from_rotation_z(roll),
            Vec3::ZERO,
        );
        let offset = if local_bounds.is_empty() {
            Vec3::ZERO
        } else {
            -local_bounds.transformed(&linear).center()
        };
        Self {
            bucket,
            scale,
            roll,
            offset,
        }
    }

    /// Model matrix: recentre, then pointer rotation on top.
    pub fn model_matrix(&self, base_scale: f32, pitch: f32, yaw: f32) -> Mat4 {
        let pointer = Mat4::from_rotation_y(yaw) * Mat4::from_rotation_x(pitch);
        let placed = Mat4::from_translation(self.offset)
            * Mat4::from_scale_rotation_translation(
                Vec3::splat(self.scale * base_scale),
                Quat::from_rotation_z(self.roll),
                Vec3::ZERO,
            );
        pointer * placed
    }
}

/// Uniform scale that makes the largest extent of `bounds` equal `extent`.
pub fn fit_scale(bounds: &Aabb, extent: f32) -> f32 {
    if bounds.is_empty() {
        return 1.0;
    }
    let largest = bounds.size().max_element();
    if largest > f32::EPSILON {
        extent / largest
    } else {
        1.0
    }
}
