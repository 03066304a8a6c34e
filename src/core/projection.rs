use glam::{Mat4, Vec2, Vec3, Vec4};

use super::constants::{CAMERA_EYE, CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR};

/// Fixed look-at camera shared by rendering, overlay projection and picking.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::from(CAMERA_EYE),
            target: Vec3::ZERO,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }
}

impl Camera {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, aspect.max(1e-3), self.znear, self.zfar)
    }

    pub fn view_proj(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// World-space ray through a pixel of a `width` x `height` viewport.
    pub fn screen_ray(&self, px: f32, py: f32, width: f32, height: f32) -> (Vec3, Vec3) {
        let w = width.max(1.0);
        let h = height.max(1.0);
        let ndc_x = (2.0 * px / w) - 1.0;
        let ndc_y = 1.0 - (2.0 * py / h);
        let inv = self.view_proj(w / h).inverse();
        let far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let far: Vec3 = far.truncate() / far.w;
        (self.eye, (far - self.eye).normalize())
    }
}

/// Project a world point to pixel coordinates (origin top-left).
/// `None` when the point is behind the camera.
#[inline]
pub fn project_to_pixels(point: Vec3, view_proj: &Mat4, width: f32, height: f32) -> Option<Vec2> {
    let clip = *view_proj * point.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Vec2::new(
        (ndc.x * 0.5 + 0.5) * width,
        (-ndc.y * 0.5 + 0.5) * height,
    ))
}

/// Where the overlay button goes: the projected anchor pushed down by
/// `offset_px`.
#[inline]
pub fn overlay_position(
    anchor: Vec3,
    view_proj: &Mat4,
    width: f32,
    height: f32,
    offset_px: f32,
) -> Option<Vec2> {
    project_to_pixels(anchor, view_proj, width, height).map(|p| p + Vec2::new(0.0, offset_px))
}
