// Host-side tests for the camera, overlay projection and click picking.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod scene {
    include!("../src/core/scene.rs");
}
mod projection {
    include!("../src/core/projection.rs");
}

use glam::{Vec2, Vec3};
use projection::*;
use scene::Aabb;

fn unit_box() -> Aabb {
    Aabb {
        min: Vec3::splat(-0.5),
        max: Vec3::splat(0.5),
    }
}

#[test]
fn camera_target_projects_to_screen_centre() {
    let cam = Camera::default();
    let vp = cam.view_proj(800.0 / 600.0);
    let p = project_to_pixels(cam.target, &vp, 800.0, 600.0).unwrap();
    assert!((p - Vec2::new(400.0, 300.0)).length() < 1e-2);
}

#[test]
fn points_below_target_land_lower_on_screen() {
    let cam = Camera::default();
    let vp = cam.view_proj(1.0);
    let centre = project_to_pixels(Vec3::ZERO, &vp, 500.0, 500.0).unwrap();
    let below = project_to_pixels(Vec3::new(0.0, -0.5, 0.0), &vp, 500.0, 500.0).unwrap();
    assert!(below.y > centre.y);
    assert!((below.x - centre.x).abs() < 1e-3);
}

#[test]
fn points_behind_camera_do_not_project() {
    let cam = Camera::default();
    let vp = cam.view_proj(1.0);
    let behind = cam.eye + (cam.eye - cam.target);
    assert!(project_to_pixels(behind, &vp, 500.0, 500.0).is_none());
}

#[test]
fn overlay_sits_offset_below_the_anchor() {
    let cam = Camera::default();
    let vp = cam.view_proj(1.0);
    let anchor = unit_box().bottom_center();
    let raw = project_to_pixels(anchor, &vp, 500.0, 500.0).unwrap();
    let placed = overlay_position(anchor, &vp, 500.0, 500.0, 40.0).unwrap();
    assert_eq!(placed.x, raw.x);
    assert!((placed.y - raw.y - 40.0).abs() < 1e-4);
}

#[test]
fn centre_ray_hits_model_bounds() {
    let cam = Camera::default();
    let (o, d) = cam.screen_ray(400.0, 300.0, 800.0, 600.0);
    assert_eq!(o, cam.eye);
    assert!((d.length() - 1.0).abs() < 1e-4);
    let t = unit_box().ray_hit(o, d).unwrap();
    assert!(t > 0.0 && t < (cam.eye - cam.target).length());
}

#[test]
fn corner_ray_misses_model_bounds() {
    let cam = Camera::default();
    let (o, d) = cam.screen_ray(2.0, 2.0, 800.0, 600.0);
    assert!(unit_box().ray_hit(o, d).is_none());
}

#[test]
fn pick_and_projection_agree() {
    // A pixel obtained by projecting a point on the box must ray-cast back onto it
    let cam = Camera::default();
    let vp = cam.view_proj(800.0 / 600.0);
    let surface = Vec3::new(0.2, 0.1, 0.5);
    let px = project_to_pixels(surface, &vp, 800.0, 600.0).unwrap();
    let (o, d) = cam.screen_ray(px.x, px.y, 800.0, 600.0);
    let t = unit_box().ray_hit(o, d).unwrap();
    assert!(((o + d * t) - surface).length() < 1e-2);
}
