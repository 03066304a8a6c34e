// Host-side tests for pointer-driven rotation.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod pointer {
    include!("../src/core/pointer.rs");
}

use pointer::*;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn pointer_normalises_to_unit_square() {
    assert_eq!(normalized_pointer(0.0, 0.0, 800.0, 600.0), [-1.0, -1.0]);
    assert_eq!(normalized_pointer(400.0, 300.0, 800.0, 600.0), [0.0, 0.0]);
    assert_eq!(normalized_pointer(800.0, 600.0, 800.0, 600.0), [1.0, 1.0]);
    // Outside the window clamps
    assert_eq!(normalized_pointer(2000.0, -50.0, 800.0, 600.0), [1.0, -1.0]);
}

#[test]
fn degenerate_viewport_maps_to_centre() {
    assert_eq!(normalized_pointer(10.0, 10.0, 0.0, 600.0), [0.0, 0.0]);
    assert_eq!(normalized_pointer(10.0, 10.0, 800.0, -1.0), [0.0, 0.0]);
}

#[test]
fn target_rotation_hits_limits_at_edges() {
    let r = target_rotation(1.0, 1.0);
    assert!(approx(r.y, 20f32.to_radians()));
    assert!(approx(r.x, 10f32.to_radians()));
    let r = target_rotation(-1.0, -1.0);
    assert!(approx(r.y, -20f32.to_radians()));
    assert!(approx(r.x, -10f32.to_radians()));
    // Beyond the edge stays clamped
    let r = target_rotation(3.0, -3.0);
    assert!(approx(r.y, 20f32.to_radians()));
    assert!(approx(r.x, -10f32.to_radians()));
}

#[test]
fn centre_pointer_means_no_rotation() {
    assert_eq!(target_rotation(0.0, 0.0), ModelRotation::default());
}

#[test]
fn smoothing_moves_five_percent_per_step() {
    let target = ModelRotation { x: 1.0, y: -1.0 };
    let next = smooth_step(ModelRotation::default(), target);
    assert!(approx(next.x, 0.05));
    assert!(approx(next.y, -0.05));
}

#[test]
fn smoothing_converges_without_overshoot() {
    let target = target_rotation(0.6, -0.4);
    let mut cur = ModelRotation::default();
    // Distance shrinks on every step while it is well above f32 resolution
    for _ in 0..120 {
        let next = smooth_step(cur, target);
        assert!((target.x - next.x).abs() < (target.x - cur.x).abs());
        assert!((target.y - next.y).abs() < (target.y - cur.y).abs());
        assert!(next.y.abs() <= target.y.abs() + 1e-6);
        assert!(next.x.abs() <= target.x.abs() + 1e-6);
        cur = next;
    }
    for _ in 0..280 {
        let next = smooth_step(cur, target);
        assert!((target.x - next.x).abs() <= (target.x - cur.x).abs());
        assert!((target.y - next.y).abs() <= (target.y - cur.y).abs());
        cur = next;
    }
    assert!(approx(cur.x, target.x));
    assert!(approx(cur.y, target.y));
}
