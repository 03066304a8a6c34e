// Host-side tests for the tween scheduler.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod tween {
    include!("../src/core/tween.rs");
}

use glam::Vec3;
use std::cell::RefCell;
use std::rc::Rc;
use tween::*;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Target {
    A,
    B,
}

#[test]
fn ease_out_cubic_endpoints_and_shape() {
    assert_eq!(ease_out_cubic(0.0), 0.0);
    assert_eq!(ease_out_cubic(1.0), 1.0);
    // Front-loaded: more than half way at the midpoint
    assert!(ease_out_cubic(0.5) > 0.5);
    // Clamped outside [0, 1]
    assert_eq!(ease_out_cubic(-1.0), 0.0);
    assert_eq!(ease_out_cubic(2.0), 1.0);
}

#[test]
fn untouched_axes_keep_their_start_value() {
    let mut s = TweenScheduler::new();
    let start = Vec3::new(0.1, 0.2, 0.3);
    s.animate(Target::A, start, AxisTargets::x(1.0), 1.0, 0.0, None);
    let mut last = Vec3::ZERO;
    s.advance(0.5, |_, v| last = v);
    assert!(last.x > 0.1 && last.x < 1.0);
    assert_eq!(last.y, 0.2);
    assert_eq!(last.z, 0.3);
}

#[test]
fn finishes_exactly_on_target_and_is_removed() {
    let mut s = TweenScheduler::new();
    s.animate(Target::A, Vec3::ZERO, AxisTargets::x(0.25), 0.15, 10.0, None);
    assert_eq!(s.active(), 1);
    let mut last = Vec3::ZERO;
    s.advance(10.5, |_, v| last = v);
    assert_eq!(last.x, 0.25);
    assert_eq!(s.active(), 0);
    assert!(!s.is_animating(Target::A));
}

#[test]
fn zero_duration_completes_on_first_advance() {
    let mut s = TweenScheduler::new();
    let done = Rc::new(RefCell::new(false));
    let flag = done.clone();
    s.animate(
        Target::A,
        Vec3::ZERO,
        AxisTargets::all(Vec3::ONE),
        0.0,
        0.0,
        Some(Box::new(move |_, end, _| {
            assert_eq!(end, Vec3::ONE);
            *flag.borrow_mut() = true;
        })),
    );
    let mut last = Vec3::ZERO;
    s.advance(0.0, |_, v| last = v);
    assert_eq!(last, Vec3::ONE);
    assert!(*done.borrow());
}

#[test]
fn later_tween_on_same_target_wins() {
    let mut s = TweenScheduler::new();
    s.animate(Target::A, Vec3::ZERO, AxisTargets::x(1.0), 1.0, 0.0, None);
    s.animate(Target::A, Vec3::ZERO, AxisTargets::x(-1.0), 1.0, 0.0, None);
    assert_eq!(s.active(), 2);
    let mut last = Vec3::ZERO;
    s.advance(0.5, |t, v| {
        if t == Target::A {
            last = v;
        }
    });
    assert!(last.x < 0.0, "second tween should overwrite the first");
}

#[test]
fn independent_targets_do_not_interfere() {
    let mut s = TweenScheduler::new();
    s.animate(Target::A, Vec3::ZERO, AxisTargets::x(1.0), 1.0, 0.0, None);
    s.animate(Target::B, Vec3::ZERO, AxisTargets::x(2.0), 2.0, 0.0, None);
    let mut a = Vec3::ZERO;
    let mut b = Vec3::ZERO;
    s.advance(1.0, |t, v| match t {
        Target::A => a = v,
        Target::B => b = v,
    });
    assert_eq!(a.x, 1.0);
    assert!(b.x > 0.0 && b.x < 2.0);
    assert!(!s.is_animating(Target::A));
    assert!(s.is_animating(Target::B));
}

#[test]
fn completion_can_chain_a_release() {
    // Press to 0.25 then spring back to 0.0, as the play button does
    let mut s = TweenScheduler::new();
    s.animate(
        Target::A,
        Vec3::ZERO,
        AxisTargets::x(0.25),
        0.15,
        0.0,
        Some(Box::new(|sched: &mut TweenScheduler<Target>, end, at| {
            sched.animate(Target::A, end, AxisTargets::x(0.0), 0.25, at, None);
        })),
    );
    let mut last = Vec3::ZERO;
    s.advance(0.15, |_, v| last = v);
    assert_eq!(last.x, 0.25);
    assert_eq!(s.active(), 1, "release tween queued by completion");

    s.advance(0.25, |_, v| last = v);
    assert!(last.x > 0.0 && last.x < 0.25);

    s.advance(0.5, |_, v| last = v);
    assert_eq!(last.x, 0.0);
    assert_eq!(s.active(), 0);
}

#[test]
fn advance_before_start_holds_start_value() {
    let mut s = TweenScheduler::new();
    s.animate(Target::A, Vec3::splat(0.5), AxisTargets::x(1.0), 1.0, 5.0, None);
    let mut last = Vec3::ZERO;
    s.advance(4.0, |_, v| last = v);
    assert_eq!(last, Vec3::splat(0.5));
}
