// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use input::*;

#[test]
fn keyboard_shortcuts() {
    assert_eq!(key_action(" "), Some(KeyAction::TogglePlayback));
    assert_eq!(key_action("Spacebar"), Some(KeyAction::TogglePlayback));
    assert_eq!(key_action("Enter"), Some(KeyAction::ToggleFullscreen));
    assert_eq!(key_action("Escape"), Some(KeyAction::ExitFullscreen));
    assert_eq!(key_action("p"), None);
    assert_eq!(key_action(""), None);
}

#[test]
fn css_position_scales_to_backing_pixels() {
    // Canvas at 2x device pixel ratio
    let p = css_to_backing_px(100.0, 50.0, 400.0, 300.0, 800.0, 600.0);
    assert_eq!(p, glam::Vec2::new(200.0, 100.0));
}

#[test]
fn zero_sized_rect_maps_to_origin() {
    let p = css_to_backing_px(10.0, 10.0, 0.0, 300.0, 800.0, 600.0);
    assert_eq!(p, glam::Vec2::ZERO);
}
