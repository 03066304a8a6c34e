// Host-side tests for the scene graph, node slots and button registry.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod scene {
    include!("../src/core/scene.rs");
}

use glam::{Mat4, Quat, Vec3};
use scene::*;

fn node(name: &str, parent: Option<NodeId>, translation: Vec3) -> Node {
    Node {
        name: name.to_string(),
        parent,
        translation,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
        mesh: None,
    }
}

fn boombox_graph() -> SceneGraph {
    let mut pause = node("pause-button", Some(0), Vec3::new(0.3, 0.5, 0.0));
    pause.rotation = Quat::from_rotation_x(0.25);
    SceneGraph {
        nodes: vec![
            node("Body", None, Vec3::new(0.0, 1.0, 0.0)),
            node("play-button", Some(0), Vec3::new(-0.3, 0.5, 0.0)),
            pause,
            node("Speakers_001", Some(0), Vec3::new(-1.0, 0.0, 0.2)),
            node("Speakers_002", Some(0), Vec3::new(1.0, 0.0, 0.2)),
            node("Cone", Some(4), Vec3::ZERO),
        ],
    }
}

#[test]
fn aabb_basics() {
    let b = Aabb::from_points([Vec3::new(-1.0, 0.0, 2.0), Vec3::new(1.0, 3.0, -2.0)]);
    assert_eq!(b.center(), Vec3::new(0.0, 1.5, 0.0));
    assert_eq!(b.size(), Vec3::new(2.0, 3.0, 4.0));
    assert_eq!(b.bottom_center(), Vec3::new(0.0, 0.0, 0.0));
    assert!(Aabb::EMPTY.is_empty());
    assert!(!b.is_empty());
    assert_eq!(Aabb::EMPTY.union(&b), b);
}

#[test]
fn transformed_box_encloses_rotated_corners() {
    let b = Aabb {
        min: Vec3::new(-2.0, -1.0, -1.0),
        max: Vec3::new(2.0, 1.0, 1.0),
    };
    let t = b.transformed(&Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2));
    assert!((t.size().x - 2.0).abs() < 1e-5);
    assert!((t.size().y - 4.0).abs() < 1e-5);
    assert!(Aabb::EMPTY.transformed(&Mat4::IDENTITY).is_empty());
}

#[test]
fn ray_hit_entry_distance() {
    let b = Aabb {
        min: Vec3::splat(-1.0),
        max: Vec3::splat(1.0),
    };
    let t = b
        .ray_hit(Vec3::new(0.1, 0.1, 5.0), Vec3::new(0.0, 0.0, -1.0))
        .unwrap();
    assert!((t - 4.0).abs() < 1e-5);
    // Pointing away
    assert!(b
        .ray_hit(Vec3::new(0.1, 0.1, 5.0), Vec3::new(0.0, 0.0, 1.0))
        .is_none());
    // Origin inside the box
    assert_eq!(b.ray_hit(Vec3::new(0.1, 0.2, 0.3), Vec3::new(0.0, 0.0, 1.0)), Some(0.0));
    assert!(Aabb::EMPTY.ray_hit(Vec3::ZERO, Vec3::X).is_none());
}

#[test]
fn ray_triangle_inside_edges_and_behind() {
    let (a, b, c) = (
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
    );
    let down = Vec3::new(0.0, 0.0, -1.0);
    let t = ray_triangle(Vec3::new(0.0, 0.5, 3.0), down, a, b, c).unwrap();
    assert!((t - 3.0).abs() < 1e-5);
    // Back face counts too
    assert!(ray_triangle(Vec3::new(0.0, 0.5, -3.0), -down, a, b, c).is_some());
    // Outside the slanted edge
    assert!(ray_triangle(Vec3::new(0.9, 1.5, 3.0), down, a, b, c).is_none());
    // Triangle behind the origin
    assert!(ray_triangle(Vec3::new(0.0, 0.5, -3.0), down, a, b, c).is_none());
    // Ray parallel to the plane
    assert!(ray_triangle(Vec3::new(0.0, 0.5, 0.0), Vec3::X, a, b, c).is_none());
}

#[test]
fn globals_compose_parent_chain() {
    let g = boombox_graph();
    let globals = g.global_transforms(Mat4::IDENTITY, &[]);
    let cone = globals[5].transform_point3(Vec3::ZERO);
    assert!((cone - Vec3::new(1.0, 1.0, 0.2)).length() < 1e-6);

    let root = Mat4::from_translation(Vec3::new(0.0, 0.0, -3.0));
    let moved = g.global_transforms(root, &[]);
    let cone = moved[5].transform_point3(Vec3::ZERO);
    assert!((cone - Vec3::new(1.0, 1.0, -2.8)).length() < 1e-6);
}

#[test]
fn overrides_replace_local_channels() {
    let g = boombox_graph();
    let mut overrides = vec![NodeOverride::default(); g.nodes.len()];
    overrides[0].translation = Some(Vec3::ZERO);
    let globals = g.global_transforms(Mat4::IDENTITY, &overrides);
    let cone = globals[5].transform_point3(Vec3::ZERO);
    assert!((cone - Vec3::new(1.0, 0.0, 0.2)).length() < 1e-6);
}

#[test]
fn parent_order_does_not_matter() {
    // Child listed before its parent
    let g = SceneGraph {
        nodes: vec![
            node("child", Some(1), Vec3::X),
            node("parent", None, Vec3::Y),
        ],
    };
    let globals = g.global_transforms(Mat4::IDENTITY, &[]);
    assert!((globals[0].transform_point3(Vec3::ZERO) - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-6);
}

#[test]
fn slots_resolve_by_name() {
    let g = boombox_graph();
    let slots = SceneSlots::resolve(&g);
    assert_eq!(slots.button(ButtonSlot::Play), Some(1));
    assert_eq!(slots.button(ButtonSlot::Pause), Some(2));
    assert_eq!(slots.speakers, [Some(3), Some(4)]);
    assert!(slots.missing().is_empty());
}

#[test]
fn speaker_children_share_the_display() {
    let g = boombox_graph();
    let slots = SceneSlots::resolve(&g);
    assert!(slots.is_speaker(&g, 3));
    assert!(slots.is_speaker(&g, 5));
    assert!(!slots.is_speaker(&g, 0));
    assert!(!slots.is_speaker(&g, 1));
}

#[test]
fn missing_nodes_are_reported() {
    let g = SceneGraph {
        nodes: vec![node("Body", None, Vec3::ZERO), node("Speakers_002", Some(0), Vec3::ZERO)],
    };
    let slots = SceneSlots::resolve(&g);
    assert_eq!(slots.missing(), vec!["play-button", "pause-button", "Speakers_001"]);
    let reg = ButtonRegistry::capture(&g, &slots);
    assert!(reg.get(ButtonSlot::Play).is_none());
    assert!(reg.get(ButtonSlot::Pause).is_none());
}

#[test]
fn registry_captures_initial_euler() {
    let g = boombox_graph();
    let reg = ButtonRegistry::capture(&g, &SceneSlots::resolve(&g));
    let pause = reg.get(ButtonSlot::Pause).unwrap();
    assert_eq!(pause.node, 2);
    assert!((pause.initial.x - 0.25).abs() < 1e-5);
    assert!(pause.initial.y.abs() < 1e-5 && pause.initial.z.abs() < 1e-5);
    let play = reg.get(ButtonSlot::Play).unwrap();
    assert!(play.initial.length() < 1e-6);
}

#[test]
fn euler_round_trip_for_button_angles() {
    let e = Vec3::new(0.35, -0.1, 0.2);
    let back = quat_to_euler(euler_to_quat(e));
    assert!((back - e).length() < 1e-5);
}
