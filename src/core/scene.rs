// Scene graph, typed node slots and the button registry.
//
// Names are only consulted once, when a model is installed: `SceneSlots`
// turns them into plain indices and everything downstream works with those.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut out = Self::EMPTY;
        for p in points {
            out.include(p);
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    pub fn include(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Centre of the bottom face (minimum Y).
    pub fn bottom_center(&self) -> Vec3 {
        let c = self.center();
        Vec3::new(c.x, self.min.y, c.z)
    }

    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            Vec3::new(a.x, a.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, b.y, a.z),
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, b.y, b.z),
        ]
    }

    /// Bounds of this box after an affine transform.
    pub fn transformed(&self, m: &Mat4) -> Aabb {
        if self.is_empty() {
            return *self;
        }
        Aabb::from_points(self.corners().iter().map(|c| m.transform_point3(*c)))
    }

    /// Slab test. Returns the entry distance along `dir` when the ray hits.
    pub fn ray_hit(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        if self.is_empty() {
            return None;
        }
        let inv = dir.recip();
        let t0 = (self.min - origin) * inv;
        let t1 = (self.max - origin) * inv;
        let t_near = t0.min(t1).max_element();
        let t_far = t0.max(t1).min_element();
        if t_near > t_far || t_far < 0.0 {
            return None;
        }
        Some(t_near.max(0.0))
    }
}

/// Möller-Trumbore ray/triangle intersection, both faces. Returns the hit
/// distance along `dir` for hits in front of `origin`.
pub fn ray_triangle(origin: Vec3, dir: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Option<f32> {
    let e1 = b - a;
    let e2 = c - a;
    let p = dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < 1e-8 {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

pub type NodeId = usize;

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub parent: Option<NodeId>,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub mesh: Option<usize>,
}

impl Node {
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Per-node replacements applied on top of the authored local TRS.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeOverride {
    pub translation: Option<Vec3>,
    pub rotation: Option<Quat>,
    pub scale: Option<Vec3>,
}

#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    pub nodes: Vec<Node>,
}

impl SceneGraph {
    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name)
    }

    /// World matrices for every node, `root` applied above the top-level nodes.
    ///
    /// Parents are resolved recursively with memoisation so the node order in
    /// the source asset does not matter.
    pub fn global_transforms(&self, root: Mat4, overrides: &[NodeOverride]) -> Vec<Mat4> {
        let mut cache: Vec<Option<Mat4>> = vec![None; self.nodes.len()];
        for i in 0..self.nodes.len() {
            self.resolve(i, root, overrides, &mut cache);
        }
        cache.into_iter().map(|m| m.unwrap_or(root)).collect()
    }

    fn resolve(
        &self,
        i: NodeId,
        root: Mat4,
        overrides: &[NodeOverride],
        cache: &mut Vec<Option<Mat4>>,
    ) -> Mat4 {
        if let Some(m) = cache[i] {
            return m;
        }
        let node = &self.nodes[i];
        let o = overrides.get(i).copied().unwrap_or_default();
        let local = Mat4::from_scale_rotation_translation(
            o.scale.unwrap_or(node.scale),
            o.rotation.unwrap_or(node.rotation),
            o.translation.unwrap_or(node.translation),
        );
        let parent = match node.parent {
            Some(p) if p != i => self.resolve(p, root, overrides, cache),
            _ => root,
        };
        let m = parent * local;
        cache[i] = Some(m);
        m
    }
}

/// The two buttons the playback machine drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonSlot {
    Play,
    Pause,
}

impl ButtonSlot {
    pub fn node_name(self) -> &'static str {
        match self {
            ButtonSlot::Play => "play-button",
            ButtonSlot::Pause => "pause-button",
        }
    }
}

pub const SPEAKER_NODE_NAMES: [&str; 2] = ["Speakers_001", "Speakers_002"];

/// Typed handles into the graph, resolved once at load time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneSlots {
    pub play_button: Option<NodeId>,
    pub pause_button: Option<NodeId>,
    pub speakers: [Option<NodeId>; 2],
}

impl SceneSlots {
    pub fn resolve(graph: &SceneGraph) -> Self {
        Self {
            play_button: graph.find(ButtonSlot::Play.node_name()),
            pause_button: graph.find(ButtonSlot::Pause.node_name()),
            speakers: SPEAKER_NODE_NAMES.map(|n| graph.find(n)),
        }
    }

    pub fn button(&self, slot: ButtonSlot) -> Option<NodeId> {
        match slot {
            ButtonSlot::Play => self.play_button,
            ButtonSlot::Pause => self.pause_button,
        }
    }

    /// True when `node` or one of its ancestors is a speaker slot.
    pub fn is_speaker(&self, graph: &SceneGraph, node: NodeId) -> bool {
        let mut cur = Some(node);
        let mut hops = 0;
        while let Some(n) = cur {
            if self.speakers.contains(&Some(n)) {
                return true;
            }
            hops += 1;
            if hops > graph.nodes.len() {
                break;
            }
            cur = graph.nodes.get(n).and_then(|x| x.parent);
        }
        false
    }

    /// Names of expected nodes that the asset did not provide.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.play_button.is_none() {
            out.push(ButtonSlot::Play.node_name());
        }
        if self.pause_button.is_none() {
            out.push(ButtonSlot::Pause.node_name());
        }
        for (slot, name) in self.speakers.iter().zip(SPEAKER_NODE_NAMES) {
            if slot.is_none() {
                out.push(name);
            }
        }
        out
    }
}

/// A registered button: its node and the Euler rotation captured at load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegisteredButton {
    pub node: NodeId,
    pub initial: Vec3,
}

/// Initial button rotations, the stable origin every button tween composes from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ButtonRegistry {
    play: Option<RegisteredButton>,
    pause: Option<RegisteredButton>,
}

impl ButtonRegistry {
    pub fn capture(graph: &SceneGraph, slots: &SceneSlots) -> Self {
        let register = |node: Option<NodeId>| {
            node.map(|n| RegisteredButton {
                node: n,
                initial: quat_to_euler(graph.nodes[n].rotation),
            })
        };
        Self {
            play: register(slots.play_button),
            pause: register(slots.pause_button),
        }
    }

    pub fn get(&self, slot: ButtonSlot) -> Option<RegisteredButton> {
        match slot {
            ButtonSlot::Play => self.play,
            ButtonSlot::Pause => self.pause,
        }
    }
}

#[inline]
pub fn quat_to_euler(q: Quat) -> Vec3 {
    let (x, y, z) = q.to_euler(EulerRot::XYZ);
    Vec3::new(x, y, z)
}

#[inline]
pub fn euler_to_quat(e: Vec3) -> Quat {
    Quat::from_euler(EulerRot::XYZ, e.x, e.y, e.z)
}
