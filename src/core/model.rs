// glTF model decoding into the viewer's scene types.
//
// Only static geometry, the node hierarchy and keyframe clips are read;
// skins, morph targets and textures are ignored.

use fnv::FnvHashMap;
use glam::{Mat4, Quat, Vec3};

use super::anim::{AnimClip, TrackQuat, TrackVec3};
use super::error::AssetError;
use super::scene::{ray_triangle, Aabb, Node, SceneGraph};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub pos: [f32; 3],
    pub nrm: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialFactors {
    pub base_color: [f32; 4],
    pub emissive: [f32; 3],
    pub metallic: f32,
    pub roughness: f32,
}

impl Default for MaterialFactors {
    fn default() -> Self {
        Self {
            base_color: [0.8, 0.8, 0.8, 1.0],
            emissive: [0.0; 3],
            metallic: 0.0,
            roughness: 0.6,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Primitive {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub material: MaterialFactors,
}

#[derive(Debug, Clone)]
pub struct MeshData {
    pub name: String,
    pub primitives: Vec<Primitive>,
    pub bounds: Aabb,
}

#[derive(Debug, Clone)]
pub struct ModelAsset {
    pub graph: SceneGraph,
    pub meshes: Vec<MeshData>,
    pub clips: Vec<AnimClip>,
    /// Bounds of all mesh nodes in model space with authored transforms.
    pub bounds: Aabb,
}

impl ModelAsset {
    /// Decode a `.glb` or self-contained `.gltf` (data-URI buffers).
    pub fn from_slice(bytes: &[u8]) -> Result<Self, AssetError> {
        let (doc, buffers, _images) = gltf::import_slice(bytes)?;

        let mut meshes = Vec::new();
        for mesh in doc.meshes() {
            let mut primitives = Vec::new();
            let mut bounds = Aabb::EMPTY;
            for prim in mesh.primitives() {
                if prim.mode() != gltf::mesh::Mode::Triangles {
                    continue;
                }
                let reader = prim.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
                let positions: Vec<[f32; 3]> = match reader.read_positions() {
                    Some(it) => it.collect(),
                    None => return Err(AssetError::MissingBuffer { mesh: mesh.index() }),
                };
                let normals: Vec<[f32; 3]> = match reader.read_normals() {
                    Some(it) => it.collect(),
                    None => vec![[0.0, 1.0, 0.0]; positions.len()],
                };
                let uvs: Vec<[f32; 2]> = match reader.read_tex_coords(0) {
                    Some(tc) => tc.into_f32().collect(),
                    None => vec![[0.0, 0.0]; positions.len()],
                };
                let indices: Vec<u32> = match reader.read_indices() {
                    Some(ix) => ix.into_u32().collect(),
                    None => (0..positions.len() as u32).collect(),
                };
                let vertices: Vec<Vertex> = positions
                    .iter()
                    .enumerate()
                    .map(|(i, p)| Vertex {
                        pos: *p,
                        nrm: normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                        uv: uvs.get(i).copied().unwrap_or([0.0, 0.0]),
                    })
                    .collect();
                for p in &positions {
                    bounds.include(Vec3::from(*p));
                }
                let pbr = prim.material().pbr_metallic_roughness();
                primitives.push(Primitive {
                    vertices,
                    indices,
                    material: MaterialFactors {
                        base_color: pbr.base_color_factor(),
                        emissive: prim.material().emissive_factor(),
                        metallic: pbr.metallic_factor(),
                        roughness: pbr.roughness_factor(),
                    },
                });
            }
            meshes.push(MeshData {
                name: mesh.name().unwrap_or_default().to_string(),
                primitives,
                bounds,
            });
        }

        let mut nodes: Vec<Node> = doc
            .nodes()
            .map(|n| {
                let (t, r, s) = n.transform().decomposed();
                Node {
                    name: n.name().unwrap_or_default().to_string(),
                    parent: None,
                    translation: Vec3::from(t),
                    rotation: Quat::from_array(r).normalize(),
                    scale: Vec3::from(s),
                    mesh: n.mesh().map(|m| m.index()),
                }
            })
            .collect();
        for n in doc.nodes() {
            for child in n.children() {
                nodes[child.index()].parent = Some(n.index());
            }
        }
        let graph = SceneGraph { nodes };

        let clips = doc
            .animations()
            .map(|a| read_clip(&a, &buffers))
            .collect();

        let globals = graph.global_transforms(Mat4::IDENTITY, &[]);
        let mut bounds = Aabb::EMPTY;
        for (i, node) in graph.nodes.iter().enumerate() {
            if let Some(mesh) = node.mesh.and_then(|m| meshes.get(m)) {
                if !mesh.bounds.is_empty() {
                    bounds = bounds.union(&mesh.bounds.transformed(&globals[i]));
                }
            }
        }
        if bounds.is_empty() {
            return Err(AssetError::EmptyModel);
        }

        log::info!(
            "[assets] model: nodes={} meshes={} clips={}",
            graph.nodes.len(),
            meshes.len(),
            doc.animations().count()
        );
        Ok(Self {
            graph,
            meshes,
            clips,
            bounds,
        })
    }
}

impl ModelAsset {
    /// Nearest hit of a world-space ray on the model's triangles, with
    /// `globals` holding each node's world matrix for this frame. Meshes whose
    /// transformed bounds the ray misses are skipped.
    pub fn ray_hit(&self, globals: &[Mat4], origin: Vec3, dir: Vec3) -> Option<f32> {
        let mut nearest: Option<f32> = None;
        for (node, m) in self.graph.nodes.iter().zip(globals) {
            let Some(mesh) = node.mesh.and_then(|i| self.meshes.get(i)) else {
                continue;
            };
            let Some(entry) = mesh.bounds.transformed(m).ray_hit(origin, dir) else {
                continue;
            };
            if nearest.is_some_and(|t| t < entry) {
                continue;
            }
            for prim in &mesh.primitives {
                let world = |i: &u32| {
                    prim.vertices
                        .get(*i as usize)
                        .map(|v| m.transform_point3(Vec3::from(v.pos)))
                };
                for tri in prim.indices.chunks_exact(3) {
                    let (Some(a), Some(b), Some(c)) = (world(&tri[0]), world(&tri[1]), world(&tri[2]))
                    else {
                        continue;
                    };
                    if let Some(t) = ray_triangle(origin, dir, a, b, c) {
                        nearest = Some(nearest.map_or(t, |n| n.min(t)));
                    }
                }
            }
        }
        nearest
    }
}

fn read_clip(anim: &gltf::Animation, buffers: &[gltf::buffer::Data]) -> AnimClip {
    use gltf::animation::util::ReadOutputs;

    let mut translations = FnvHashMap::default();
    let mut rotations = FnvHashMap::default();
    let mut scales = FnvHashMap::default();
    let mut duration = 0.0f32;
    for ch in anim.channels() {
        let node = ch.target().node().index();
        let reader = ch.reader(|b| buffers.get(b.index()).map(|d| d.0.as_slice()));
        let Some(inputs) = reader.read_inputs() else {
            continue;
        };
        let times: Vec<f32> = inputs.collect();
        if let Some(last) = times.last() {
            duration = duration.max(*last);
        }
        match reader.read_outputs() {
            Some(ReadOutputs::Translations(it)) => {
                let values = it.map(Vec3::from).collect();
                translations.insert(node, TrackVec3 { times, values });
            }
            Some(ReadOutputs::Rotations(it)) => {
                let values = it
                    .into_f32()
                    .map(|v| Quat::from_array(v).normalize())
                    .collect();
                rotations.insert(node, TrackQuat { times, values });
            }
            Some(ReadOutputs::Scales(it)) => {
                let values = it.map(Vec3::from).collect();
                scales.insert(node, TrackVec3 { times, values });
            }
            _ => {}
        }
    }
    AnimClip {
        name: anim.name().unwrap_or_default().to_string(),
        duration,
        translations,
        rotations,
        scales,
    }
}
