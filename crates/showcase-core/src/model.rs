//! CPU-side geometry: pedestal primitives, glTF extraction and cube faces.

use crate::loader::LoadError;
use glam::{Mat3, Mat4, Vec3};
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Indexed triangle list with a single base colour.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
}

impl MeshData {
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut it = self.vertices.iter().map(|v| Vec3::from(v.position));
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }
}

/// A loaded model: every primitive of the chosen subtree with node transforms
/// baked in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelData {
    pub name: Option<String>,
    pub meshes: Vec<MeshData>,
}

impl ModelData {
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(|m| m.indices.len() / 3).sum()
    }

    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        self.meshes
            .iter()
            .filter_map(MeshData::bounds)
            .reduce(|(alo, ahi), (blo, bhi)| (alo.min(blo), ahi.max(bhi)))
    }

    /// Builds a model from a parsed document and its resolved buffers.
    ///
    /// `node` picks one root node of the default scene; `None` takes every
    /// root.
    pub fn from_gltf(
        document: &gltf::Document,
        buffers: &[gltf::buffer::Data],
        node: Option<usize>,
    ) -> Result<Self, LoadError> {
        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next())
            .ok_or_else(|| LoadError::Parse("document has no scene".into()))?;

        let mut model = ModelData::default();
        match node {
            Some(index) => {
                let root = scene
                    .nodes()
                    .nth(index)
                    .ok_or(LoadError::MissingNode(index))?;
                model.name = root.name().map(str::to_string);
                collect_node(&root, Mat4::IDENTITY, buffers, &mut model.meshes)?;
            }
            None => {
                model.name = scene.name().map(str::to_string);
                for root in scene.nodes() {
                    collect_node(&root, Mat4::IDENTITY, buffers, &mut model.meshes)?;
                }
            }
        }
        if model.meshes.is_empty() {
            return Err(LoadError::Parse("no triangle meshes in model".into()));
        }
        Ok(model)
    }
}

fn collect_node(
    node: &gltf::Node,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut Vec<MeshData>,
) -> Result<(), LoadError> {
    let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
    if let Some(mesh) = node.mesh() {
        let normal_matrix = Mat3::from_mat4(world).inverse().transpose();
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::warn!("[model] skipping non-triangle primitive");
                continue;
            }
            let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| &d.0[..]));
            let Some(positions) = reader.read_positions() else {
                continue;
            };
            let positions: Vec<Vec3> = positions.map(Vec3::from).collect();
            let indices: Vec<u32> = match reader.read_indices() {
                Some(ix) => ix.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };
            let normals: Vec<Vec3> = match reader.read_normals() {
                Some(n) => n.map(Vec3::from).collect(),
                None => flat_normals(&positions, &indices),
            };
            if normals.len() != positions.len() {
                return Err(LoadError::Parse(format!(
                    "NORMAL has {} entries, POSITION has {}",
                    normals.len(),
                    positions.len()
                )));
            }
            let vertices = positions
                .iter()
                .zip(normals.iter())
                .map(|(p, n)| Vertex {
                    position: world.transform_point3(*p).to_array(),
                    normal: (normal_matrix * *n).normalize_or_zero().to_array(),
                })
                .collect();
            let base_color = primitive
                .material()
                .pbr_metallic_roughness()
                .base_color_factor();
            out.push(MeshData {
                vertices,
                indices,
                base_color,
            });
        }
    }
    for child in node.children() {
        collect_node(&child, world, buffers, out)?;
    }
    Ok(())
}

/// Per-vertex normals averaged from the faces that share each vertex.
fn flat_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += n;
        normals[b] += n;
        normals[c] += n;
    }
    normals.into_iter().map(Vec3::normalize_or_zero).collect()
}

/// External (non-embedded, non-GLB) buffer URIs the host must fetch, in
/// buffer index order. Embedded buffers yield `None`.
pub fn external_buffer_uris(document: &gltf::Document) -> Vec<Option<String>> {
    document
        .buffers()
        .map(|b| match b.source() {
            gltf::buffer::Source::Uri(uri) if !uri.starts_with("data:") => Some(uri.to_string()),
            _ => None,
        })
        .collect()
}

/// Resolves a relative asset URI against the URL of the file referencing it.
pub fn resolve_relative(base_url: &str, uri: &str) -> String {
    if uri.contains("://") || uri.starts_with('/') {
        return uri.to_string();
    }
    match base_url.rfind('/') {
        Some(i) => format!("{}/{}", &base_url[..i], uri),
        None => uri.to_string(),
    }
}

/// Closed cylinder centred on the origin along +Y.
pub fn cylinder_mesh(radius: f32, height: f32, segments: u32, color: [f32; 4]) -> MeshData {
    let segments = segments.max(3);
    let half = height * 0.5;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    // Side wall: duplicated seam vertex so normals stay radial.
    for i in 0..=segments {
        let a = TAU * i as f32 / segments as f32;
        let (s, c) = a.sin_cos();
        let normal = [s, 0.0, c];
        vertices.push(Vertex {
            position: [radius * s, -half, radius * c],
            normal,
        });
        vertices.push(Vertex {
            position: [radius * s, half, radius * c],
            normal,
        });
    }
    for i in 0..segments {
        let b = i * 2;
        indices.extend_from_slice(&[b, b + 2, b + 1, b + 1, b + 2, b + 3]);
    }

    // Caps
    for (y, ny) in [(half, 1.0_f32), (-half, -1.0_f32)] {
        let centre = vertices.len() as u32;
        vertices.push(Vertex {
            position: [0.0, y, 0.0],
            normal: [0.0, ny, 0.0],
        });
        for i in 0..=segments {
            let a = TAU * i as f32 / segments as f32;
            let (s, c) = a.sin_cos();
            vertices.push(Vertex {
                position: [radius * s, y, radius * c],
                normal: [0.0, ny, 0.0],
            });
        }
        for i in 0..segments {
            let (p, q) = (centre + 1 + i, centre + 2 + i);
            if ny > 0.0 {
                indices.extend_from_slice(&[centre, p, q]);
            } else {
                indices.extend_from_slice(&[centre, q, p]);
            }
        }
    }

    MeshData {
        vertices,
        indices,
        base_color: color,
    }
}

/// Six RGBA8 faces of an environment cube map, in +x, -x, +y, -y, +z, -z order.
#[derive(Clone, Debug, PartialEq)]
pub struct CubeFaces {
    pub size: u32,
    pub faces: [Vec<u8>; 6],
}

impl CubeFaces {
    /// Decodes six encoded images (PNG or JPEG). All faces must be square and
    /// the same size.
    pub fn decode(encoded: [&[u8]; 6]) -> Result<Self, LoadError> {
        let mut size = None;
        let mut faces: [Vec<u8>; 6] = Default::default();
        for (i, bytes) in encoded.into_iter().enumerate() {
            let img = image::load_from_memory(bytes)
                .map_err(|e| LoadError::Image(e.to_string()))?
                .to_rgba8();
            let (w, h) = img.dimensions();
            if w != h {
                return Err(LoadError::Image(format!("cube face {i} is {w}x{h}, not square")));
            }
            match size {
                None => size = Some(w),
                Some(s) if s != w => {
                    return Err(LoadError::Image(format!(
                        "cube face {i} is {w}px, expected {s}px"
                    )))
                }
                _ => {}
            }
            faces[i] = img.into_raw();
        }
        Ok(Self {
            size: size.unwrap_or(0),
            faces,
        })
    }
}
