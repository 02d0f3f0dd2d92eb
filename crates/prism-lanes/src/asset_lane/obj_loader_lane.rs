// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Wavefront OBJ mesh decoding.

use super::{AssetError, AssetLoaderLane};
use ahash::AHashMap;
use prism_core::math::Vec3;
use prism_data::geometry::{Indices, MeshData, Vertex};

/// Lane for loading OBJ meshes.
///
/// All models of the file are merged into one triangle list. Texture
/// coordinates are flipped to a top-left origin, and smooth normals are
/// generated when the file has none.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjLoaderLane;

impl AssetLoaderLane<MeshData> for ObjLoaderLane {
    fn load(&self, bytes: &[u8]) -> Result<MeshData, AssetError> {
        let (models, _materials) = tobj::load_obj_buf(
            &mut std::io::Cursor::new(bytes),
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
            // Materials are not used; textures come from the scene document.
            |_| Ok((Vec::new(), AHashMap::new())),
        )?;

        if models.is_empty() {
            return Err(AssetError::Invalid("no models found in OBJ file".to_owned()));
        }

        let mut vertices: Vec<Vertex> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();
        let mut needs_normals = false;

        for model in &models {
            let mesh = &model.mesh;
            let base = vertices.len() as u32;
            let count = mesh.positions.len() / 3;
            needs_normals |= mesh.normals.len() < count * 3;

            for i in 0..count {
                let p = &mesh.positions[i * 3..i * 3 + 3];
                let normal = mesh
                    .normals
                    .get(i * 3..i * 3 + 3)
                    .map_or([0.0; 3], |n| [n[0], n[1], n[2]]);
                let uv = mesh
                    .texcoords
                    .get(i * 2..i * 2 + 2)
                    .map_or([0.0; 2], |t| [t[0], 1.0 - t[1]]);
                vertices.push(Vertex::new([p[0], p[1], p[2]], normal, uv));
            }
            indices.extend(mesh.indices.iter().map(|&i| base + i));
        }

        if indices.is_empty() {
            return Err(AssetError::Invalid("OBJ file has no faces".to_owned()));
        }
        if needs_normals {
            generate_smooth_normals(&mut vertices, &indices);
        }

        let indices = if vertices.len() <= usize::from(u16::MAX) {
            Indices::U16(indices.iter().map(|&i| i as u16).collect())
        } else {
            Indices::U32(indices)
        };

        let mesh = MeshData { vertices, indices };
        if !mesh.is_valid() {
            return Err(AssetError::Invalid("OBJ index out of range".to_owned()));
        }
        Ok(mesh)
    }
}

/// Replaces every normal with the normalized sum of the face normals around it.
fn generate_smooth_normals(vertices: &mut [Vertex], indices: &[u32]) {
    let mut sums = vec![Vec3::ZERO; vertices.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= vertices.len() || b >= vertices.len() || c >= vertices.len() {
            continue;
        }
        let pa = Vec3::from(vertices[a].position);
        let pb = Vec3::from(vertices[b].position);
        let pc = Vec3::from(vertices[c].position);
        let face = (pb - pa).cross(pc - pa);
        sums[a] += face;
        sums[b] += face;
        sums[c] += face;
    }
    for (vertex, sum) in vertices.iter_mut().zip(sums) {
        let n = sum.normalize();
        vertex.normal = [n.x, n.y, n.z];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const QUAD: &str = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
f 1/1 2/2 3/3 4/4
";

    #[test]
    fn test_loads_and_triangulates_quad() {
        let mesh = ObjLoaderLane.load(QUAD.as_bytes()).unwrap();
        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.index_count(), 6);
        assert!(matches!(mesh.indices, Indices::U16(_)));
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_flips_texture_v() {
        let mesh = ObjLoaderLane.load(QUAD.as_bytes()).unwrap();
        let top = mesh.vertices.iter().find(|v| v.position == [0.0, 1.0, 0.0]).unwrap();
        assert_relative_eq!(top.uv[1], 0.0);
    }

    #[test]
    fn test_generates_normals_facing_the_ccw_side() {
        let mesh = ObjLoaderLane.load(QUAD.as_bytes()).unwrap();
        for v in &mesh.vertices {
            assert_relative_eq!(v.normal[2], 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_merges_models() {
        let two = "o a\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\no b\nv 0 0 1\nv 1 0 1\nv 0 1 1\nf 4 5 6\n";
        let mesh = ObjLoaderLane.load(two.as_bytes()).unwrap();
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.indices.max_index(), Some(5));
    }

    #[test]
    fn test_empty_file_is_rejected() {
        assert!(ObjLoaderLane.load(b"# nothing here\n").is_err());
    }
}
