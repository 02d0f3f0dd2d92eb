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

//! The hard-coded cube and pyramid. Normals equal positions.

use super::{Indices, MeshData, Vertex};

const fn v(p: [f32; 3], uv: [f32; 2]) -> Vertex {
    Vertex::new(p, p, uv)
}

/// Cube corners.
pub const CUBE_VERTICES: [Vertex; 8] = [
    v([-1.0, 1.0, -1.0], [0.0, 0.0]),
    v([1.0, 1.0, -1.0], [1.0, 0.0]),
    v([-1.0, -1.0, -1.0], [0.0, 1.0]),
    v([1.0, -1.0, -1.0], [1.0, 1.0]),
    v([-1.0, 1.0, 1.0], [1.0, 0.0]),
    v([1.0, 1.0, 1.0], [0.0, 0.0]),
    v([-1.0, -1.0, 1.0], [1.0, 1.0]),
    v([1.0, -1.0, 1.0], [0.0, 1.0]),
];

/// Cube triangles.
pub const CUBE_INDICES: [u16; 36] = [
    0, 1, 2, 2, 1, 3, //
    6, 5, 4, 7, 5, 6, //
    1, 5, 3, 5, 7, 3, //
    4, 0, 6, 6, 0, 2, //
    4, 5, 0, 0, 5, 1, //
    2, 7, 6, 3, 7, 2, //
];

/// Pyramid apex and base corners.
pub const PYRAMID_VERTICES: [Vertex; 5] = [
    v([0.0, 1.0, 0.0], [0.0, 0.0]),
    v([1.0, -1.0, -1.0], [1.0, 0.0]),
    v([-1.0, -1.0, -1.0], [1.0, 1.0]),
    v([-1.0, -1.0, 1.0], [-1.0, 0.0]),
    v([1.0, -1.0, 1.0], [-1.0, -1.0]),
];

/// Pyramid triangles: four sides then the two base halves.
pub const PYRAMID_INDICES: [u16; 18] = [
    0, 1, 2, 0, 2, 3, 0, 3, 4, 0, 4, 1, //
    1, 2, 3, 3, 4, 1, //
];

/// Builds the cube mesh.
pub fn cube_mesh() -> MeshData {
    MeshData {
        vertices: CUBE_VERTICES.to_vec(),
        indices: Indices::U16(CUBE_INDICES.to_vec()),
    }
}

/// Builds the pyramid mesh.
pub fn pyramid_mesh() -> MeshData {
    MeshData {
        vertices: PYRAMID_VERTICES.to_vec(),
        indices: Indices::U16(PYRAMID_INDICES.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_meshes_are_valid() {
        let cube = cube_mesh();
        assert!(cube.is_valid());
        assert_eq!(cube.index_count(), 36);
        let pyramid = pyramid_mesh();
        assert!(pyramid.is_valid());
        assert_eq!(pyramid.index_count(), 18);
    }

    #[test]
    fn test_cube_normals_are_positions() {
        assert!(CUBE_VERTICES.iter().all(|v| v.normal == v.position));
    }
}
