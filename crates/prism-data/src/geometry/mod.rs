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

//! CPU-side geometry: vertex layouts, index data and the built-in shapes.

mod primitives;
mod terrain;

pub use primitives::*;
pub use terrain::*;

use bytemuck::{Pod, Zeroable};
use prism_core::renderer::IndexFormat;

/// The vertex layout of scene meshes: position, normal and texture coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct Vertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space normal.
    pub normal: [f32; 3],
    /// Texture coordinates.
    pub uv: [f32; 2],
}

impl Vertex {
    /// Creates a vertex.
    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }
}

/// The vertex layout of the terrain grid: position and texture coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct TerrainVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Texture coordinates across the whole heightmap.
    pub uv: [f32; 2],
}

/// Index data in either 16- or 32-bit form.
#[derive(Debug, Clone, PartialEq)]
pub enum Indices {
    /// 16-bit indices.
    U16(Vec<u16>),
    /// 32-bit indices.
    U32(Vec<u32>),
}

impl Indices {
    /// Number of indices.
    pub fn len(&self) -> usize {
        match self {
            Self::U16(v) => v.len(),
            Self::U32(v) => v.len(),
        }
    }

    /// Returns `true` when there are no indices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// GPU format of the indices.
    pub fn format(&self) -> IndexFormat {
        match self {
            Self::U16(_) => IndexFormat::Uint16,
            Self::U32(_) => IndexFormat::Uint32,
        }
    }

    /// Raw bytes for upload.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::U16(v) => bytemuck::cast_slice(v),
            Self::U32(v) => bytemuck::cast_slice(v),
        }
    }

    /// Largest index value, or `None` when empty.
    pub fn max_index(&self) -> Option<u32> {
        match self {
            Self::U16(v) => v.iter().max().map(|&i| u32::from(i)),
            Self::U32(v) => v.iter().max().copied(),
        }
    }
}

/// An indexed triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData<V: Pod = Vertex> {
    /// Vertex data.
    pub vertices: Vec<V>,
    /// Triangle list indices into `vertices`.
    pub indices: Indices,
}

impl<V: Pod> MeshData<V> {
    /// Raw vertex bytes for upload.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Number of indices to draw.
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Returns `true` if every index points at an existing vertex.
    pub fn is_valid(&self) -> bool {
        match self.indices.max_index() {
            Some(max) => (max as usize) < self.vertices.len(),
            None => true,
        }
    }

    /// Returns `true` if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.indices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_sizes() {
        assert_eq!(std::mem::size_of::<Vertex>(), 32);
        assert_eq!(std::mem::size_of::<TerrainVertex>(), 20);
    }

    #[test]
    fn test_indices_bytes_and_format() {
        let short = Indices::U16(vec![0, 1, 2]);
        assert_eq!(short.as_bytes().len(), 6);
        assert_eq!(short.format(), IndexFormat::Uint16);
        let long = Indices::U32(vec![0, 1, 2]);
        assert_eq!(long.as_bytes().len(), 12);
        assert_eq!(long.max_index(), Some(2));
    }

    #[test]
    fn test_mesh_validation() {
        let mesh = MeshData {
            vertices: vec![Vertex::default(); 2],
            indices: Indices::U32(vec![0, 1, 2]),
        };
        assert!(!mesh.is_valid());
        assert!(!mesh.is_empty());
    }
}
