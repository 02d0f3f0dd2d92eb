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

//! Raw heightmaps and the flat terrain grid built over them.

use super::{Indices, MeshData, TerrainVertex};

/// A grid of terrain heights decoded from an 8-bit raw file.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    width: u32,
    depth: u32,
    heights: Vec<f32>,
}

impl Heightmap {
    /// Decodes row-major 8-bit samples, mapping `255` to `height_scale`.
    ///
    /// Missing trailing samples read as zero and extra bytes are ignored.
    pub fn from_raw_bytes(bytes: &[u8], width: u32, depth: u32, height_scale: f32) -> Self {
        let count = (width as usize) * (depth as usize);
        if bytes.len() < count {
            log::warn!(
                "Heightmap holds {} samples, expected {count}; padding with zeros",
                bytes.len()
            );
        }
        let heights = (0..count)
            .map(|i| f32::from(bytes.get(i).copied().unwrap_or(0)) / 255.0 * height_scale)
            .collect();
        Self {
            width,
            depth,
            heights,
        }
    }

    /// A heightmap with every sample at zero.
    pub fn flat(width: u32, depth: u32) -> Self {
        Self {
            width,
            depth,
            heights: vec![0.0; (width as usize) * (depth as usize)],
        }
    }

    /// Number of samples along X.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of samples along Z.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Height at an integer sample, clamped to the edges.
    pub fn height_at(&self, x: u32, z: u32) -> f32 {
        if self.width == 0 || self.depth == 0 {
            return 0.0;
        }
        let x = x.min(self.width - 1) as usize;
        let z = z.min(self.depth - 1) as usize;
        self.heights[z * self.width as usize + x]
    }

    /// Bilinearly filtered height at normalized coordinates in `[0, 1]`.
    pub fn sample(&self, u: f32, v: f32) -> f32 {
        if self.width == 0 || self.depth == 0 {
            return 0.0;
        }
        let fx = u.clamp(0.0, 1.0) * (self.width - 1) as f32;
        let fz = v.clamp(0.0, 1.0) * (self.depth - 1) as f32;
        let (x0, z0) = (fx.floor() as u32, fz.floor() as u32);
        let (tx, tz) = (fx - x0 as f32, fz - z0 as f32);

        let h00 = self.height_at(x0, z0);
        let h10 = self.height_at(x0 + 1, z0);
        let h01 = self.height_at(x0, z0 + 1);
        let h11 = self.height_at(x0 + 1, z0 + 1);

        let top = h00 + (h10 - h00) * tx;
        let bottom = h01 + (h11 - h01) * tx;
        top + (bottom - top) * tz
    }
}

/// Builds the terrain grid: `rows` x `cols` vertices laid out over the
/// heightmap extents, displaced by the sampled heights.
///
/// The patch spacing uses integer division of the heightmap size, so a
/// 513-sample map with 400 columns yields unit spacing.
pub fn build_terrain_grid(heightmap: &Heightmap, rows: u32, cols: u32) -> MeshData<TerrainVertex> {
    if rows < 2 || cols < 2 {
        return MeshData {
            vertices: Vec::new(),
            indices: Indices::U32(Vec::new()),
        };
    }

    let half_width = 0.5 * heightmap.width() as f32;
    let half_depth = 0.5 * heightmap.depth() as f32;
    let patch_width = (heightmap.width() / (cols - 1)) as f32;
    let patch_depth = (heightmap.depth() / (rows - 1)) as f32;
    let du = 1.0 / (cols - 1) as f32;
    let dv = 1.0 / (rows - 1) as f32;

    let mut vertices = Vec::with_capacity((rows * cols) as usize);
    for i in 0..rows {
        let z = i as f32 * patch_depth - half_depth;
        for j in 0..cols {
            let x = -half_width + j as f32 * patch_width;
            let (u, v) = (j as f32 * du, i as f32 * dv);
            vertices.push(TerrainVertex {
                position: [x, heightmap.sample(u, v), z],
                uv: [u, v],
            });
        }
    }

    let mut indices = Vec::with_capacity(((rows - 1) * (cols - 1) * 6) as usize);
    for i in 0..rows - 1 {
        for j in 0..cols - 1 {
            let top_left = i * cols + j;
            let top_right = i * cols + j + 1;
            let bottom_left = (i + 1) * cols + j;
            let bottom_right = (i + 1) * cols + j + 1;
            indices.extend_from_slice(&[
                top_right,
                bottom_left,
                bottom_right,
                top_left,
                bottom_left,
                top_right,
            ]);
        }
    }

    MeshData {
        vertices,
        indices: Indices::U32(indices),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_heightmap_scaling_and_padding() {
        let map = Heightmap::from_raw_bytes(&[0, 255, 51], 2, 2, 10.0);
        assert_relative_eq!(map.height_at(0, 0), 0.0);
        assert_relative_eq!(map.height_at(1, 0), 10.0);
        assert_relative_eq!(map.height_at(0, 1), 2.0);
        assert_relative_eq!(map.height_at(1, 1), 0.0);
    }

    #[test]
    fn test_bilinear_sample_midpoint() {
        let map = Heightmap::from_raw_bytes(&[0, 255, 0, 255], 2, 2, 10.0);
        assert_relative_eq!(map.sample(0.5, 0.5), 5.0, epsilon = 1e-5);
        assert_relative_eq!(map.sample(1.0, 0.0), 10.0, epsilon = 1e-5);
    }

    #[test]
    fn test_grid_dimensions_and_index_pattern() {
        let map = Heightmap::flat(513, 513);
        let grid = build_terrain_grid(&map, 400, 400);
        assert_eq!(grid.vertices.len(), 160_000);
        assert_eq!(grid.index_count(), 399 * 399 * 6);
        assert!(grid.is_valid());

        // First cell: (tr, bl, br, tl, bl, tr).
        match &grid.indices {
            Indices::U32(idx) => assert_eq!(&idx[..6], &[1, 400, 401, 0, 400, 1]),
            Indices::U16(_) => panic!("terrain indices must be 32-bit"),
        }

        let first = grid.vertices[0];
        assert_relative_eq!(first.position[0], -256.5);
        assert_relative_eq!(first.position[2], -256.5);
        let second = grid.vertices[1];
        assert_relative_eq!(second.position[0], -255.5);
        assert_relative_eq!(grid.vertices[399].uv[0], 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_degenerate_grid_is_empty() {
        let grid = build_terrain_grid(&Heightmap::flat(4, 4), 1, 4);
        assert!(grid.is_empty());
    }
}
