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

//! Raw 8-bit heightmap decoding.

use super::{AssetError, AssetLoaderLane};
use prism_data::geometry::Heightmap;

/// Decodes headerless row-major 8-bit height samples of a known size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightmapLoaderLane {
    /// Samples along X.
    pub width: u32,
    /// Samples along Z.
    pub depth: u32,
    /// Height of a `255` sample.
    pub height_scale: f32,
}

impl HeightmapLoaderLane {
    /// A square heightmap loader.
    pub fn square(size: u32, height_scale: f32) -> Self {
        Self {
            width: size,
            depth: size,
            height_scale,
        }
    }
}

impl AssetLoaderLane<Heightmap> for HeightmapLoaderLane {
    fn load(&self, bytes: &[u8]) -> Result<Heightmap, AssetError> {
        if bytes.is_empty() {
            return Err(AssetError::Invalid("heightmap file is empty".to_owned()));
        }
        Ok(Heightmap::from_raw_bytes(
            bytes,
            self.width,
            self.depth,
            self.height_scale,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scales_samples() {
        let lane = HeightmapLoaderLane::square(2, 10.0);
        let map = lane.load(&[0, 255, 51, 102]).unwrap();
        assert_relative_eq!(map.height_at(1, 0), 10.0);
        assert_relative_eq!(map.height_at(0, 1), 2.0);
    }

    #[test]
    fn test_empty_file_is_an_error() {
        let lane = HeightmapLoaderLane::square(4, 1.0);
        assert!(lane.load(&[]).is_err());
    }

    #[test]
    fn test_load_file_reports_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = HeightmapLoaderLane::square(4, 1.0)
            .load_file(&dir.path().join("missing.raw"))
            .unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
    }
}
