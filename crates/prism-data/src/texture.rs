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

//! Decoded texture data ready to upload.

/// An RGBA8 (sRGB) image in CPU memory, rows tightly packed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuTexture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl CpuTexture {
    /// Bytes per pixel of the stored format.
    pub const BYTES_PER_PIXEL: usize = 4;

    /// A 1x1 texture of a single colour.
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: rgba.to_vec(),
        }
    }

    /// The opaque white texture bound to untextured draws.
    pub fn white() -> Self {
        Self::solid([255, 255, 255, 255])
    }

    /// Returns `true` if the pixel buffer matches the dimensions.
    pub fn is_valid(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self.pixels.len() == self.width as usize * self.height as usize * Self::BYTES_PER_PIXEL
    }
}
