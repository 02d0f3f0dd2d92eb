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

//! Texture decoding.

use super::{AssetError, AssetLoaderLane};
use prism_data::CpuTexture;

/// A lane decoding PNG, JPEG, DDS and the other formats `image` understands
/// into RGBA8 pixels.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextureLoaderLane;

impl AssetLoaderLane<CpuTexture> for TextureLoaderLane {
    fn load(&self, bytes: &[u8]) -> Result<CpuTexture, AssetError> {
        let img = image::load_from_memory(bytes)?;

        // Keep the sRGB encoding; the GPU texture is created as sRGB.
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::Invalid("image has no pixels".to_owned()));
        }

        Ok(CpuTexture {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    #[test]
    fn test_decodes_png_to_rgba8() {
        let mut img = RgbaImage::new(2, 3);
        img.put_pixel(1, 2, Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();

        let texture = TextureLoaderLane.load(&bytes).unwrap();
        assert_eq!((texture.width, texture.height), (2, 3));
        assert!(texture.is_valid());
        assert_eq!(&texture.pixels[(2 * 2 + 1) * 4..], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_rejects_garbage() {
        let err = TextureLoaderLane.load(b"not an image").unwrap_err();
        assert!(matches!(err, AssetError::Image(_)));
    }
}
