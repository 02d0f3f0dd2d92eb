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

//! Defines textures, texture views and samplers.

use std::borrow::Cow;

/// An opaque handle to a GPU texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// An opaque handle to a view onto a texture (or onto the current surface image).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureViewId(pub usize);

/// An opaque handle to a sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerId(pub usize);

/// The texel formats the framework creates or renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureFormat {
    /// 8-bit RGBA, normalized, sRGB-encoded.
    Rgba8UnormSrgb,
    /// 8-bit RGBA, normalized, linear.
    Rgba8Unorm,
    /// 8-bit BGRA, normalized, sRGB-encoded. Common surface format.
    Bgra8UnormSrgb,
    /// 8-bit BGRA, normalized, linear. Common surface format.
    Bgra8Unorm,
    /// 32-bit float depth.
    Depth32Float,
}

impl TextureFormat {
    /// Returns the size of one texel in bytes.
    pub const fn bytes_per_pixel(self) -> u32 {
        4
    }

    /// Returns `true` for depth formats.
    pub const fn is_depth(self) -> bool {
        matches!(self, TextureFormat::Depth32Float)
    }
}

prism_flags! {
    /// A set of flags describing how a texture will be used.
    pub struct TextureUsage: u32 {
        /// The texture can be the destination of a copy or queue write.
        const COPY_DST = 1 << 0;
        /// The texture can be sampled in a shader.
        const TEXTURE_BINDING = 1 << 1;
        /// The texture can be a color or depth attachment.
        const RENDER_ATTACHMENT = 1 << 2;
    }
}

/// A descriptor used to create a two-dimensional [`TextureId`].
#[derive(Debug, Clone)]
pub struct TextureDescriptor<'a> {
    /// An optional debug label.
    pub label: Option<Cow<'a, str>>,
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
    /// The texel format.
    pub format: TextureFormat,
    /// How the texture will be used.
    pub usage: TextureUsage,
}

/// How texture coordinates outside `[0, 1]` are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AddressMode {
    /// Coordinates are clamped to the edge texels.
    ClampToEdge,
    /// Coordinates wrap around.
    #[default]
    Repeat,
    /// Coordinates wrap around with every other repetition mirrored.
    MirrorRepeat,
}

/// The filter used when sampling between texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterMode {
    /// Nearest texel.
    Nearest,
    /// Linear interpolation between texels.
    #[default]
    Linear,
}

/// A descriptor used to create a [`SamplerId`].
#[derive(Debug, Clone, Default)]
pub struct SamplerDescriptor<'a> {
    /// An optional debug label.
    pub label: Option<Cow<'a, str>>,
    /// Addressing mode for all three coordinates.
    pub address_mode: AddressMode,
    /// Magnification filter.
    pub mag_filter: FilterMode,
    /// Minification filter.
    pub min_filter: FilterMode,
}
