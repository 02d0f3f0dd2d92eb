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

//! The per-draw uniform payload and the ring buffer it is streamed through.

use prism_core::math::{LinearRgba, Mat4, Vec3};
use prism_core::renderer::{
    BindGroupDescriptor, BindGroupEntry, BindGroupId, BindGroupLayoutId, BindingResource,
    BufferBinding, BufferDescriptor, BufferId, BufferUsage, GraphicsDevice, ResourceError,
};
use prism_data::config::LightDocument;
use std::num::NonZeroU64;

/// Size of [`FramePayload`] in bytes, equal to its WGSL struct size.
pub const PAYLOAD_SIZE: u64 = std::mem::size_of::<FramePayload>() as u64;

/// Slots added each time the ring runs out of room.
pub const RING_GROWTH_SLOTS: u64 = 64;

/// The uniform record written once per draw.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FramePayload {
    /// Projection of the active camera.
    pub projection: Mat4,
    /// View of the active camera.
    pub view: Mat4,
    /// World matrix of the object being drawn.
    pub world: Mat4,
    /// Diffuse light colour.
    pub diffuse_light: LinearRgba,
    /// Diffuse material colour.
    pub diffuse_material: LinearRgba,
    /// Ambient light colour.
    pub ambient_light: LinearRgba,
    /// Ambient material colour.
    pub ambient_material: LinearRgba,
    /// Direction towards the light.
    pub light_direction: [f32; 3],
    /// Elapsed animation angle, drives the wave filters.
    pub elapsed: f32,
    /// Specular light colour.
    pub specular_light: LinearRgba,
    /// Specular material colour.
    pub specular_material: LinearRgba,
    /// Eye position used for highlights.
    pub eye_position: [f32; 3],
    /// Specular exponent.
    pub specular_power: f32,
    /// 1 when the bound texture should be sampled.
    pub has_texture: u32,
    /// 1 to enable the vertical wave filter.
    pub wave_filter: u32,
    /// 1 to enable lighting.
    pub light_on: u32,
    /// 1 to enable the horizontal wave filter.
    pub wave_filter_x: u32,
    /// 1 to enable the pixelation filter.
    pub pixelate_filter: u32,
    /// 1 to enable gooch shading.
    pub gooch_shading: u32,
    /// Pixelation cells per texture unit.
    pub pixelation_amount: f32,
    _padding: u32,
}

/// The constant light terms, taken from the light document once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightingTerms {
    /// Direction towards the light.
    pub direction: Vec3,
    /// Diffuse light and material.
    pub diffuse: (LinearRgba, LinearRgba),
    /// Ambient light and material.
    pub ambient: (LinearRgba, LinearRgba),
    /// Specular light and material.
    pub specular: (LinearRgba, LinearRgba),
    /// Specular exponent.
    pub specular_power: f32,
}

impl From<&LightDocument> for LightingTerms {
    fn from(doc: &LightDocument) -> Self {
        Self {
            direction: doc.light_direction.into(),
            diffuse: (doc.diffuse.light.into(), doc.diffuse.material.into()),
            ambient: (doc.ambient.light.into(), doc.ambient.material.into()),
            specular: (doc.specular.light.into(), doc.specular.material.into()),
            specular_power: doc.specular.power,
        }
    }
}

impl Default for LightingTerms {
    fn default() -> Self {
        Self::from(&LightDocument::default())
    }
}

/// The shader switches of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShadingFlags {
    /// Sample textures.
    pub texture_on: bool,
    /// Apply lighting.
    pub light_on: bool,
    /// Vertical wave filter.
    pub wave_y: bool,
    /// Horizontal wave filter.
    pub wave_x: bool,
    /// Pixelation filter.
    pub pixelate: bool,
    /// Gooch shading.
    pub gooch: bool,
}

impl FramePayload {
    /// Builds the frame-constant part of the payload; `world` starts as identity.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        projection: Mat4,
        view: Mat4,
        eye_position: Vec3,
        elapsed: f32,
        lighting: &LightingTerms,
        flags: ShadingFlags,
        pixelation_amount: f32,
    ) -> Self {
        Self {
            projection,
            view,
            world: Mat4::IDENTITY,
            diffuse_light: lighting.diffuse.0,
            diffuse_material: lighting.diffuse.1,
            ambient_light: lighting.ambient.0,
            ambient_material: lighting.ambient.1,
            light_direction: lighting.direction.into(),
            elapsed,
            specular_light: lighting.specular.0,
            specular_material: lighting.specular.1,
            eye_position: eye_position.into(),
            specular_power: lighting.specular_power,
            has_texture: u32::from(flags.texture_on),
            wave_filter: u32::from(flags.wave_y),
            light_on: u32::from(flags.light_on),
            wave_filter_x: u32::from(flags.wave_x),
            pixelate_filter: u32::from(flags.pixelate),
            gooch_shading: u32::from(flags.gooch),
            pixelation_amount,
            _padding: 0,
        }
    }

    /// A copy for one draw.
    ///
    /// `textured` is `false` for draws bound to the fallback white texture,
    /// which always clears `has_texture`.
    pub fn for_draw(&self, world: Mat4, textured: bool) -> Self {
        Self {
            world,
            has_texture: if textured { self.has_texture } else { 0 },
            ..*self
        }
    }
}

/// A dynamic-offset uniform buffer holding every payload of one frame.
///
/// Slots are `stride` bytes apart, where the stride is the payload size
/// rounded up to the device's offset alignment. The whole frame is uploaded
/// with a single write before the render pass is recorded.
#[derive(Debug)]
pub struct PayloadRing {
    layout: BindGroupLayoutId,
    buffer: BufferId,
    bind_group: BindGroupId,
    stride: u64,
    capacity: u64,
    staging: Vec<u8>,
}

impl PayloadRing {
    /// Creates a ring with room for `RING_GROWTH_SLOTS` payloads.
    pub fn new(device: &dyn GraphicsDevice, layout: BindGroupLayoutId) -> Result<Self, ResourceError> {
        let alignment = u64::from(device.min_uniform_buffer_offset_alignment().max(1));
        let stride = PAYLOAD_SIZE.div_ceil(alignment) * alignment;
        let (buffer, bind_group) = Self::allocate(device, layout, stride, RING_GROWTH_SLOTS)?;
        Ok(Self {
            layout,
            buffer,
            bind_group,
            stride,
            capacity: RING_GROWTH_SLOTS,
            staging: Vec::new(),
        })
    }

    fn allocate(
        device: &dyn GraphicsDevice,
        layout: BindGroupLayoutId,
        stride: u64,
        slots: u64,
    ) -> Result<(BufferId, BindGroupId), ResourceError> {
        let buffer = device.create_buffer(&BufferDescriptor {
            label: Some("Payload Ring".into()),
            size: stride * slots,
            usage: BufferUsage::UNIFORM | BufferUsage::COPY_DST,
        })?;
        let bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some("Payload Ring Bind Group"),
            layout,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: BindingResource::Buffer(BufferBinding {
                    buffer,
                    offset: 0,
                    size: NonZeroU64::new(PAYLOAD_SIZE),
                }),
            }],
        })?;
        log::debug!("Payload ring allocated with {slots} slots of {stride} bytes");
        Ok((buffer, bind_group))
    }

    /// Distance between two slots in bytes.
    pub fn stride(&self) -> u64 {
        self.stride
    }

    /// Number of payloads the current buffer can hold.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// The bind group to set at `@group(0)` with a slot offset.
    pub fn bind_group(&self) -> BindGroupId {
        self.bind_group
    }

    /// Dynamic offset of slot `index`.
    pub fn offset_of(&self, index: usize) -> u32 {
        (index as u64 * self.stride) as u32
    }

    /// Uploads the payloads of a frame, growing the buffer first if needed.
    pub fn upload(&mut self, device: &dyn GraphicsDevice, payloads: &[FramePayload]) -> Result<(), ResourceError> {
        if payloads.is_empty() {
            return Ok(());
        }
        let needed = payloads.len() as u64;
        if needed > self.capacity {
            let slots = needed.div_ceil(RING_GROWTH_SLOTS) * RING_GROWTH_SLOTS;
            let (buffer, bind_group) = Self::allocate(device, self.layout, self.stride, slots)?;
            device.destroy_bind_group(self.bind_group)?;
            device.destroy_buffer(self.buffer)?;
            self.buffer = buffer;
            self.bind_group = bind_group;
            self.capacity = slots;
        }

        let stride = self.stride as usize;
        self.staging.clear();
        self.staging.resize(stride * payloads.len(), 0);
        for (slot, payload) in self.staging.chunks_exact_mut(stride).zip(payloads) {
            slot[..PAYLOAD_SIZE as usize].copy_from_slice(bytemuck::bytes_of(payload));
        }
        device.write_buffer(self.buffer, 0, &self.staging)
    }
}
