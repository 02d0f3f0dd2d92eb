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

//! Defines bind groups and bind group layouts.
//!
//! Bind groups attach buffers, texture views and samplers to the `@group`
//! slots declared by a shader.

use super::buffer::BufferId;
use super::shader::ShaderStageFlags;
use super::texture::{SamplerId, TextureViewId};
use std::num::NonZeroU64;

/// An opaque handle to a bind group layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindGroupLayoutId(pub usize);

/// An opaque handle to a bind group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BindGroupId(pub usize);

/// The type of resource bound at a binding point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingType {
    /// A uniform buffer.
    UniformBuffer {
        /// Whether the binding takes a dynamic offset at `set_bind_group` time.
        has_dynamic_offset: bool,
        /// The minimum size the bound range must have.
        min_binding_size: Option<NonZeroU64>,
    },
    /// A filterable, float-sampled 2D texture.
    Texture2d,
    /// A filtering sampler.
    Sampler,
}

/// A single binding slot in a bind group layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindGroupLayoutEntry {
    /// The `@binding` index.
    pub binding: u32,
    /// Which shader stages can see the binding.
    pub visibility: ShaderStageFlags,
    /// The type of resource bound here.
    pub ty: BindingType,
}

/// Describes a bind group layout to be created.
#[derive(Debug, Clone)]
pub struct BindGroupLayoutDescriptor<'a> {
    /// Optional debug label.
    pub label: Option<&'a str>,
    /// The entries of the layout.
    pub entries: &'a [BindGroupLayoutEntry],
}

/// A buffer range bound to a uniform slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferBinding {
    /// The buffer to bind.
    pub buffer: BufferId,
    /// Offset into the buffer in bytes.
    pub offset: u64,
    /// Size of the binding, or `None` to bind to the end of the buffer.
    pub size: Option<NonZeroU64>,
}

/// The resource attached to one binding slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingResource {
    /// A buffer range.
    Buffer(BufferBinding),
    /// A texture view.
    TextureView(TextureViewId),
    /// A sampler.
    Sampler(SamplerId),
}

/// A single entry of a bind group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindGroupEntry {
    /// The `@binding` index.
    pub binding: u32,
    /// The resource to bind.
    pub resource: BindingResource,
}

/// Describes a bind group to be created.
#[derive(Debug, Clone)]
pub struct BindGroupDescriptor<'a> {
    /// Optional debug label.
    pub label: Option<&'a str>,
    /// The layout this bind group conforms to.
    pub layout: BindGroupLayoutId,
    /// The resources, one per layout entry.
    pub entries: &'a [BindGroupEntry],
}
