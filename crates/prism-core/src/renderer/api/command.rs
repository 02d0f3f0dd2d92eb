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

//! Defines render pass descriptors and command buffer handles.

use super::texture::TextureViewId;
use crate::math::LinearRgba;

/// An opaque handle to a finished, not yet submitted, command buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandBufferId(pub u64);

/// What happens to an attachment at the start of a pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoadOp<V> {
    /// Clear the attachment to a value.
    Clear(V),
    /// Keep the previous contents.
    Load,
}

/// What happens to an attachment at the end of a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreOp {
    /// Keep the rendered results.
    #[default]
    Store,
    /// Discard the results.
    Discard,
}

/// The load and store operations of one attachment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Operations<V> {
    /// The load operation.
    pub load: LoadOp<V>,
    /// The store operation.
    pub store: StoreOp,
}

/// A color attachment of a render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderPassColorAttachment<'a> {
    /// The view rendered into.
    pub view: &'a TextureViewId,
    /// Load and store operations.
    pub ops: Operations<LinearRgba>,
}

/// The depth attachment of a render pass.
#[derive(Debug, Clone, Copy)]
pub struct RenderPassDepthStencilAttachment<'a> {
    /// The depth view.
    pub view: &'a TextureViewId,
    /// Depth load and store operations.
    pub depth_ops: Operations<f32>,
}

/// Describes a render pass to begin on a [`CommandEncoder`](crate::renderer::CommandEncoder).
#[derive(Debug, Clone, Copy)]
pub struct RenderPassDescriptor<'a> {
    /// Optional debug label.
    pub label: Option<&'a str>,
    /// The color attachments.
    pub color_attachments: &'a [RenderPassColorAttachment<'a>],
    /// The depth attachment, if any.
    pub depth_stencil_attachment: Option<RenderPassDepthStencilAttachment<'a>>,
}
