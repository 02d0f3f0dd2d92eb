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

use crate::math::LinearRgba;
use crate::renderer::api::{
    BindGroupId, BufferId, CommandBufferId, IndexFormat, RenderPassDescriptor, RenderPipelineId,
};
use std::ops::Range;

/// A trait representing an active render pass, used for recording drawing commands.
///
/// A `RenderPass` is obtained from a [`CommandEncoder`] and provides methods to
/// set pipeline state and issue draw calls. Dropping the pass ends it.
///
/// IDs that do not resolve to a live resource are ignored by the backend (and
/// logged), so callers must check resource presence before recording a draw.
pub trait RenderPass {
    /// Sets the active render pipeline for subsequent draw calls.
    fn set_pipeline(&mut self, pipeline: &RenderPipelineId);

    /// Binds a bind group to `@group(index)`, with one dynamic offset per
    /// dynamic binding of its layout.
    fn set_bind_group(&mut self, index: u32, bind_group: &BindGroupId, offsets: &[u32]);

    /// Binds a vertex buffer to a specific slot.
    fn set_vertex_buffer(&mut self, slot: u32, buffer: &BufferId, offset: u64);

    /// Binds an index buffer for indexed drawing.
    fn set_index_buffer(&mut self, buffer: &BufferId, offset: u64, index_format: IndexFormat);

    /// Sets the constant used by [`BlendFactor::Constant`](crate::renderer::BlendFactor).
    fn set_blend_constant(&mut self, color: LinearRgba);

    /// Records a non-indexed draw call.
    fn draw(&mut self, vertices: Range<u32>, instances: Range<u32>);

    /// Records an indexed draw call.
    fn draw_indexed(&mut self, indices: Range<u32>, base_vertex: i32, instances: Range<u32>);
}

/// A trait for an object that records a sequence of GPU commands.
pub trait CommandEncoder {
    /// Begins a new render pass.
    ///
    /// The returned pass borrows the encoder mutably, so only one pass can be
    /// active at a time.
    fn begin_render_pass<'encoder>(
        &'encoder mut self,
        descriptor: &RenderPassDescriptor<'_>,
    ) -> Box<dyn RenderPass + 'encoder>;

    /// Finalizes the command recording and returns a handle to the resulting
    /// command buffer, ready for [`GraphicsDevice::submit_command_buffer`](crate::renderer::GraphicsDevice::submit_command_buffer).
    fn finish(self: Box<Self>) -> CommandBufferId;
}
