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

use crate::renderer::api::*;
use crate::renderer::error::ResourceError;
use crate::renderer::traits::CommandEncoder;
use std::fmt::Debug;

/// The feature name queried before building wireframe pipelines.
pub const FEATURE_POLYGON_MODE_LINE: &str = "polygon_mode_line";

/// A logical graphics device able to create resources and record commands.
///
/// Implementations must be usable from several threads at once: the startup
/// loader creates shaders, pipelines, buffers and textures in parallel.
pub trait GraphicsDevice: Send + Sync + Debug + 'static {
    /// Compiles a WGSL shader module.
    ///
    /// ## Errors
    /// * `ResourceError::Shader` with the compiler diagnostics if compilation fails.
    fn create_shader_module(
        &self,
        descriptor: &ShaderModuleDescriptor,
    ) -> Result<ShaderModuleId, ResourceError>;

    /// Creates a bind group layout.
    fn create_bind_group_layout(
        &self,
        descriptor: &BindGroupLayoutDescriptor,
    ) -> Result<BindGroupLayoutId, ResourceError>;

    /// Creates a bind group conforming to an existing layout.
    fn create_bind_group(
        &self,
        descriptor: &BindGroupDescriptor,
    ) -> Result<BindGroupId, ResourceError>;

    /// Creates a pipeline layout from bind group layouts.
    fn create_pipeline_layout(
        &self,
        descriptor: &PipelineLayoutDescriptor,
    ) -> Result<PipelineLayoutId, ResourceError>;

    /// Bakes a render pipeline.
    ///
    /// ## Errors
    /// * `ResourceError::Pipeline` if the backend rejects the state combination.
    fn create_render_pipeline(
        &self,
        descriptor: &RenderPipelineDescriptor,
    ) -> Result<RenderPipelineId, ResourceError>;

    /// Creates an uninitialized GPU buffer.
    fn create_buffer(&self, descriptor: &BufferDescriptor) -> Result<BufferId, ResourceError>;

    /// Creates a GPU buffer initialized with `data`.
    fn create_buffer_with_data(
        &self,
        descriptor: &BufferDescriptor,
        data: &[u8],
    ) -> Result<BufferId, ResourceError>;

    /// Schedules a write of `data` into a buffer at `offset`.
    ///
    /// Writes become visible to the next submitted command buffer.
    fn write_buffer(&self, id: BufferId, offset: u64, data: &[u8]) -> Result<(), ResourceError>;

    /// Releases a buffer. Bind groups already referencing it stay valid.
    fn destroy_buffer(&self, id: BufferId) -> Result<(), ResourceError>;

    /// Releases a bind group.
    fn destroy_bind_group(&self, id: BindGroupId) -> Result<(), ResourceError>;

    /// Creates a 2D texture and uploads tightly packed texel rows.
    fn create_texture_with_data(
        &self,
        descriptor: &TextureDescriptor,
        data: &[u8],
    ) -> Result<TextureId, ResourceError>;

    /// Creates an empty 2D texture (used for depth attachments).
    fn create_texture(&self, descriptor: &TextureDescriptor) -> Result<TextureId, ResourceError>;

    /// Creates the default view of a texture.
    fn create_texture_view(&self, texture: TextureId) -> Result<TextureViewId, ResourceError>;

    /// Releases a texture view.
    fn destroy_texture_view(&self, id: TextureViewId) -> Result<(), ResourceError>;

    /// Releases a texture.
    fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError>;

    /// Creates a sampler.
    fn create_sampler(&self, descriptor: &SamplerDescriptor) -> Result<SamplerId, ResourceError>;

    /// Creates a new command encoder.
    fn create_command_encoder(&self, label: Option<&str>) -> Box<dyn CommandEncoder>;

    /// Submits a finished command buffer to the queue.
    fn submit_command_buffer(&self, command_buffer: CommandBufferId);

    /// Returns the format of the presentation surface, if there is one.
    fn surface_format(&self) -> Option<TextureFormat>;

    /// Returns `true` if an optional feature (e.g. [`FEATURE_POLYGON_MODE_LINE`]) is enabled.
    fn supports_feature(&self, feature_name: &str) -> bool;

    /// Returns the required alignment of dynamic uniform offsets, in bytes.
    fn min_uniform_buffer_offset_alignment(&self) -> u32;
}
