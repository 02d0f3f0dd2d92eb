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

//! A graphics device that hands out unique ids and records what it is asked to do.

#![allow(dead_code)]

use prism_core::math::LinearRgba;
use prism_core::renderer::*;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A call recorded on a render pass.
#[derive(Debug, Clone, PartialEq)]
pub enum PassCall {
    Begin { clear: Option<LinearRgba> },
    SetPipeline(RenderPipelineId),
    SetBindGroup(u32, BindGroupId, Vec<u32>),
    SetVertexBuffer(u32, BufferId),
    SetIndexBuffer(BufferId, IndexFormat),
    SetBlendConstant(LinearRgba),
    Draw(Range<u32>),
    DrawIndexed(Range<u32>),
}

#[derive(Debug, Default)]
pub struct DeviceLog {
    pub buffers: Vec<(BufferId, String, u64)>,
    pub writes: Vec<(BufferId, u64, usize)>,
    pub destroyed_buffers: Vec<BufferId>,
    pub destroyed_bind_groups: Vec<BindGroupId>,
    pub pipelines: Vec<(RenderPipelineId, String)>,
}

#[derive(Debug)]
pub struct RecordingDevice {
    next_id: AtomicUsize,
    line_supported: bool,
    pub log: Mutex<DeviceLog>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::with_line_support(true)
    }

    pub fn with_line_support(line_supported: bool) -> Self {
        Self {
            next_id: AtomicUsize::new(1),
            line_supported,
            log: Mutex::new(DeviceLog::default()),
        }
    }

    fn next(&self) -> usize {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    fn record_buffer(&self, descriptor: &BufferDescriptor) -> BufferId {
        let id = BufferId(self.next());
        let label = descriptor.label.as_deref().unwrap_or_default().to_owned();
        self.log.lock().unwrap().buffers.push((id, label, descriptor.size));
        id
    }

    /// Sizes of every buffer whose label starts with `prefix`, in creation order.
    pub fn buffer_sizes(&self, prefix: &str) -> Vec<u64> {
        self.log
            .lock()
            .unwrap()
            .buffers
            .iter()
            .filter(|(_, label, _)| label.starts_with(prefix))
            .map(|(_, _, size)| *size)
            .collect()
    }
}

impl GraphicsDevice for RecordingDevice {
    fn create_shader_module(&self, _d: &ShaderModuleDescriptor) -> Result<ShaderModuleId, ResourceError> {
        Ok(ShaderModuleId(self.next()))
    }

    fn create_bind_group_layout(
        &self,
        _d: &BindGroupLayoutDescriptor,
    ) -> Result<BindGroupLayoutId, ResourceError> {
        Ok(BindGroupLayoutId(self.next()))
    }

    fn create_bind_group(&self, _d: &BindGroupDescriptor) -> Result<BindGroupId, ResourceError> {
        Ok(BindGroupId(self.next()))
    }

    fn create_pipeline_layout(
        &self,
        _d: &PipelineLayoutDescriptor,
    ) -> Result<PipelineLayoutId, ResourceError> {
        Ok(PipelineLayoutId(self.next()))
    }

    fn create_render_pipeline(
        &self,
        d: &RenderPipelineDescriptor,
    ) -> Result<RenderPipelineId, ResourceError> {
        let id = RenderPipelineId(self.next());
        let label = d.label.as_deref().unwrap_or_default().to_owned();
        self.log.lock().unwrap().pipelines.push((id, label));
        Ok(id)
    }

    fn create_buffer(&self, d: &BufferDescriptor) -> Result<BufferId, ResourceError> {
        Ok(self.record_buffer(d))
    }

    fn create_buffer_with_data(&self, d: &BufferDescriptor, _data: &[u8]) -> Result<BufferId, ResourceError> {
        Ok(self.record_buffer(d))
    }

    fn write_buffer(&self, id: BufferId, offset: u64, data: &[u8]) -> Result<(), ResourceError> {
        self.log.lock().unwrap().writes.push((id, offset, data.len()));
        Ok(())
    }

    fn destroy_buffer(&self, id: BufferId) -> Result<(), ResourceError> {
        self.log.lock().unwrap().destroyed_buffers.push(id);
        Ok(())
    }

    fn destroy_bind_group(&self, id: BindGroupId) -> Result<(), ResourceError> {
        self.log.lock().unwrap().destroyed_bind_groups.push(id);
        Ok(())
    }

    fn create_texture_with_data(&self, _d: &TextureDescriptor, _data: &[u8]) -> Result<TextureId, ResourceError> {
        Ok(TextureId(self.next()))
    }

    fn create_texture(&self, _d: &TextureDescriptor) -> Result<TextureId, ResourceError> {
        Ok(TextureId(self.next()))
    }

    fn create_texture_view(&self, _texture: TextureId) -> Result<TextureViewId, ResourceError> {
        Ok(TextureViewId(self.next()))
    }

    fn destroy_texture_view(&self, _id: TextureViewId) -> Result<(), ResourceError> {
        Ok(())
    }

    fn destroy_texture(&self, _id: TextureId) -> Result<(), ResourceError> {
        Ok(())
    }

    fn create_sampler(&self, _d: &SamplerDescriptor) -> Result<SamplerId, ResourceError> {
        Ok(SamplerId(self.next()))
    }

    fn create_command_encoder(&self, _label: Option<&str>) -> Box<dyn CommandEncoder> {
        Box::new(RecordingEncoder::default())
    }

    fn submit_command_buffer(&self, _command_buffer: CommandBufferId) {}

    fn surface_format(&self) -> Option<TextureFormat> {
        Some(TextureFormat::Bgra8UnormSrgb)
    }

    fn supports_feature(&self, feature_name: &str) -> bool {
        feature_name == FEATURE_POLYGON_MODE_LINE && self.line_supported
    }

    fn min_uniform_buffer_offset_alignment(&self) -> u32 {
        256
    }
}

/// An encoder whose passes append to a shared call list.
#[derive(Debug, Default, Clone)]
pub struct RecordingEncoder {
    pub calls: Arc<Mutex<Vec<PassCall>>>,
}

impl RecordingEncoder {
    pub fn calls(&self) -> Vec<PassCall> {
        self.calls.lock().unwrap().clone()
    }
}

struct RecordingPass {
    calls: Arc<Mutex<Vec<PassCall>>>,
}

impl RecordingPass {
    fn push(&self, call: PassCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl RenderPass for RecordingPass {
    fn set_pipeline(&mut self, pipeline: &RenderPipelineId) {
        self.push(PassCall::SetPipeline(*pipeline));
    }

    fn set_bind_group(&mut self, index: u32, bind_group: &BindGroupId, offsets: &[u32]) {
        self.push(PassCall::SetBindGroup(index, *bind_group, offsets.to_vec()));
    }

    fn set_vertex_buffer(&mut self, slot: u32, buffer: &BufferId, _offset: u64) {
        self.push(PassCall::SetVertexBuffer(slot, *buffer));
    }

    fn set_index_buffer(&mut self, buffer: &BufferId, _offset: u64, index_format: IndexFormat) {
        self.push(PassCall::SetIndexBuffer(*buffer, index_format));
    }

    fn set_blend_constant(&mut self, color: LinearRgba) {
        self.push(PassCall::SetBlendConstant(color));
    }

    fn draw(&mut self, vertices: Range<u32>, _instances: Range<u32>) {
        self.push(PassCall::Draw(vertices));
    }

    fn draw_indexed(&mut self, indices: Range<u32>, _base_vertex: i32, _instances: Range<u32>) {
        self.push(PassCall::DrawIndexed(indices));
    }
}

impl CommandEncoder for RecordingEncoder {
    fn begin_render_pass<'encoder>(
        &'encoder mut self,
        descriptor: &RenderPassDescriptor<'_>,
    ) -> Box<dyn RenderPass + 'encoder> {
        let clear = descriptor.color_attachments.first().and_then(|a| match a.ops.load {
            LoadOp::Clear(color) => Some(color),
            LoadOp::Load => None,
        });
        let pass = RecordingPass {
            calls: self.calls.clone(),
        };
        pass.push(PassCall::Begin { clear });
        Box::new(pass)
    }

    fn finish(self: Box<Self>) -> CommandBufferId {
        CommandBufferId(0)
    }
}
