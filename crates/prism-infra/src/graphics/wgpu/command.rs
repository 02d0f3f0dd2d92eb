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

use std::ops::Range;

use prism_core::math::LinearRgba;
use prism_core::renderer::traits::{CommandEncoder, RenderPass};
use prism_core::renderer::{
    BindGroupId, BufferId, CommandBufferId, IndexFormat, RenderPassDescriptor, RenderPipelineId,
};

use super::conversions::IntoWgpu;
use super::device::WgpuDevice;

pub struct WgpuRenderPass<'a> {
    pub(crate) pass: wgpu::RenderPass<'a>,
    pub(crate) device: &'a WgpuDevice,
}

impl RenderPass for WgpuRenderPass<'_> {
    fn set_pipeline(&mut self, pipeline_id: &RenderPipelineId) {
        if let Some(pipeline) = self.device.get_wgpu_render_pipeline(*pipeline_id) {
            self.pass.set_pipeline(&pipeline);
        } else {
            log::warn!("WgpuRenderPass: RenderPipelineId {pipeline_id:?} not found.");
        }
    }

    fn set_bind_group(&mut self, index: u32, bind_group_id: &BindGroupId, offsets: &[u32]) {
        if let Some(bind_group) = self.device.get_wgpu_bind_group(*bind_group_id) {
            self.pass.set_bind_group(index, bind_group.as_ref(), offsets);
        } else {
            log::warn!("WgpuRenderPass: BindGroupId {bind_group_id:?} not found.");
        }
    }

    fn set_vertex_buffer(&mut self, slot: u32, buffer_id: &BufferId, offset: u64) {
        if let Some(buffer) = self.device.get_wgpu_buffer(*buffer_id) {
            self.pass.set_vertex_buffer(slot, buffer.slice(offset..));
        } else {
            log::warn!("WgpuRenderPass: Vertex BufferId {buffer_id:?} not found.");
        }
    }

    fn set_index_buffer(&mut self, buffer_id: &BufferId, offset: u64, index_format: IndexFormat) {
        if let Some(buffer) = self.device.get_wgpu_buffer(*buffer_id) {
            self.pass
                .set_index_buffer(buffer.slice(offset..), index_format.into_wgpu());
        } else {
            log::warn!("WgpuRenderPass: Index BufferId {buffer_id:?} not found.");
        }
    }

    fn set_blend_constant(&mut self, color: LinearRgba) {
        self.pass.set_blend_constant(color.into_wgpu());
    }

    fn draw(&mut self, vertices: Range<u32>, instances: Range<u32>) {
        self.pass.draw(vertices, instances);
    }

    fn draw_indexed(&mut self, indices: Range<u32>, base_vertex: i32, instances: Range<u32>) {
        self.pass.draw_indexed(indices, base_vertex, instances);
    }
}

pub struct WgpuCommandEncoder {
    pub(crate) encoder: wgpu::CommandEncoder,
    pub(crate) device: WgpuDevice,
}

impl CommandEncoder for WgpuCommandEncoder {
    fn begin_render_pass<'encoder>(
        &'encoder mut self,
        descriptor: &RenderPassDescriptor<'_>,
    ) -> Box<dyn RenderPass + 'encoder> {
        // Resolve every view first so the attachments can borrow them.
        let colors: Vec<(wgpu::TextureView, wgpu::Operations<wgpu::Color>)> = descriptor
            .color_attachments
            .iter()
            .filter_map(|att| match self.device.get_wgpu_texture_view(*att.view) {
                Some(view) => Some(((*view).clone(), att.ops.into_wgpu())),
                None => {
                    log::warn!("WgpuCommandEncoder: color view {:?} not found.", att.view);
                    None
                }
            })
            .collect();

        let color_attachments: Vec<Option<wgpu::RenderPassColorAttachment>> = colors
            .iter()
            .map(|(view, ops)| {
                Some(wgpu::RenderPassColorAttachment {
                    view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: *ops,
                })
            })
            .collect();

        let depth: Option<(wgpu::TextureView, wgpu::Operations<f32>)> =
            descriptor.depth_stencil_attachment.and_then(|ds| {
                self.device
                    .get_wgpu_texture_view(*ds.view)
                    .map(|view| ((*view).clone(), ds.depth_ops.into_wgpu()))
            });
        let depth_stencil_attachment =
            depth
                .as_ref()
                .map(|(view, ops)| wgpu::RenderPassDepthStencilAttachment {
                    view,
                    depth_ops: Some(*ops),
                    stencil_ops: None,
                });

        let pass = self
            .encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: descriptor.label,
                color_attachments: &color_attachments,
                depth_stencil_attachment,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

        Box::new(WgpuRenderPass {
            pass,
            device: &self.device,
        })
    }

    fn finish(self: Box<Self>) -> CommandBufferId {
        let WgpuCommandEncoder { encoder, device } = *self;
        device.register_command_buffer(encoder.finish())
    }
}
