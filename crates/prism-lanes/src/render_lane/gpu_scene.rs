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

//! GPU-resident meshes and textures referenced by the frame sequencer.

use super::pipelines::PipelineSet;
use bytemuck::Pod;
use prism_core::renderer::{
    BindGroupDescriptor, BindGroupEntry, BindGroupId, BindingResource, BufferDescriptor, BufferId,
    BufferUsage, GraphicsDevice, IndexFormat, ResourceError, TextureDescriptor, TextureFormat,
    TextureId, TextureUsage, TextureViewId,
};
use prism_data::geometry::MeshData;
use prism_data::texture::CpuTexture;
use std::sync::Arc;

/// A mesh uploaded to vertex and index buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuMesh {
    /// Vertex buffer.
    pub vertex_buffer: BufferId,
    /// Index buffer.
    pub index_buffer: BufferId,
    /// Width of the indices.
    pub index_format: IndexFormat,
    /// Number of indices to draw.
    pub index_count: u32,
}

impl GpuMesh {
    /// Uploads `mesh`.
    ///
    /// ## Errors
    /// Fails on an empty or inconsistent mesh, or if a buffer cannot be created.
    pub fn upload<V: Pod>(
        device: &dyn GraphicsDevice,
        label: &str,
        mesh: &MeshData<V>,
    ) -> Result<Self, ResourceError> {
        if mesh.is_empty() || !mesh.is_valid() {
            return Err(ResourceError::BackendError(format!(
                "mesh '{label}' is empty or references missing vertices"
            )));
        }
        let vertex_buffer = device.create_buffer_with_data(
            &BufferDescriptor {
                label: Some(format!("{label} Vertices").into()),
                size: mesh.vertex_bytes().len() as u64,
                usage: BufferUsage::VERTEX | BufferUsage::COPY_DST,
            },
            mesh.vertex_bytes(),
        )?;
        let index_bytes = mesh.indices.as_bytes();
        let index_buffer = device.create_buffer_with_data(
            &BufferDescriptor {
                label: Some(format!("{label} Indices").into()),
                size: index_bytes.len() as u64,
                usage: BufferUsage::INDEX | BufferUsage::COPY_DST,
            },
            index_bytes,
        )?;
        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_format: mesh.indices.format(),
            index_count: mesh.index_count(),
        })
    }
}

/// A sampled texture with its `@group(1)` bind group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpuTexture {
    /// The texture.
    pub texture: TextureId,
    /// Its default view.
    pub view: TextureViewId,
    /// View and shared sampler, bound at `@group(1)`.
    pub bind_group: BindGroupId,
}

impl GpuTexture {
    /// Uploads an RGBA8 image as an sRGB texture.
    pub fn upload(
        device: &dyn GraphicsDevice,
        pipelines: &PipelineSet,
        label: &str,
        image: &CpuTexture,
    ) -> Result<Self, ResourceError> {
        if !image.is_valid() {
            return Err(ResourceError::BackendError(format!(
                "texture '{label}' has {} bytes for {}x{} texels",
                image.pixels.len(),
                image.width,
                image.height
            )));
        }
        let texture = device.create_texture_with_data(
            &TextureDescriptor {
                label: Some(label.to_owned().into()),
                width: image.width,
                height: image.height,
                format: TextureFormat::Rgba8UnormSrgb,
                usage: TextureUsage::TEXTURE_BINDING | TextureUsage::COPY_DST,
            },
            &image.pixels,
        )?;
        let view = device.create_texture_view(texture)?;
        let bind_group = device.create_bind_group(&BindGroupDescriptor {
            label: Some(label),
            layout: pipelines.texture_layout(),
            entries: &[
                BindGroupEntry {
                    binding: 0,
                    resource: BindingResource::TextureView(view),
                },
                BindGroupEntry {
                    binding: 1,
                    resource: BindingResource::Sampler(pipelines.sampler()),
                },
            ],
        })?;
        Ok(Self {
            texture,
            view,
            bind_group,
        })
    }
}

/// How a scene entity is textured on the GPU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityTexture {
    /// Declared untextured; drawn with the white fallback.
    Untextured,
    /// A loaded texture.
    Bound(Arc<GpuTexture>),
    /// Declared textured but the texture failed to load; the entity is skipped.
    Missing,
}

/// The GPU resources of one scene-graph entity.
#[derive(Debug, Clone)]
pub struct GpuEntity {
    /// Entity name, used in diagnostics.
    pub name: String,
    /// The mesh, absent if it failed to load.
    pub mesh: Option<Arc<GpuMesh>>,
    /// The texture binding.
    pub texture: EntityTexture,
    /// Drawn with the transparent blend state.
    pub transparent: bool,
}

/// Every GPU resource a frame may reference.
///
/// Optional members are skipped at draw time when absent.
#[derive(Debug, Clone)]
pub struct GpuScene {
    /// Hard-coded cube, drawn three times.
    pub cube: Option<GpuMesh>,
    /// Hard-coded pyramid.
    pub pyramid: Option<GpuMesh>,
    /// Terrain grid.
    pub terrain: Option<GpuMesh>,
    /// Inward-facing skybox cube.
    pub skybox: Option<GpuMesh>,
    /// Mesh spinning behind the main menu.
    pub menu_object: Option<GpuMesh>,
    /// 1x1 white texture bound for untextured draws.
    pub white: GpuTexture,
    /// Texture of the cubes and pyramid.
    pub crate_texture: Option<GpuTexture>,
    /// Texture of the skybox.
    pub skybox_texture: Option<GpuTexture>,
    /// Scene-graph entities in document order.
    pub entities: Vec<GpuEntity>,
}

impl GpuScene {
    /// A scene holding only the white fallback texture.
    pub fn empty(white: GpuTexture) -> Self {
        Self {
            cube: None,
            pyramid: None,
            terrain: None,
            skybox: None,
            menu_object: None,
            white,
            crate_texture: None,
            skybox_texture: None,
            entities: Vec::new(),
        }
    }
}
