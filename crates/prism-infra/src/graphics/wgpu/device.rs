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

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use prism_core::renderer::traits::CommandEncoder;
use prism_core::renderer::{
    BindGroupDescriptor, BindGroupId, BindGroupLayoutDescriptor, BindGroupLayoutId,
    BindingResource, BindingType, BufferDescriptor, BufferId, CommandBufferId, GraphicsDevice,
    PipelineError, PipelineLayoutDescriptor, PipelineLayoutId, RenderPipelineDescriptor,
    RenderPipelineId, ResourceError, SamplerDescriptor, SamplerId, ShaderError,
    ShaderModuleDescriptor, ShaderModuleId, TextureDescriptor, TextureFormat, TextureId,
    TextureViewId, FEATURE_POLYGON_MODE_LINE,
};
use wgpu::util::DeviceExt;

use super::command::WgpuCommandEncoder;
use super::context::WgpuGraphicsContext;
use super::conversions::{from_wgpu_texture_format, IntoWgpu};

#[derive(Debug)]
struct WgpuBufferEntry {
    wgpu_buffer: Arc<wgpu::Buffer>,
    size: u64,
}

#[derive(Debug)]
struct WgpuTextureEntry {
    wgpu_texture: Arc<wgpu::Texture>,
    size: u64,
}

/// A resolved bind group resource, kept alive while the bind group is built.
enum ResolvedBinding {
    Buffer(Arc<wgpu::Buffer>, u64, Option<std::num::NonZeroU64>),
    TextureView(Arc<wgpu::TextureView>),
    Sampler(Arc<wgpu::Sampler>),
}

/// The internal, non-clonable state of the [`WgpuDevice`].
#[derive(Debug)]
pub struct WgpuDeviceInternal {
    context: Arc<Mutex<WgpuGraphicsContext>>,
    shader_modules: Mutex<HashMap<ShaderModuleId, Arc<wgpu::ShaderModule>>>,
    bind_group_layouts: Mutex<HashMap<BindGroupLayoutId, Arc<wgpu::BindGroupLayout>>>,
    bind_groups: Mutex<HashMap<BindGroupId, Arc<wgpu::BindGroup>>>,
    pipeline_layouts: Mutex<HashMap<PipelineLayoutId, Arc<wgpu::PipelineLayout>>>,
    pipelines: Mutex<HashMap<RenderPipelineId, Arc<wgpu::RenderPipeline>>>,
    buffers: Mutex<HashMap<BufferId, WgpuBufferEntry>>,
    textures: Mutex<HashMap<TextureId, WgpuTextureEntry>>,
    texture_views: Mutex<HashMap<TextureViewId, Arc<wgpu::TextureView>>>,
    samplers: Mutex<HashMap<SamplerId, Arc<wgpu::Sampler>>>,

    next_shader_id: AtomicUsize,
    next_bind_group_layout_id: AtomicUsize,
    next_bind_group_id: AtomicUsize,
    next_pipeline_layout_id: AtomicUsize,
    next_pipeline_id: AtomicUsize,
    next_buffer_id: AtomicUsize,
    next_texture_id: AtomicUsize,
    next_texture_view_id: AtomicUsize,
    next_sampler_id: AtomicUsize,

    vram_allocated_bytes: AtomicUsize,

    /// Command buffers that have been finished but not yet submitted.
    pending_command_buffers: Mutex<HashMap<CommandBufferId, wgpu::CommandBuffer>>,
    command_buffer_id_counter: AtomicU64,
}

/// A clonable, thread-safe handle to the `wgpu` graphics device.
///
/// Resources are stored in per-kind maps keyed by the opaque IDs of the
/// renderer API. Clones share the same maps, so command encoders can resolve
/// IDs while recording.
#[derive(Clone, Debug)]
pub struct WgpuDevice {
    internal: Arc<WgpuDeviceInternal>,
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, ResourceError> {
    mutex
        .lock()
        .map_err(|e| ResourceError::BackendError(format!("Mutex poisoned ({what}): {e}")))
}

fn next_id(counter: &AtomicUsize) -> usize {
    counter.fetch_add(1, Ordering::Relaxed)
}

impl WgpuDevice {
    pub fn new(context: Arc<Mutex<WgpuGraphicsContext>>) -> Self {
        Self {
            internal: Arc::new(WgpuDeviceInternal {
                context,
                shader_modules: Mutex::new(HashMap::new()),
                bind_group_layouts: Mutex::new(HashMap::new()),
                bind_groups: Mutex::new(HashMap::new()),
                pipeline_layouts: Mutex::new(HashMap::new()),
                pipelines: Mutex::new(HashMap::new()),
                buffers: Mutex::new(HashMap::new()),
                textures: Mutex::new(HashMap::new()),
                texture_views: Mutex::new(HashMap::new()),
                samplers: Mutex::new(HashMap::new()),
                next_shader_id: AtomicUsize::new(0),
                next_bind_group_layout_id: AtomicUsize::new(0),
                next_bind_group_id: AtomicUsize::new(0),
                next_pipeline_layout_id: AtomicUsize::new(0),
                next_pipeline_id: AtomicUsize::new(0),
                next_buffer_id: AtomicUsize::new(0),
                next_texture_id: AtomicUsize::new(0),
                next_texture_view_id: AtomicUsize::new(0),
                next_sampler_id: AtomicUsize::new(0),
                vram_allocated_bytes: AtomicUsize::new(0),
                pending_command_buffers: Mutex::new(HashMap::new()),
                command_buffer_id_counter: AtomicU64::new(0),
            }),
        }
    }

    /// Executes `operation` with the graphics context locked.
    fn with_context<F, R>(&self, operation: F) -> Result<R, ResourceError>
    where
        F: FnOnce(&WgpuGraphicsContext) -> Result<R, ResourceError>,
    {
        let context_guard = lock(&self.internal.context, "WgpuGraphicsContext")?;
        operation(&context_guard)
    }

    /// Runs `create` inside a validation error scope and reports the first
    /// captured error as a string.
    ///
    /// The context lock is held across push, create and pop, so scopes opened
    /// by loader threads never interleave.
    fn with_validation_scope<F, R>(&self, create: F) -> Result<(R, Option<String>), ResourceError>
    where
        F: FnOnce(&wgpu::Device) -> Result<R, ResourceError>,
    {
        self.with_context(|context| {
            context
                .device
                .push_error_scope(wgpu::ErrorFilter::Validation);
            let created = create(&context.device);
            let error = pollster::block_on(context.device.pop_error_scope());
            Ok((created?, error.map(|e| e.to_string())))
        })
    }

    fn track_allocation(&self, bytes: u64) {
        let total = self
            .internal
            .vram_allocated_bytes
            .fetch_add(bytes as usize, Ordering::Relaxed)
            + bytes as usize;
        log::trace!("WgpuDevice: {total} bytes of buffers and textures allocated");
    }

    fn track_release(&self, bytes: u64) {
        self.internal
            .vram_allocated_bytes
            .fetch_sub(bytes as usize, Ordering::Relaxed);
    }

    /// Returns the number of bytes currently held by live buffers and textures.
    pub fn allocated_bytes(&self) -> usize {
        self.internal.vram_allocated_bytes.load(Ordering::Relaxed)
    }

    fn store_buffer(&self, buffer: wgpu::Buffer, label: &str) -> Result<BufferId, ResourceError> {
        let size = buffer.size();
        let id = BufferId(next_id(&self.internal.next_buffer_id));
        lock(&self.internal.buffers, "buffers")?.insert(
            id,
            WgpuBufferEntry {
                wgpu_buffer: Arc::new(buffer),
                size,
            },
        );
        self.track_allocation(size);
        log::debug!("WgpuDevice: Created buffer '{label}' with ID: {id:?}, size: {size} bytes");
        Ok(id)
    }

    fn store_texture(
        &self,
        texture: wgpu::Texture,
        descriptor: &TextureDescriptor,
    ) -> Result<TextureId, ResourceError> {
        let size = descriptor.width as u64
            * descriptor.height as u64
            * descriptor.format.bytes_per_pixel() as u64;
        let id = TextureId(next_id(&self.internal.next_texture_id));
        lock(&self.internal.textures, "textures")?.insert(
            id,
            WgpuTextureEntry {
                wgpu_texture: Arc::new(texture),
                size,
            },
        );
        self.track_allocation(size);
        log::debug!(
            "WgpuDevice: Created texture '{}' with ID: {:?}, {}x{}",
            descriptor.label.as_deref().unwrap_or_default(),
            id,
            descriptor.width,
            descriptor.height
        );
        Ok(id)
    }

    fn wgpu_texture_descriptor<'a>(descriptor: &'a TextureDescriptor) -> wgpu::TextureDescriptor<'a> {
        wgpu::TextureDescriptor {
            label: descriptor.label.as_deref(),
            size: wgpu::Extent3d {
                width: descriptor.width.max(1),
                height: descriptor.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: descriptor.format.into_wgpu(),
            usage: descriptor.usage.into_wgpu(),
            view_formats: &[],
        }
    }

    pub fn get_wgpu_render_pipeline(
        &self,
        id: RenderPipelineId,
    ) -> Option<Arc<wgpu::RenderPipeline>> {
        self.internal.pipelines.lock().ok()?.get(&id).cloned()
    }

    pub fn get_wgpu_bind_group(&self, id: BindGroupId) -> Option<Arc<wgpu::BindGroup>> {
        self.internal.bind_groups.lock().ok()?.get(&id).cloned()
    }

    pub fn get_wgpu_buffer(&self, id: BufferId) -> Option<Arc<wgpu::Buffer>> {
        self.internal
            .buffers
            .lock()
            .ok()?
            .get(&id)
            .map(|entry| Arc::clone(&entry.wgpu_buffer))
    }

    pub fn get_wgpu_texture_view(&self, id: TextureViewId) -> Option<Arc<wgpu::TextureView>> {
        self.internal.texture_views.lock().ok()?.get(&id).cloned()
    }

    fn get_wgpu_sampler(&self, id: SamplerId) -> Option<Arc<wgpu::Sampler>> {
        self.internal.samplers.lock().ok()?.get(&id).cloned()
    }

    /// Waits until the GPU has finished all submitted work.
    pub fn poll_device_blocking(&self) {
        if let Ok(context_guard) = self.internal.context.lock() {
            if let Err(e) = context_guard.device.poll(wgpu::PollType::Wait) {
                log::warn!("Failed to poll device during shutdown: {e:?}");
            }
        } else {
            log::error!("WgpuDevice context mutex was poisoned during shutdown poll.");
        }
    }

    /// Creates a view of a raw `wgpu::Texture` (such as a swapchain image) and
    /// registers it under a new ID.
    pub fn create_texture_view_for_surface(
        &self,
        texture: &wgpu::Texture,
        label: Option<&str>,
    ) -> Result<TextureViewId, ResourceError> {
        let view = Arc::new(texture.create_view(&wgpu::TextureViewDescriptor {
            label,
            ..Default::default()
        }));
        let id = TextureViewId(next_id(&self.internal.next_texture_view_id));
        lock(&self.internal.texture_views, "texture_views")?.insert(id, view);
        Ok(id)
    }

    /// Stores a finished command buffer until it is submitted.
    pub(crate) fn register_command_buffer(&self, buffer: wgpu::CommandBuffer) -> CommandBufferId {
        let id = CommandBufferId(
            self.internal
                .command_buffer_id_counter
                .fetch_add(1, Ordering::SeqCst),
        );
        self.internal
            .pending_command_buffers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, buffer);
        id
    }
}

impl GraphicsDevice for WgpuDevice {
    // --- Shader Module Operations ---

    fn create_shader_module(
        &self,
        descriptor: &ShaderModuleDescriptor,
    ) -> Result<ShaderModuleId, ResourceError> {
        let label = descriptor.label;
        log::debug!("WgpuDevice: Creating wgpu::ShaderModule with label: {label:?}");

        let (module, error) = self.with_validation_scope(|device| {
            Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some(label),
                source: wgpu::ShaderSource::Wgsl(descriptor.source.clone()),
            }))
        })?;
        if let Some(details) = error {
            return Err(ShaderError::CompilationError {
                label: label.to_string(),
                details,
            }
            .into());
        }

        let id = ShaderModuleId(next_id(&self.internal.next_shader_id));
        lock(&self.internal.shader_modules, "shader_modules")?.insert(id, Arc::new(module));
        log::info!("WgpuDevice: Successfully created shader module '{label}' with ID: {id:?}");
        Ok(id)
    }

    // --- Binding Operations ---

    fn create_bind_group_layout(
        &self,
        descriptor: &BindGroupLayoutDescriptor,
    ) -> Result<BindGroupLayoutId, ResourceError> {
        let entries: Vec<wgpu::BindGroupLayoutEntry> = descriptor
            .entries
            .iter()
            .map(|entry| wgpu::BindGroupLayoutEntry {
                binding: entry.binding,
                visibility: entry.visibility.into_wgpu(),
                ty: match entry.ty {
                    BindingType::UniformBuffer {
                        has_dynamic_offset,
                        min_binding_size,
                    } => wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset,
                        min_binding_size,
                    },
                    BindingType::Texture2d => wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    BindingType::Sampler => {
                        wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering)
                    }
                },
                count: None,
            })
            .collect();

        let layout = self.with_context(|context| {
            Ok(context
                .device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: descriptor.label,
                    entries: &entries,
                }))
        })?;

        let id = BindGroupLayoutId(next_id(&self.internal.next_bind_group_layout_id));
        lock(&self.internal.bind_group_layouts, "bind_group_layouts")?
            .insert(id, Arc::new(layout));
        log::debug!(
            "WgpuDevice: Created bind group layout '{}' with ID: {:?}",
            descriptor.label.unwrap_or_default(),
            id
        );
        Ok(id)
    }

    fn create_bind_group(
        &self,
        descriptor: &BindGroupDescriptor,
    ) -> Result<BindGroupId, ResourceError> {
        let layout = lock(&self.internal.bind_group_layouts, "bind_group_layouts")?
            .get(&descriptor.layout)
            .cloned()
            .ok_or(ResourceError::NotFound)?;

        let mut resolved = Vec::with_capacity(descriptor.entries.len());
        for entry in descriptor.entries {
            let binding = match entry.resource {
                BindingResource::Buffer(binding) => ResolvedBinding::Buffer(
                    self.get_wgpu_buffer(binding.buffer)
                        .ok_or(ResourceError::NotFound)?,
                    binding.offset,
                    binding.size,
                ),
                BindingResource::TextureView(view) => ResolvedBinding::TextureView(
                    self.get_wgpu_texture_view(view)
                        .ok_or(ResourceError::NotFound)?,
                ),
                BindingResource::Sampler(sampler) => ResolvedBinding::Sampler(
                    self.get_wgpu_sampler(sampler)
                        .ok_or(ResourceError::NotFound)?,
                ),
            };
            resolved.push((entry.binding, binding));
        }

        let entries: Vec<wgpu::BindGroupEntry> = resolved
            .iter()
            .map(|(binding, resource)| wgpu::BindGroupEntry {
                binding: *binding,
                resource: match resource {
                    ResolvedBinding::Buffer(buffer, offset, size) => {
                        wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                            buffer,
                            offset: *offset,
                            size: *size,
                        })
                    }
                    ResolvedBinding::TextureView(view) => wgpu::BindingResource::TextureView(view),
                    ResolvedBinding::Sampler(sampler) => wgpu::BindingResource::Sampler(sampler),
                },
            })
            .collect();

        let bind_group = self.with_context(|context| {
            Ok(context
                .device
                .create_bind_group(&wgpu::BindGroupDescriptor {
                    label: descriptor.label,
                    layout: &layout,
                    entries: &entries,
                }))
        })?;

        let id = BindGroupId(next_id(&self.internal.next_bind_group_id));
        lock(&self.internal.bind_groups, "bind_groups")?.insert(id, Arc::new(bind_group));
        log::debug!(
            "WgpuDevice: Created bind group '{}' with ID: {:?}",
            descriptor.label.unwrap_or_default(),
            id
        );
        Ok(id)
    }

    fn destroy_bind_group(&self, id: BindGroupId) -> Result<(), ResourceError> {
        if lock(&self.internal.bind_groups, "bind_groups")?
            .remove(&id)
            .is_some()
        {
            log::debug!("WgpuDevice: Destroyed bind group with ID: {id:?}");
            Ok(())
        } else {
            Err(ResourceError::NotFound)
        }
    }

    // --- Pipeline Operations ---

    fn create_pipeline_layout(
        &self,
        descriptor: &PipelineLayoutDescriptor,
    ) -> Result<PipelineLayoutId, ResourceError> {
        let layouts = {
            let map = lock(&self.internal.bind_group_layouts, "bind_group_layouts")?;
            descriptor
                .bind_group_layouts
                .iter()
                .map(|id| {
                    map.get(id).cloned().ok_or_else(|| {
                        PipelineError::MissingDependency(format!("bind group layout {id:?}"))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?
        };
        let layout_refs: Vec<&wgpu::BindGroupLayout> = layouts.iter().map(|l| l.as_ref()).collect();

        let pipeline_layout = self.with_context(|context| {
            Ok(context
                .device
                .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                    label: descriptor.label.as_deref(),
                    bind_group_layouts: &layout_refs,
                    push_constant_ranges: &[],
                }))
        })?;

        let id = PipelineLayoutId(next_id(&self.internal.next_pipeline_layout_id));
        lock(&self.internal.pipeline_layouts, "pipeline_layouts")?
            .insert(id, Arc::new(pipeline_layout));
        log::debug!(
            "WgpuDevice: Created pipeline layout '{}' with ID: {:?}",
            descriptor.label.as_deref().unwrap_or_default(),
            id
        );
        Ok(id)
    }

    fn create_render_pipeline(
        &self,
        descriptor: &RenderPipelineDescriptor,
    ) -> Result<RenderPipelineId, ResourceError> {
        let label = descriptor.label.as_deref().unwrap_or_default();
        log::debug!("WgpuDevice: Creating render pipeline with label: {label:?}");

        // 1. Resolve the shader modules and the layout
        let (vs_module, fs_module) = {
            let modules = lock(&self.internal.shader_modules, "shader_modules")?;
            let find = |id: ShaderModuleId| {
                modules
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| PipelineError::MissingDependency(format!("shader module {id:?}")))
            };
            (
                find(descriptor.vertex_shader_module)?,
                find(descriptor.fragment_shader_module)?,
            )
        };
        let layout = match descriptor.layout {
            Some(id) => Some(
                lock(&self.internal.pipeline_layouts, "pipeline_layouts")?
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| {
                        PipelineError::MissingDependency(format!("pipeline layout {id:?}"))
                    })?,
            ),
            None => None,
        };

        // 2. Convert vertex buffers layout
        let attributes: Vec<Vec<wgpu::VertexAttribute>> = descriptor
            .vertex_buffers_layout
            .iter()
            .map(|layout| {
                layout
                    .attributes
                    .iter()
                    .map(|attr| wgpu::VertexAttribute {
                        format: attr.format.into_wgpu(),
                        offset: attr.offset,
                        shader_location: attr.shader_location,
                    })
                    .collect()
            })
            .collect();
        let vertex_buffers: Vec<wgpu::VertexBufferLayout> = descriptor
            .vertex_buffers_layout
            .iter()
            .zip(attributes.iter())
            .map(|(layout, attributes)| wgpu::VertexBufferLayout {
                array_stride: layout.array_stride,
                step_mode: layout.step_mode.into_wgpu(),
                attributes,
            })
            .collect();

        // 3. Fixed-function state
        let primitive = wgpu::PrimitiveState {
            topology: descriptor.primitive_state.topology.into_wgpu(),
            strip_index_format: descriptor
                .primitive_state
                .strip_index_format
                .map(|f| f.into_wgpu()),
            front_face: descriptor.primitive_state.front_face.into_wgpu(),
            cull_mode: descriptor.primitive_state.cull_mode.map(|m| m.into_wgpu()),
            polygon_mode: descriptor.primitive_state.polygon_mode.into_wgpu(),
            unclipped_depth: false,
            conservative: false,
        };
        let depth_stencil = descriptor
            .depth_stencil_state
            .map(|ds| wgpu::DepthStencilState {
                format: ds.format.into_wgpu(),
                depth_write_enabled: ds.depth_write_enabled,
                depth_compare: ds.depth_compare.into_wgpu(),
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            });
        let targets: Vec<Option<wgpu::ColorTargetState>> = descriptor
            .color_target_states
            .iter()
            .map(|target| {
                Some(wgpu::ColorTargetState {
                    format: target.format.into_wgpu(),
                    blend: target.blend.map(|b| b.into_wgpu()),
                    write_mask: wgpu::ColorWrites::ALL,
                })
            })
            .collect();

        // 4. Bake the pipeline
        let (pipeline, error) = self.with_validation_scope(|device| {
            Ok(
                device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                    label: descriptor.label.as_deref(),
                    layout: layout.as_deref(),
                    vertex: wgpu::VertexState {
                        module: &vs_module,
                        entry_point: Some(descriptor.vertex_entry_point.as_ref()),
                        buffers: &vertex_buffers,
                        compilation_options: Default::default(),
                    },
                    fragment: Some(wgpu::FragmentState {
                        module: &fs_module,
                        entry_point: Some(descriptor.fragment_entry_point.as_ref()),
                        targets: &targets,
                        compilation_options: Default::default(),
                    }),
                    primitive,
                    depth_stencil,
                    multisample: wgpu::MultisampleState::default(),
                    multiview: None,
                    cache: None,
                }),
            )
        })?;
        if let Some(details) = error {
            return Err(PipelineError::CompilationFailed {
                label: descriptor.label.as_deref().map(String::from),
                details,
            }
            .into());
        }

        let id = RenderPipelineId(next_id(&self.internal.next_pipeline_id));
        lock(&self.internal.pipelines, "pipelines")?.insert(id, Arc::new(pipeline));
        log::info!("WgpuDevice: Successfully created render pipeline '{label}' with ID: {id:?}");
        Ok(id)
    }

    // --- Buffer Operations ---

    fn create_buffer(&self, descriptor: &BufferDescriptor) -> Result<BufferId, ResourceError> {
        let buffer = self.with_context(|context| {
            Ok(context.device.create_buffer(&wgpu::BufferDescriptor {
                label: descriptor.label.as_deref(),
                size: descriptor.size,
                usage: descriptor.usage.into_wgpu(),
                mapped_at_creation: false,
            }))
        })?;
        self.store_buffer(buffer, descriptor.label.as_deref().unwrap_or_default())
    }

    fn create_buffer_with_data(
        &self,
        descriptor: &BufferDescriptor,
        data: &[u8],
    ) -> Result<BufferId, ResourceError> {
        let buffer = self.with_context(|context| {
            Ok(context
                .device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: descriptor.label.as_deref(),
                    contents: data,
                    usage: descriptor.usage.into_wgpu(),
                }))
        })?;
        self.store_buffer(buffer, descriptor.label.as_deref().unwrap_or_default())
    }

    fn write_buffer(&self, id: BufferId, offset: u64, data: &[u8]) -> Result<(), ResourceError> {
        let buffer = self.get_wgpu_buffer(id).ok_or(ResourceError::NotFound)?;
        if offset + data.len() as u64 > buffer.size() {
            return Err(ResourceError::OutOfBounds);
        }
        self.with_context(|context| {
            context.queue.write_buffer(&buffer, offset, data);
            Ok(())
        })?;
        log::trace!(
            "WgpuDevice: Wrote {} bytes to buffer ID: {:?} at offset {}",
            data.len(),
            id,
            offset
        );
        Ok(())
    }

    fn destroy_buffer(&self, id: BufferId) -> Result<(), ResourceError> {
        let entry = lock(&self.internal.buffers, "buffers")?
            .remove(&id)
            .ok_or(ResourceError::NotFound)?;
        self.track_release(entry.size);
        log::debug!("WgpuDevice: Destroyed buffer with ID: {id:?}");
        Ok(())
    }

    // --- Texture Operations ---

    fn create_texture_with_data(
        &self,
        descriptor: &TextureDescriptor,
        data: &[u8],
    ) -> Result<TextureId, ResourceError> {
        let bytes_per_row = descriptor.format.bytes_per_pixel() * descriptor.width;
        let expected = bytes_per_row as usize * descriptor.height as usize;
        if descriptor.width == 0 || descriptor.height == 0 || data.len() != expected {
            return Err(ResourceError::BackendError(format!(
                "Texture '{}' expects {} bytes of texel data, got {}",
                descriptor.label.as_deref().unwrap_or_default(),
                expected,
                data.len()
            )));
        }

        let texture = self.with_context(|context| {
            let texture = context
                .device
                .create_texture(&Self::wgpu_texture_descriptor(descriptor));
            context.queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                data,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(bytes_per_row),
                    rows_per_image: Some(descriptor.height),
                },
                wgpu::Extent3d {
                    width: descriptor.width,
                    height: descriptor.height,
                    depth_or_array_layers: 1,
                },
            );
            Ok(texture)
        })?;
        self.store_texture(texture, descriptor)
    }

    fn create_texture(&self, descriptor: &TextureDescriptor) -> Result<TextureId, ResourceError> {
        let texture = self.with_context(|context| {
            Ok(context
                .device
                .create_texture(&Self::wgpu_texture_descriptor(descriptor)))
        })?;
        self.store_texture(texture, descriptor)
    }

    fn create_texture_view(&self, texture: TextureId) -> Result<TextureViewId, ResourceError> {
        let wgpu_texture = lock(&self.internal.textures, "textures")?
            .get(&texture)
            .map(|entry| Arc::clone(&entry.wgpu_texture))
            .ok_or(ResourceError::NotFound)?;
        let view = Arc::new(wgpu_texture.create_view(&wgpu::TextureViewDescriptor::default()));
        let id = TextureViewId(next_id(&self.internal.next_texture_view_id));
        lock(&self.internal.texture_views, "texture_views")?.insert(id, view);
        log::debug!("WgpuDevice: Created texture view {id:?} for texture {texture:?}");
        Ok(id)
    }

    fn destroy_texture_view(&self, id: TextureViewId) -> Result<(), ResourceError> {
        lock(&self.internal.texture_views, "texture_views")?
            .remove(&id)
            .map(|_| ())
            .ok_or(ResourceError::NotFound)
    }

    fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError> {
        let entry = lock(&self.internal.textures, "textures")?
            .remove(&id)
            .ok_or(ResourceError::NotFound)?;
        self.track_release(entry.size);
        log::debug!("WgpuDevice: Destroyed texture with ID: {id:?}");
        Ok(())
    }

    fn create_sampler(&self, descriptor: &SamplerDescriptor) -> Result<SamplerId, ResourceError> {
        let address_mode = descriptor.address_mode.into_wgpu();
        let sampler = self.with_context(|context| {
            Ok(context.device.create_sampler(&wgpu::SamplerDescriptor {
                label: descriptor.label.as_deref(),
                address_mode_u: address_mode,
                address_mode_v: address_mode,
                address_mode_w: address_mode,
                mag_filter: descriptor.mag_filter.into_wgpu(),
                min_filter: descriptor.min_filter.into_wgpu(),
                ..Default::default()
            }))
        })?;
        let id = SamplerId(next_id(&self.internal.next_sampler_id));
        lock(&self.internal.samplers, "samplers")?.insert(id, Arc::new(sampler));
        log::debug!(
            "WgpuDevice: Created sampler '{}' with ID: {:?}",
            descriptor.label.as_deref().unwrap_or_default(),
            id
        );
        Ok(id)
    }

    // --- Command Operations ---

    fn create_command_encoder(&self, label: Option<&str>) -> Box<dyn CommandEncoder> {
        let encoder = {
            let context = self
                .internal
                .context
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor { label })
        };
        Box::new(WgpuCommandEncoder {
            encoder,
            device: self.clone(),
        })
    }

    fn submit_command_buffer(&self, command_buffer: CommandBufferId) {
        let buffer = self
            .internal
            .pending_command_buffers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&command_buffer);
        match buffer {
            Some(buffer) => {
                let context = self
                    .internal
                    .context
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                context.queue.submit(std::iter::once(buffer));
            }
            None => log::warn!(
                "WgpuDevice: Attempted to submit unknown command buffer {command_buffer:?}"
            ),
        }
    }

    // --- Queries ---

    fn surface_format(&self) -> Option<TextureFormat> {
        let context = self.internal.context.lock().ok()?;
        from_wgpu_texture_format(context.surface_config.format)
    }

    fn supports_feature(&self, feature_name: &str) -> bool {
        let Ok(context) = self.internal.context.lock() else {
            return false;
        };
        match feature_name {
            FEATURE_POLYGON_MODE_LINE => context
                .active_device_features
                .contains(wgpu::Features::POLYGON_MODE_LINE),
            _ => false,
        }
    }

    fn min_uniform_buffer_offset_alignment(&self) -> u32 {
        self.internal
            .context
            .lock()
            .map(|context| context.device_limits.min_uniform_buffer_offset_alignment)
            .unwrap_or(256)
    }
}
