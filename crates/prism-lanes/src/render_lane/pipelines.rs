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

//! Shader compilation and the baked pipeline permutations of a frame.

use super::payload::PAYLOAD_SIZE;
use super::shaders::{FRAGMENT_ENTRY, OVERLAY_WGSL, SCENE_WGSL, SKYBOX_WGSL, TERRAIN_WGSL, VERTEX_ENTRY};
use prism_core::math::LinearRgba;
use prism_core::renderer::{
    BindGroupLayoutDescriptor, BindGroupLayoutEntry, BindGroupLayoutId, BindingType, BlendMode,
    BlendStateDescriptor, ColorTargetStateDescriptor, CompareFunction, DepthStencilStateDescriptor,
    GraphicsDevice, PipelineLayoutDescriptor, PipelineLayoutId, PrimitiveStateDescriptor,
    RasterizerMode, RenderPipelineDescriptor, RenderPipelineId, ResourceError, SamplerDescriptor,
    SamplerId, ShaderModuleDescriptor, ShaderModuleId, ShaderStageFlags, TextureFormat,
    VertexAttributeDescriptor, VertexBufferLayoutDescriptor, VertexFormat, VertexStepMode,
    FEATURE_POLYGON_MODE_LINE,
};
use std::borrow::Cow;
use std::num::NonZeroU64;

/// Format of the depth attachment every pipeline is built against.
pub const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

/// Blend constant set on the pass for transparent draws.
pub const TRANSPARENT_BLEND_CONSTANT: LinearRgba = LinearRgba::new(0.25, 0.25, 0.25, 1.0);

const SCENE_ATTRIBUTES: [VertexAttributeDescriptor; 3] = [
    VertexAttributeDescriptor {
        shader_location: 0,
        format: VertexFormat::Float32x3,
        offset: 0,
    },
    VertexAttributeDescriptor {
        shader_location: 1,
        format: VertexFormat::Float32x3,
        offset: 12,
    },
    VertexAttributeDescriptor {
        shader_location: 2,
        format: VertexFormat::Float32x2,
        offset: 24,
    },
];

const TERRAIN_ATTRIBUTES: [VertexAttributeDescriptor; 2] = [
    VertexAttributeDescriptor {
        shader_location: 0,
        format: VertexFormat::Float32x3,
        offset: 0,
    },
    VertexAttributeDescriptor {
        shader_location: 1,
        format: VertexFormat::Float32x2,
        offset: 12,
    },
];

const OVERLAY_ATTRIBUTES: [VertexAttributeDescriptor; 2] = [
    VertexAttributeDescriptor {
        shader_location: 0,
        format: VertexFormat::Float32x2,
        offset: 0,
    },
    VertexAttributeDescriptor {
        shader_location: 1,
        format: VertexFormat::Float32x4,
        offset: 8,
    },
];

fn vertex_layout(stride: u64, attributes: &'static [VertexAttributeDescriptor]) -> VertexBufferLayoutDescriptor<'static> {
    VertexBufferLayoutDescriptor {
        array_stride: stride,
        step_mode: VertexStepMode::Vertex,
        attributes: Cow::Borrowed(attributes),
    }
}

/// The shader modules compiled at startup.
#[derive(Debug, Clone, Copy)]
struct ShaderModules {
    scene: ShaderModuleId,
    skybox: ShaderModuleId,
    terrain: ShaderModuleId,
    overlay: ShaderModuleId,
}

impl ShaderModules {
    fn compile(device: &dyn GraphicsDevice) -> Result<Self, ResourceError> {
        let compile = |label: &'static str, source: &'static str| {
            device.create_shader_module(&ShaderModuleDescriptor {
                label,
                source: Cow::Borrowed(source),
            })
        };
        Ok(Self {
            scene: compile("scene.wgsl", SCENE_WGSL)?,
            skybox: compile("skybox.wgsl", SKYBOX_WGSL)?,
            terrain: compile("terrain.wgsl", TERRAIN_WGSL)?,
            overlay: compile("overlay.wgsl", OVERLAY_WGSL)?,
        })
    }
}

/// Every pipeline the frame sequencer may bind, plus the shared layouts.
#[derive(Debug, Clone)]
pub struct PipelineSet {
    payload_layout: BindGroupLayoutId,
    texture_layout: BindGroupLayoutId,
    sampler: SamplerId,
    scene: [[RenderPipelineId; 2]; 3],
    terrain: [RenderPipelineId; 3],
    skybox: RenderPipelineId,
    overlay: RenderPipelineId,
    line_supported: bool,
}

impl PipelineSet {
    /// Compiles the shaders and bakes every pipeline for `color_format`.
    ///
    /// ## Errors
    /// Any shader or pipeline failure is returned as-is; it is fatal for the caller.
    pub fn new(device: &dyn GraphicsDevice, color_format: TextureFormat) -> Result<Self, ResourceError> {
        let modules = ShaderModules::compile(device)?;
        let line_supported = device.supports_feature(FEATURE_POLYGON_MODE_LINE);
        if !line_supported {
            log::warn!("Line polygon mode unsupported, wireframe falls back to solid fill");
        }

        let payload_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Payload Layout"),
            entries: &[BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStageFlags::VERTEX_FRAGMENT,
                ty: BindingType::UniformBuffer {
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(PAYLOAD_SIZE),
                },
            }],
        })?;
        let texture_layout = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Texture Layout"),
            entries: &[
                BindGroupLayoutEntry {
                    binding: 0,
                    visibility: ShaderStageFlags::FRAGMENT,
                    ty: BindingType::Texture2d,
                },
                BindGroupLayoutEntry {
                    binding: 1,
                    visibility: ShaderStageFlags::FRAGMENT,
                    ty: BindingType::Sampler,
                },
            ],
        })?;
        let sampler = device.create_sampler(&SamplerDescriptor {
            label: Some("Wrap Sampler".into()),
            ..Default::default()
        })?;

        let textured_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Textured Pipeline Layout".into()),
            bind_group_layouts: &[payload_layout, texture_layout],
        })?;
        let payload_only_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Terrain Pipeline Layout".into()),
            bind_group_layouts: &[payload_layout],
        })?;
        let empty_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Overlay Pipeline Layout".into()),
            bind_group_layouts: &[],
        })?;

        let builder = PipelineBuilder {
            device,
            color_format,
        };

        let mut scene = [[RenderPipelineId(0); 2]; 3];
        let mut terrain = [RenderPipelineId(0); 3];
        for mode in RasterizerMode::ALL {
            let primitive = mode.primitive_state(line_supported);
            for blend in [BlendMode::Opaque, BlendMode::Transparent] {
                scene[mode.index()][blend.index()] = builder.build(PipelineSpec {
                    label: format!("Scene {mode:?} {blend:?}"),
                    layout: textured_layout,
                    module: modules.scene,
                    vertex: vertex_layout(32, &SCENE_ATTRIBUTES),
                    primitive,
                    depth: depth_state(CompareFunction::Less, true),
                    blend: blend.blend_state(),
                })?;
            }
            terrain[mode.index()] = builder.build(PipelineSpec {
                label: format!("Terrain {mode:?}"),
                layout: payload_only_layout,
                module: modules.terrain,
                vertex: vertex_layout(20, &TERRAIN_ATTRIBUTES),
                primitive,
                depth: depth_state(CompareFunction::Less, true),
                blend: None,
            })?;
        }

        let skybox = builder.build(PipelineSpec {
            label: "Skybox".to_owned(),
            layout: textured_layout,
            module: modules.skybox,
            vertex: vertex_layout(32, &SCENE_ATTRIBUTES),
            primitive: PrimitiveStateDescriptor::default(),
            depth: depth_state(CompareFunction::LessEqual, true),
            blend: None,
        })?;

        let overlay = builder.build(PipelineSpec {
            label: "Overlay".to_owned(),
            layout: empty_layout,
            module: modules.overlay,
            vertex: vertex_layout(24, &OVERLAY_ATTRIBUTES),
            primitive: PrimitiveStateDescriptor::default(),
            depth: depth_state(CompareFunction::Always, false),
            blend: Some(BlendStateDescriptor::ALPHA_BLENDING),
        })?;

        log::info!("Pipeline set ready ({} pipelines)", 3 * 2 + 3 + 2);
        Ok(Self {
            payload_layout,
            texture_layout,
            sampler,
            scene,
            terrain,
            skybox,
            overlay,
            line_supported,
        })
    }

    /// The scene pipeline for a rasterizer and blend combination.
    pub fn scene(&self, mode: RasterizerMode, blend: BlendMode) -> RenderPipelineId {
        self.scene[mode.index()][blend.index()]
    }

    /// The terrain pipeline for a rasterizer mode.
    pub fn terrain(&self, mode: RasterizerMode) -> RenderPipelineId {
        self.terrain[mode.index()]
    }

    /// The skybox pipeline.
    pub fn skybox(&self) -> RenderPipelineId {
        self.skybox
    }

    /// The overlay pipeline.
    pub fn overlay(&self) -> RenderPipelineId {
        self.overlay
    }

    /// Layout of `@group(0)`, the payload uniform.
    pub fn payload_layout(&self) -> BindGroupLayoutId {
        self.payload_layout
    }

    /// Layout of `@group(1)`, a texture and its sampler.
    pub fn texture_layout(&self) -> BindGroupLayoutId {
        self.texture_layout
    }

    /// The sampler used by every texture bind group.
    pub fn sampler(&self) -> SamplerId {
        self.sampler
    }

    /// Whether wireframe pipelines really draw lines.
    pub fn line_supported(&self) -> bool {
        self.line_supported
    }
}

fn depth_state(compare: CompareFunction, write: bool) -> Option<DepthStencilStateDescriptor> {
    Some(DepthStencilStateDescriptor {
        format: DEPTH_FORMAT,
        depth_write_enabled: write,
        depth_compare: compare,
    })
}

struct PipelineSpec {
    label: String,
    layout: PipelineLayoutId,
    module: ShaderModuleId,
    vertex: VertexBufferLayoutDescriptor<'static>,
    primitive: PrimitiveStateDescriptor,
    depth: Option<DepthStencilStateDescriptor>,
    blend: Option<BlendStateDescriptor>,
}

struct PipelineBuilder<'a> {
    device: &'a dyn GraphicsDevice,
    color_format: TextureFormat,
}

impl PipelineBuilder<'_> {
    fn build(&self, spec: PipelineSpec) -> Result<RenderPipelineId, ResourceError> {
        let id = self.device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some(Cow::Borrowed(spec.label.as_str())),
            layout: Some(spec.layout),
            vertex_shader_module: spec.module,
            vertex_entry_point: Cow::Borrowed(VERTEX_ENTRY),
            fragment_shader_module: spec.module,
            fragment_entry_point: Cow::Borrowed(FRAGMENT_ENTRY),
            vertex_buffers_layout: Cow::Owned(vec![spec.vertex]),
            primitive_state: spec.primitive,
            depth_stencil_state: spec.depth,
            color_target_states: Cow::Owned(vec![ColorTargetStateDescriptor {
                format: self.color_format,
                blend: spec.blend,
            }]),
        })?;
        log::debug!("Created pipeline '{}' as {id:?}", spec.label);
        Ok(id)
    }
}
