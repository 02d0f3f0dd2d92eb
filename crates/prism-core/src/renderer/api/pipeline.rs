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

//! Defines render pipeline descriptors and the fixed-function state they bake.
//!
//! Rasterizer, blend and depth-stencil state are immutable parts of a pipeline.
//! A frame switches state by switching pipelines, so the state selectors
//! [`RasterizerMode`] and [`BlendMode`] index into a pre-built pipeline set.

use super::bind_group::BindGroupLayoutId;
use super::buffer::IndexFormat;
use super::shader::ShaderModuleId;
use super::texture::TextureFormat;
use std::borrow::Cow;

/// The format of a single vertex attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum VertexFormat {
    Float32x2,
    Float32x3,
    Float32x4,
}

impl VertexFormat {
    /// Returns the size of the attribute in bytes.
    pub const fn size(self) -> u64 {
        match self {
            VertexFormat::Float32x2 => 8,
            VertexFormat::Float32x3 => 12,
            VertexFormat::Float32x4 => 16,
        }
    }
}

/// How often a vertex buffer is advanced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VertexStepMode {
    /// Advanced once per vertex.
    #[default]
    Vertex,
    /// Advanced once per instance.
    Instance,
}

/// The primitive type the input assembler produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PrimitiveTopology {
    /// Every three vertices form a triangle.
    #[default]
    TriangleList,
    /// Every two vertices form a line.
    LineList,
}

/// Which triangle faces are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CullMode {
    /// Discard front-facing triangles.
    Front,
    /// Discard back-facing triangles.
    Back,
}

/// The winding that marks a triangle as front-facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrontFace {
    /// Counter-clockwise.
    #[default]
    Ccw,
    /// Clockwise.
    Cw,
}

/// How polygons are rasterized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolygonMode {
    /// Filled triangles.
    #[default]
    Fill,
    /// Triangle edges only.
    Line,
}

/// A comparison function for depth testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(missing_docs)]
pub enum CompareFunction {
    Never,
    #[default]
    Less,
    LessEqual,
    Equal,
    Greater,
    Always,
}

/// A factor in a blend equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum BlendFactor {
    Zero,
    One,
    Src,
    OneMinusSrc,
    SrcAlpha,
    OneMinusSrcAlpha,
    Dst,
    /// The blend constant set on the render pass.
    Constant,
    OneMinusConstant,
}

/// The operator combining the two sides of a blend equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(missing_docs)]
pub enum BlendOperation {
    #[default]
    Add,
    Subtract,
    ReverseSubtract,
    Min,
    Max,
}

/// Describes a single vertex attribute within a vertex buffer layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VertexAttributeDescriptor {
    /// The `@location` of this attribute in the vertex shader.
    pub shader_location: u32,
    /// The format of the attribute's data.
    pub format: VertexFormat,
    /// The byte offset of this attribute from the start of the vertex.
    pub offset: u64,
}

/// Describes the memory layout of a single vertex buffer.
#[derive(Debug, Clone)]
pub struct VertexBufferLayoutDescriptor<'a> {
    /// The byte distance between consecutive elements in the buffer.
    pub array_stride: u64,
    /// How often the vertex buffer is advanced.
    pub step_mode: VertexStepMode,
    /// The attributes contained within each element of the buffer.
    pub attributes: Cow<'a, [VertexAttributeDescriptor]>,
}

/// Describes primitive assembly and rasterization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PrimitiveStateDescriptor {
    /// The topology of the primitives.
    pub topology: PrimitiveTopology,
    /// The index format used for strip topologies.
    pub strip_index_format: Option<IndexFormat>,
    /// The winding that determines the front face.
    pub front_face: FrontFace,
    /// The face culling mode.
    pub cull_mode: Option<CullMode>,
    /// The rasterization mode for polygons.
    pub polygon_mode: PolygonMode,
}

impl Default for PrimitiveStateDescriptor {
    fn default() -> Self {
        Self {
            topology: PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: PolygonMode::Fill,
        }
    }
}

/// Describes depth testing. Stencil is never used by the framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DepthStencilStateDescriptor {
    /// The format of the depth texture.
    pub format: TextureFormat,
    /// If `true`, depth values are written to the depth buffer.
    pub depth_write_enabled: bool,
    /// The comparison function used for the depth test.
    pub depth_compare: CompareFunction,
}

/// A complete blend equation for the color or alpha channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendComponentDescriptor {
    /// The factor applied to the fragment shader output.
    pub src_factor: BlendFactor,
    /// The factor applied to the value already in the framebuffer.
    pub dst_factor: BlendFactor,
    /// The operation combining both sides.
    pub operation: BlendOperation,
}

impl BlendComponentDescriptor {
    /// `src * 1 + dst * 0`, i.e. blending disabled.
    pub const REPLACE: Self = Self {
        src_factor: BlendFactor::One,
        dst_factor: BlendFactor::Zero,
        operation: BlendOperation::Add,
    };
}

/// The blend state of a single color target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlendStateDescriptor {
    /// The blend equation for the RGB channels.
    pub color: BlendComponentDescriptor,
    /// The blend equation for the alpha channel.
    pub alpha: BlendComponentDescriptor,
}

impl BlendStateDescriptor {
    /// Standard "over" alpha blending.
    pub const ALPHA_BLENDING: Self = Self {
        color: BlendComponentDescriptor {
            src_factor: BlendFactor::SrcAlpha,
            dst_factor: BlendFactor::OneMinusSrcAlpha,
            operation: BlendOperation::Add,
        },
        alpha: BlendComponentDescriptor {
            src_factor: BlendFactor::One,
            dst_factor: BlendFactor::OneMinusSrcAlpha,
            operation: BlendOperation::Add,
        },
    };

    /// Source color weighted against a constant-scaled destination
    /// (`src * src + dst * constant`). Used for glassware and the menu object.
    pub const CONSTANT_TRANSPARENCY: Self = Self {
        color: BlendComponentDescriptor {
            src_factor: BlendFactor::Src,
            dst_factor: BlendFactor::Constant,
            operation: BlendOperation::Add,
        },
        alpha: BlendComponentDescriptor::REPLACE,
    };
}

/// Describes one color output of a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorTargetStateDescriptor {
    /// The format of the attachment.
    pub format: TextureFormat,
    /// The blend state, or `None` to overwrite.
    pub blend: Option<BlendStateDescriptor>,
}

/// An opaque handle to a render pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderPipelineId(pub usize);

/// An opaque handle to a pipeline layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PipelineLayoutId(pub usize);

/// A descriptor used to create a [`PipelineLayoutId`].
#[derive(Debug, Clone)]
pub struct PipelineLayoutDescriptor<'a> {
    /// An optional debug label.
    pub label: Option<Cow<'a, str>>,
    /// The bind group layouts, in `@group` order.
    pub bind_group_layouts: &'a [BindGroupLayoutId],
}

/// A descriptor used to create a [`RenderPipelineId`].
#[derive(Debug, Clone)]
pub struct RenderPipelineDescriptor<'a> {
    /// An optional debug label.
    pub label: Option<Cow<'a, str>>,
    /// The pipeline layout, or `None` to derive it from the shaders.
    pub layout: Option<PipelineLayoutId>,
    /// The module holding the vertex entry point.
    pub vertex_shader_module: ShaderModuleId,
    /// The vertex entry point name.
    pub vertex_entry_point: Cow<'a, str>,
    /// The module holding the fragment entry point.
    pub fragment_shader_module: ShaderModuleId,
    /// The fragment entry point name.
    pub fragment_entry_point: Cow<'a, str>,
    /// The vertex buffer layouts, in slot order.
    pub vertex_buffers_layout: Cow<'a, [VertexBufferLayoutDescriptor<'a>]>,
    /// Primitive assembly and rasterization.
    pub primitive_state: PrimitiveStateDescriptor,
    /// Depth testing, or `None` for pipelines that ignore depth.
    pub depth_stencil_state: Option<DepthStencilStateDescriptor>,
    /// The color outputs.
    pub color_target_states: Cow<'a, [ColorTargetStateDescriptor]>,
}

/// The three mutually exclusive rasterizer configurations of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RasterizerMode {
    /// Solid triangles with back faces culled.
    Fill,
    /// Triangle edges with no culling.
    Wireframe,
    /// Solid triangles with no culling.
    NoCull,
}

impl RasterizerMode {
    /// Every mode, in a stable order.
    pub const ALL: [RasterizerMode; 3] = [
        RasterizerMode::Fill,
        RasterizerMode::Wireframe,
        RasterizerMode::NoCull,
    ];

    /// Resolves the mode from the two scene toggles.
    ///
    /// Fill wins; without fill, culling decides between wireframe and no-cull.
    pub const fn select(fill: bool, no_cull: bool) -> Self {
        if fill {
            RasterizerMode::Fill
        } else if !no_cull {
            RasterizerMode::Wireframe
        } else {
            RasterizerMode::NoCull
        }
    }

    /// Returns the primitive state this mode bakes into a pipeline.
    ///
    /// `line_supported` is `false` when the device cannot rasterize lines, in
    /// which case wireframe degrades to solid fill without culling.
    pub fn primitive_state(self, line_supported: bool) -> PrimitiveStateDescriptor {
        let (cull_mode, polygon_mode) = match self {
            RasterizerMode::Fill => (Some(CullMode::Back), PolygonMode::Fill),
            RasterizerMode::Wireframe if line_supported => (None, PolygonMode::Line),
            RasterizerMode::Wireframe | RasterizerMode::NoCull => (None, PolygonMode::Fill),
        };
        PrimitiveStateDescriptor {
            cull_mode,
            polygon_mode,
            ..Default::default()
        }
    }

    /// A stable index into per-mode tables.
    pub const fn index(self) -> usize {
        match self {
            RasterizerMode::Fill => 0,
            RasterizerMode::Wireframe => 1,
            RasterizerMode::NoCull => 2,
        }
    }
}

/// Whether a draw writes over or blends with the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// No blending.
    Opaque,
    /// [`BlendStateDescriptor::CONSTANT_TRANSPARENCY`].
    Transparent,
}

impl BlendMode {
    /// A stable index into per-mode tables.
    pub const fn index(self) -> usize {
        match self {
            BlendMode::Opaque => 0,
            BlendMode::Transparent => 1,
        }
    }

    /// Returns the blend state this mode bakes into a pipeline.
    pub const fn blend_state(self) -> Option<BlendStateDescriptor> {
        match self {
            BlendMode::Opaque => None,
            BlendMode::Transparent => Some(BlendStateDescriptor::CONSTANT_TRANSPARENCY),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rasterizer_selection_truth_table() {
        assert_eq!(RasterizerMode::select(true, false), RasterizerMode::Fill);
        assert_eq!(RasterizerMode::select(true, true), RasterizerMode::Fill);
        assert_eq!(RasterizerMode::select(false, false), RasterizerMode::Wireframe);
        assert_eq!(RasterizerMode::select(false, true), RasterizerMode::NoCull);
    }

    #[test]
    fn test_wireframe_degrades_without_line_support() {
        let with_lines = RasterizerMode::Wireframe.primitive_state(true);
        assert_eq!(with_lines.polygon_mode, PolygonMode::Line);
        assert_eq!(with_lines.cull_mode, None);

        let without = RasterizerMode::Wireframe.primitive_state(false);
        assert_eq!(without.polygon_mode, PolygonMode::Fill);
        assert_eq!(without.cull_mode, None);

        assert_eq!(
            RasterizerMode::Fill.primitive_state(true).cull_mode,
            Some(CullMode::Back)
        );
    }
}
