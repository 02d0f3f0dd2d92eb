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

//! Conversions from the renderer API vocabulary to `wgpu` types.

use prism_core::math::LinearRgba;
use prism_core::renderer::{
    AddressMode, BlendComponentDescriptor, BlendFactor, BlendOperation, BlendStateDescriptor,
    BufferUsage, CompareFunction, CullMode, FilterMode, FrontFace, IndexFormat, LoadOp,
    Operations, PolygonMode, PrimitiveTopology, ShaderStageFlags, StoreOp, TextureFormat,
    TextureUsage, VertexFormat, VertexStepMode,
};

/// A local extension trait to convert engine types into `wgpu` types.
/// It sidesteps the orphan rules while keeping an idiomatic `.into_wgpu()` syntax.
pub trait IntoWgpu<T> {
    /// Consumes self and converts it into a `wgpu` value.
    fn into_wgpu(self) -> T;
}

impl IntoWgpu<wgpu::TextureFormat> for TextureFormat {
    fn into_wgpu(self) -> wgpu::TextureFormat {
        match self {
            TextureFormat::Rgba8UnormSrgb => wgpu::TextureFormat::Rgba8UnormSrgb,
            TextureFormat::Rgba8Unorm => wgpu::TextureFormat::Rgba8Unorm,
            TextureFormat::Bgra8UnormSrgb => wgpu::TextureFormat::Bgra8UnormSrgb,
            TextureFormat::Bgra8Unorm => wgpu::TextureFormat::Bgra8Unorm,
            TextureFormat::Depth32Float => wgpu::TextureFormat::Depth32Float,
        }
    }
}

/// Converts a `wgpu` surface format back into the engine's vocabulary.
///
/// Returns `None` for formats the renderer never targets.
pub fn from_wgpu_texture_format(format: wgpu::TextureFormat) -> Option<TextureFormat> {
    match format {
        wgpu::TextureFormat::Rgba8UnormSrgb => Some(TextureFormat::Rgba8UnormSrgb),
        wgpu::TextureFormat::Rgba8Unorm => Some(TextureFormat::Rgba8Unorm),
        wgpu::TextureFormat::Bgra8UnormSrgb => Some(TextureFormat::Bgra8UnormSrgb),
        wgpu::TextureFormat::Bgra8Unorm => Some(TextureFormat::Bgra8Unorm),
        wgpu::TextureFormat::Depth32Float => Some(TextureFormat::Depth32Float),
        _ => None,
    }
}

impl IntoWgpu<wgpu::TextureUsages> for TextureUsage {
    fn into_wgpu(self) -> wgpu::TextureUsages {
        let mut usages = wgpu::TextureUsages::empty();
        if self.contains(TextureUsage::COPY_DST) {
            usages |= wgpu::TextureUsages::COPY_DST;
        }
        if self.contains(TextureUsage::TEXTURE_BINDING) {
            usages |= wgpu::TextureUsages::TEXTURE_BINDING;
        }
        if self.contains(TextureUsage::RENDER_ATTACHMENT) {
            usages |= wgpu::TextureUsages::RENDER_ATTACHMENT;
        }
        usages
    }
}

impl IntoWgpu<wgpu::BufferUsages> for BufferUsage {
    fn into_wgpu(self) -> wgpu::BufferUsages {
        let mut usages = wgpu::BufferUsages::empty();
        if self.contains(BufferUsage::COPY_DST) {
            usages |= wgpu::BufferUsages::COPY_DST;
        }
        if self.contains(BufferUsage::VERTEX) {
            usages |= wgpu::BufferUsages::VERTEX;
        }
        if self.contains(BufferUsage::INDEX) {
            usages |= wgpu::BufferUsages::INDEX;
        }
        if self.contains(BufferUsage::UNIFORM) {
            usages |= wgpu::BufferUsages::UNIFORM;
        }
        usages
    }
}

impl IntoWgpu<wgpu::ShaderStages> for ShaderStageFlags {
    fn into_wgpu(self) -> wgpu::ShaderStages {
        let mut stages = wgpu::ShaderStages::NONE;
        if self.contains(ShaderStageFlags::VERTEX) {
            stages |= wgpu::ShaderStages::VERTEX;
        }
        if self.contains(ShaderStageFlags::FRAGMENT) {
            stages |= wgpu::ShaderStages::FRAGMENT;
        }
        stages
    }
}

impl IntoWgpu<wgpu::AddressMode> for AddressMode {
    fn into_wgpu(self) -> wgpu::AddressMode {
        match self {
            AddressMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
            AddressMode::Repeat => wgpu::AddressMode::Repeat,
            AddressMode::MirrorRepeat => wgpu::AddressMode::MirrorRepeat,
        }
    }
}

impl IntoWgpu<wgpu::FilterMode> for FilterMode {
    fn into_wgpu(self) -> wgpu::FilterMode {
        match self {
            FilterMode::Nearest => wgpu::FilterMode::Nearest,
            FilterMode::Linear => wgpu::FilterMode::Linear,
        }
    }
}

impl IntoWgpu<wgpu::CompareFunction> for CompareFunction {
    fn into_wgpu(self) -> wgpu::CompareFunction {
        match self {
            CompareFunction::Never => wgpu::CompareFunction::Never,
            CompareFunction::Less => wgpu::CompareFunction::Less,
            CompareFunction::LessEqual => wgpu::CompareFunction::LessEqual,
            CompareFunction::Equal => wgpu::CompareFunction::Equal,
            CompareFunction::Greater => wgpu::CompareFunction::Greater,
            CompareFunction::Always => wgpu::CompareFunction::Always,
        }
    }
}

// --- Pipeline state ---

impl IntoWgpu<wgpu::VertexFormat> for VertexFormat {
    fn into_wgpu(self) -> wgpu::VertexFormat {
        match self {
            VertexFormat::Float32x2 => wgpu::VertexFormat::Float32x2,
            VertexFormat::Float32x3 => wgpu::VertexFormat::Float32x3,
            VertexFormat::Float32x4 => wgpu::VertexFormat::Float32x4,
        }
    }
}

impl IntoWgpu<wgpu::VertexStepMode> for VertexStepMode {
    fn into_wgpu(self) -> wgpu::VertexStepMode {
        match self {
            VertexStepMode::Vertex => wgpu::VertexStepMode::Vertex,
            VertexStepMode::Instance => wgpu::VertexStepMode::Instance,
        }
    }
}

impl IntoWgpu<wgpu::PrimitiveTopology> for PrimitiveTopology {
    fn into_wgpu(self) -> wgpu::PrimitiveTopology {
        match self {
            PrimitiveTopology::TriangleList => wgpu::PrimitiveTopology::TriangleList,
            PrimitiveTopology::LineList => wgpu::PrimitiveTopology::LineList,
        }
    }
}

impl IntoWgpu<wgpu::FrontFace> for FrontFace {
    fn into_wgpu(self) -> wgpu::FrontFace {
        match self {
            FrontFace::Ccw => wgpu::FrontFace::Ccw,
            FrontFace::Cw => wgpu::FrontFace::Cw,
        }
    }
}

impl IntoWgpu<wgpu::Face> for CullMode {
    fn into_wgpu(self) -> wgpu::Face {
        match self {
            CullMode::Front => wgpu::Face::Front,
            CullMode::Back => wgpu::Face::Back,
        }
    }
}

impl IntoWgpu<wgpu::PolygonMode> for PolygonMode {
    fn into_wgpu(self) -> wgpu::PolygonMode {
        match self {
            PolygonMode::Fill => wgpu::PolygonMode::Fill,
            PolygonMode::Line => wgpu::PolygonMode::Line,
        }
    }
}

impl IntoWgpu<wgpu::IndexFormat> for IndexFormat {
    fn into_wgpu(self) -> wgpu::IndexFormat {
        match self {
            IndexFormat::Uint16 => wgpu::IndexFormat::Uint16,
            IndexFormat::Uint32 => wgpu::IndexFormat::Uint32,
        }
    }
}

impl IntoWgpu<wgpu::BlendFactor> for BlendFactor {
    fn into_wgpu(self) -> wgpu::BlendFactor {
        match self {
            BlendFactor::Zero => wgpu::BlendFactor::Zero,
            BlendFactor::One => wgpu::BlendFactor::One,
            BlendFactor::Src => wgpu::BlendFactor::Src,
            BlendFactor::OneMinusSrc => wgpu::BlendFactor::OneMinusSrc,
            BlendFactor::SrcAlpha => wgpu::BlendFactor::SrcAlpha,
            BlendFactor::OneMinusSrcAlpha => wgpu::BlendFactor::OneMinusSrcAlpha,
            BlendFactor::Dst => wgpu::BlendFactor::Dst,
            BlendFactor::Constant => wgpu::BlendFactor::Constant,
            BlendFactor::OneMinusConstant => wgpu::BlendFactor::OneMinusConstant,
        }
    }
}

impl IntoWgpu<wgpu::BlendOperation> for BlendOperation {
    fn into_wgpu(self) -> wgpu::BlendOperation {
        match self {
            BlendOperation::Add => wgpu::BlendOperation::Add,
            BlendOperation::Subtract => wgpu::BlendOperation::Subtract,
            BlendOperation::ReverseSubtract => wgpu::BlendOperation::ReverseSubtract,
            BlendOperation::Min => wgpu::BlendOperation::Min,
            BlendOperation::Max => wgpu::BlendOperation::Max,
        }
    }
}

impl IntoWgpu<wgpu::BlendComponent> for BlendComponentDescriptor {
    fn into_wgpu(self) -> wgpu::BlendComponent {
        wgpu::BlendComponent {
            src_factor: self.src_factor.into_wgpu(),
            dst_factor: self.dst_factor.into_wgpu(),
            operation: self.operation.into_wgpu(),
        }
    }
}

impl IntoWgpu<wgpu::BlendState> for BlendStateDescriptor {
    fn into_wgpu(self) -> wgpu::BlendState {
        wgpu::BlendState {
            color: self.color.into_wgpu(),
            alpha: self.alpha.into_wgpu(),
        }
    }
}

// --- Render pass ---

impl IntoWgpu<wgpu::Color> for LinearRgba {
    fn into_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: self.r as f64,
            g: self.g as f64,
            b: self.b as f64,
            a: self.a as f64,
        }
    }
}

impl IntoWgpu<wgpu::StoreOp> for StoreOp {
    fn into_wgpu(self) -> wgpu::StoreOp {
        match self {
            StoreOp::Store => wgpu::StoreOp::Store,
            StoreOp::Discard => wgpu::StoreOp::Discard,
        }
    }
}

impl IntoWgpu<wgpu::Operations<wgpu::Color>> for Operations<LinearRgba> {
    fn into_wgpu(self) -> wgpu::Operations<wgpu::Color> {
        let load = match self.load {
            LoadOp::Clear(color) => wgpu::LoadOp::Clear(color.into_wgpu()),
            LoadOp::Load => wgpu::LoadOp::Load,
        };
        wgpu::Operations {
            load,
            store: self.store.into_wgpu(),
        }
    }
}

impl IntoWgpu<wgpu::Operations<f32>> for Operations<f32> {
    fn into_wgpu(self) -> wgpu::Operations<f32> {
        let load = match self.load {
            LoadOp::Clear(depth) => wgpu::LoadOp::Clear(depth),
            LoadOp::Load => wgpu::LoadOp::Load,
        };
        wgpu::Operations {
            load,
            store: self.store.into_wgpu(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_format_round_trip_for_surface_formats() {
        for format in [
            TextureFormat::Rgba8UnormSrgb,
            TextureFormat::Bgra8UnormSrgb,
            TextureFormat::Bgra8Unorm,
            TextureFormat::Depth32Float,
        ] {
            assert_eq!(from_wgpu_texture_format(format.into_wgpu()), Some(format));
        }
        assert_eq!(
            from_wgpu_texture_format(wgpu::TextureFormat::Rgba16Float),
            None
        );
    }

    #[test]
    fn test_buffer_usage_flags_combine() {
        let usage: wgpu::BufferUsages = (BufferUsage::UNIFORM | BufferUsage::COPY_DST).into_wgpu();
        assert_eq!(
            usage,
            wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST
        );
    }

    #[test]
    fn test_shader_stage_flags_conversion() {
        let stages: wgpu::ShaderStages = ShaderStageFlags::VERTEX_FRAGMENT.into_wgpu();
        assert_eq!(stages, wgpu::ShaderStages::VERTEX_FRAGMENT);
        let fragment: wgpu::ShaderStages = ShaderStageFlags::FRAGMENT.into_wgpu();
        assert_eq!(fragment, wgpu::ShaderStages::FRAGMENT);
    }

    #[test]
    fn test_constant_transparency_blend_conversion() {
        let blend: wgpu::BlendState = BlendStateDescriptor::CONSTANT_TRANSPARENCY.into_wgpu();
        assert_eq!(blend.color.src_factor, wgpu::BlendFactor::Src);
        assert_eq!(blend.color.dst_factor, wgpu::BlendFactor::Constant);
        assert_eq!(blend.alpha, wgpu::BlendComponent::REPLACE);
    }

    #[test]
    fn test_clear_operations_conversion() {
        let ops = Operations {
            load: LoadOp::Clear(LinearRgba::new(0.025, 0.025, 0.095, 1.0)),
            store: StoreOp::Store,
        };
        let converted: wgpu::Operations<wgpu::Color> = ops.into_wgpu();
        let wgpu::LoadOp::Clear(color) = converted.load else {
            panic!("expected a clear");
        };
        assert!((color.b - 0.095).abs() < 1e-6);
        assert_eq!(color.a, 1.0);
        assert_eq!(converted.store, wgpu::StoreOp::Store);
    }

    #[test]
    fn test_cull_mode_conversion() {
        let back: wgpu::Face = CullMode::Back.into_wgpu();
        assert_eq!(back, wgpu::Face::Back);
    }
}
