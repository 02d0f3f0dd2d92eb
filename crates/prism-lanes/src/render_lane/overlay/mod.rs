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

//! Turns an [`OverlayFrame`] into coloured screen-space triangles.

pub mod font;

use font::{glyph_runs, GLYPH_ADVANCE, GLYPH_HEIGHT};
use prism_core::math::{LinearRgba, Vec2};
use prism_core::renderer::{BufferDescriptor, BufferId, BufferUsage, GraphicsDevice, ResourceError};
use prism_data::overlay::{OverlayFrame, OVERLAY_LAYOUT_SIZE};

/// Layout pixels per font pixel.
pub const GLYPH_SCALE: f32 = 2.0;

/// Vertex of the overlay pipeline: clip-space position and colour.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OverlayVertex {
    /// Position in normalized device coordinates.
    pub position: [f32; 2],
    /// RGBA colour.
    pub color: [f32; 4],
}

/// Width of `text` in layout pixels.
pub fn text_width(text: &str) -> f32 {
    let chars = text.chars().count() as f32;
    if chars == 0.0 {
        return 0.0;
    }
    (chars * GLYPH_ADVANCE as f32 - 1.0) * GLYPH_SCALE
}

/// Height of a line of text in layout pixels.
pub fn text_height() -> f32 {
    GLYPH_HEIGHT as f32 * GLYPH_SCALE
}

fn to_ndc(p: Vec2) -> [f32; 2] {
    [
        p.x / OVERLAY_LAYOUT_SIZE.x * 2.0 - 1.0,
        1.0 - p.y / OVERLAY_LAYOUT_SIZE.y * 2.0,
    ]
}

fn push_rect(out: &mut Vec<OverlayVertex>, min: Vec2, size: Vec2, color: LinearRgba) {
    let color = color.to_array();
    let max = min + size;
    let tl = to_ndc(min);
    let tr = to_ndc(Vec2::new(max.x, min.y));
    let bl = to_ndc(Vec2::new(min.x, max.y));
    let br = to_ndc(max);
    for position in [tl, bl, br, tl, br, tr] {
        out.push(OverlayVertex { position, color });
    }
}

fn push_text(out: &mut Vec<OverlayVertex>, text: &str, origin: Vec2, color: LinearRgba) {
    for (i, c) in text.chars().enumerate() {
        let glyph_x = origin.x + (i as u32 * GLYPH_ADVANCE) as f32 * GLYPH_SCALE;
        for run in glyph_runs(c) {
            let min = Vec2::new(
                glyph_x + run.column as f32 * GLYPH_SCALE,
                origin.y + run.row as f32 * GLYPH_SCALE,
            );
            let size = Vec2::new(GLYPH_SCALE, run.length as f32 * GLYPH_SCALE);
            push_rect(out, min, size, color);
        }
    }
}

/// Appends the triangles of `frame` to `out`: boxes first, then their
/// labels, then the text lines.
pub fn tessellate(frame: &OverlayFrame, out: &mut Vec<OverlayVertex>) {
    for b in &frame.boxes {
        push_rect(out, b.position, b.size, b.color);
    }
    for b in &frame.boxes {
        if let Some(label) = &b.label {
            let offset = Vec2::new(
                (b.size.x - text_width(label)) * 0.5,
                (b.size.y - text_height()) * 0.5,
            );
            push_text(out, label, b.position + offset, LinearRgba::BLACK);
        }
    }
    for t in &frame.texts {
        push_text(out, &t.text, t.position, t.color);
    }
}

/// The overlay vertex stream of a frame, in a buffer that grows as needed.
#[derive(Debug, Default)]
pub struct OverlayBatch {
    buffer: Option<BufferId>,
    capacity: u64,
    vertices: Vec<OverlayVertex>,
}

impl OverlayBatch {
    /// Tessellates and uploads `frame`. Returns the buffer and vertex count
    /// to draw, or `None` when there is nothing to draw.
    pub fn prepare(
        &mut self,
        device: &dyn GraphicsDevice,
        frame: &OverlayFrame,
    ) -> Result<Option<(BufferId, u32)>, ResourceError> {
        self.vertices.clear();
        tessellate(frame, &mut self.vertices);
        if self.vertices.is_empty() {
            return Ok(None);
        }

        let bytes: &[u8] = bytemuck::cast_slice(&self.vertices);
        let needed = bytes.len() as u64;
        let buffer = match self.buffer {
            Some(buffer) if needed <= self.capacity => buffer,
            previous => {
                let capacity = needed.next_power_of_two();
                let buffer = device.create_buffer(&BufferDescriptor {
                    label: Some("Overlay Vertices".into()),
                    size: capacity,
                    usage: BufferUsage::VERTEX | BufferUsage::COPY_DST,
                })?;
                if let Some(old) = previous {
                    device.destroy_buffer(old)?;
                }
                log::debug!("Overlay vertex buffer grown to {capacity} bytes");
                self.buffer = Some(buffer);
                self.capacity = capacity;
                buffer
            }
        };
        device.write_buffer(buffer, 0, bytes)?;
        Ok(Some((buffer, self.vertices.len() as u32)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_data::overlay::{OverlayBox, OverlayText};

    #[test]
    fn test_layout_corners_map_to_ndc_corners() {
        assert_eq!(to_ndc(Vec2::ZERO), [-1.0, 1.0]);
        assert_eq!(to_ndc(OVERLAY_LAYOUT_SIZE), [1.0, -1.0]);
    }

    #[test]
    fn test_box_is_two_triangles() {
        let frame = OverlayFrame {
            boxes: vec![OverlayBox {
                position: Vec2::new(960.0, 540.0),
                size: Vec2::new(96.0, 54.0),
                color: LinearRgba::GREEN,
                label: None,
            }],
            texts: Vec::new(),
        };
        let mut out = Vec::new();
        tessellate(&frame, &mut out);
        assert_eq!(out.len(), 6);
        assert_eq!(out[0].position, [0.0, 0.0]);
        assert_eq!(out[0].color, LinearRgba::GREEN.to_array());
    }

    #[test]
    fn test_text_emits_one_quad_per_run() {
        let mut frame = OverlayFrame::default();
        frame.push_text(OverlayText::new("||", 0.0, 0.0, LinearRgba::RED));
        let mut out = Vec::new();
        tessellate(&frame, &mut out);
        assert_eq!(out.len(), 12);
        assert!(out.iter().all(|v| v.color == LinearRgba::RED.to_array()));
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width(""), 0.0);
        assert_eq!(text_width("W"), 10.0);
        assert_eq!(text_width("WW"), 22.0);
    }
}
