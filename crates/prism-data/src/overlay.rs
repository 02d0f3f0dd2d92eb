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

//! Screen-space overlay content: text lines and coloured boxes.
//!
//! Positions are expressed in a fixed 1920x1080 layout space with the origin
//! at the top-left corner; the renderer stretches that space over the surface.

use prism_core::math::{LinearRgba, Vec2};

/// Width and height of the overlay layout space.
pub const OVERLAY_LAYOUT_SIZE: Vec2 = Vec2::new(1920.0, 1080.0);

/// Purple used for banners and debug readouts.
pub const PURPLE: LinearRgba = LinearRgba::rgb(0.5, 0.0, 0.5);

/// Near-white used for the menu title.
pub const GHOST_WHITE: LinearRgba = LinearRgba::rgb(0.973, 0.973, 1.0);

/// A line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayText {
    /// The text, drawn with the built-in glyph set.
    pub text: String,
    /// Top-left corner in layout space.
    pub position: Vec2,
    /// Glyph colour.
    pub color: LinearRgba,
}

impl OverlayText {
    /// Creates a text item.
    pub fn new(text: impl Into<String>, x: f32, y: f32, color: LinearRgba) -> Self {
        Self {
            text: text.into(),
            position: Vec2::new(x, y),
            color,
        }
    }
}

/// A filled rectangle with an optional centred label.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayBox {
    /// Top-left corner in layout space.
    pub position: Vec2,
    /// Width and height in layout space.
    pub size: Vec2,
    /// Fill colour.
    pub color: LinearRgba,
    /// Label drawn in black on top of the box.
    pub label: Option<String>,
}

/// Everything the overlay pass draws in one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayFrame {
    /// Coloured boxes, drawn first.
    pub boxes: Vec<OverlayBox>,
    /// Text lines, drawn over the boxes.
    pub texts: Vec<OverlayText>,
}

impl OverlayFrame {
    /// Returns `true` if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty() && self.texts.is_empty()
    }

    /// Appends a text line.
    pub fn push_text(&mut self, text: OverlayText) {
        self.texts.push(text);
    }

    /// Returns the first text item whose content starts with `prefix`.
    pub fn find_text(&self, prefix: &str) -> Option<&OverlayText> {
        self.texts.iter().find(|t| t.text.starts_with(prefix))
    }
}
