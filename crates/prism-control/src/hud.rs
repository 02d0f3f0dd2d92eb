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

//! Builds the overlay content for the scene HUD and the main menu.

use crate::driver::FrameState;
use crate::menu::{MainMenu, MenuSelection};
use crate::presets::banner_number;
use prism_core::math::{LinearRgba, Vec2};
use prism_data::overlay::{OverlayBox, OverlayFrame, OverlayText, GHOST_WHITE, PURPLE};

/// Side length of a key indicator box, in layout pixels.
pub const KEY_BOX_SIZE: f32 = 100.0;

/// Movement keys that have an on-screen indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum IndicatorKey {
    W,
    A,
    S,
    D,
    Q,
    E,
    Up,
    Down,
    Left,
    Right,
}

impl IndicatorKey {
    /// Every indicator, in drawing order.
    pub const ALL: [IndicatorKey; 10] = [
        Self::W,
        Self::A,
        Self::S,
        Self::D,
        Self::Q,
        Self::E,
        Self::Up,
        Self::Left,
        Self::Down,
        Self::Right,
    ];

    /// Label drawn on the box.
    pub const fn label(self) -> &'static str {
        match self {
            Self::W => "W",
            Self::A => "A",
            Self::S => "S",
            Self::D => "D",
            Self::Q => "Q",
            Self::E => "E",
            Self::Up => "Up",
            Self::Down => "Down",
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }

    /// Top-left corner of the box in layout space.
    pub const fn position(self) -> Vec2 {
        match self {
            Self::Q => Vec2::new(1190.0, 790.0),
            Self::W => Vec2::new(1300.0, 790.0),
            Self::E => Vec2::new(1410.0, 790.0),
            Self::A => Vec2::new(1190.0, 900.0),
            Self::S => Vec2::new(1300.0, 900.0),
            Self::D => Vec2::new(1410.0, 900.0),
            Self::Up => Vec2::new(1650.0, 790.0),
            Self::Left => Vec2::new(1540.0, 900.0),
            Self::Down => Vec2::new(1650.0, 900.0),
            Self::Right => Vec2::new(1760.0, 900.0),
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Up/down state of the movement key indicators.
///
/// Indicators are latched down by the controller and released only after the
/// overlay that shows them has been drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyIndicators {
    down: [bool; 10],
}

impl KeyIndicators {
    /// Marks a key as down.
    pub fn press(&mut self, key: IndicatorKey) {
        self.down[key.index()] = true;
    }

    /// Returns `true` if the key is shown as down.
    pub fn is_down(&self, key: IndicatorKey) -> bool {
        self.down[key.index()]
    }

    /// Releases every indicator.
    pub fn reset(&mut self) {
        self.down = [false; 10];
    }
}

const CAMERA_NAMES: [&str; 10] = [
    "Numpad 0 - Debug Camera",
    "Numpad 1 - Plane Interior",
    "Numpad 2 - Plane Exterior",
    "Numpad 3 - Fish Tank Interior",
    "Numpad 4 - Gooch Shading Room",
    "Numpad 5 - Milk (Fake Shadow-mapping)",
    "Numpad 6 - Well",
    "Numpad 7 - Glassware (Transparency)",
    "Numpad 8 - Car (Pixelation Shader)",
    "Numpad 9 - Terrain Generation (Broken)",
];

fn status_line(label: &str, on: bool, x: f32, y: f32) -> OverlayText {
    let (state, color) = if on {
        ("ON", LinearRgba::GREEN)
    } else {
        ("OFF", LinearRgba::RED)
    };
    OverlayText::new(format!("{label}: {state}"), x, y, color)
}

/// Builds the scene HUD for the current state.
///
/// `cursor` is the cursor position reported with the latest input snapshot.
pub fn scene_overlay(state: &FrameState, cursor: Vec2) -> OverlayFrame {
    let visual = &state.visual;
    let mut frame = OverlayFrame::default();

    frame.push_text(status_line("F1 - Textures", visual.texture_on, 0.0, 0.0));
    frame.push_text(status_line("F2 - Lighting", visual.light_on, 500.0, 0.0));
    frame.push_text(status_line("F3 - Fill Mode", visual.fill(), 1000.0, 0.0));
    frame.push_text(status_line("F4 - Scene 1 Plane Rotation", visual.rotate, 1400.0, 0.0));
    frame.push_text(OverlayText::new("F5 - UI Rendering: ON", 0.0, 200.0, LinearRgba::GREEN));
    frame.push_text(OverlayText::new("ESC - Main Menu", 0.0, 250.0, LinearRgba::RED));

    frame.push_text(OverlayText::new("R - Reset Camera", 1515.0, 300.0, PURPLE));
    // Culling is reported as "ON" while back faces are being culled.
    frame.push_text(status_line("F6 - Back Face Culling Mode", !visual.no_cull(), 1515.0, 350.0));
    frame.push_text(status_line("F7 - Wave Filter Y", visual.wave_y, 1515.0, 400.0));
    frame.push_text(status_line("F8 - Wave Filter X", visual.wave_x, 1515.0, 450.0));
    frame.push_text(status_line("F9 - Mouse Features", visual.mouse_look, 1515.0, 500.0));
    frame.push_text(status_line("TAB - Pixelation Mode", visual.pixelate, 1515.0, 550.0));
    frame.push_text(status_line("F11 - Gooch Shading", visual.gooch(), 1515.0, 600.0));

    for (slot, name) in CAMERA_NAMES.iter().enumerate() {
        let y = 400.0 + 50.0 * slot as f32;
        frame.push_text(OverlayText::new(*name, 0.0, y, LinearRgba::WHITE));
    }

    let rig = &state.rig;
    if rig.is_debug_active() {
        frame.push_text(OverlayText::new("Debug Camera Active", 0.0, 300.0, PURPLE));

        let camera = rig.debug_camera();
        let p = camera.position;
        let r = camera.rotation;
        frame.push_text(OverlayText::new(format!("Mouse X: {}", cursor.x as i32), 0.0, 920.0, PURPLE));
        frame.push_text(OverlayText::new(format!("Mouse Y: {}", cursor.y as i32), 0.0, 940.0, PURPLE));
        frame.push_text(OverlayText::new(
            format!("X POS: {:.6} Y POS: {:.6} Z POS: {:.6}", p.x, p.y, p.z),
            0.0,
            960.0,
            PURPLE,
        ));
        frame.push_text(OverlayText::new(
            format!("X ROT: {:.6} Y ROT: {:.6}", r.x, r.y),
            0.0,
            980.0,
            PURPLE,
        ));
        frame.push_text(OverlayText::new(
            format!("Time Running: {:.6}", state.time_running),
            0.0,
            1010.0,
            PURPLE,
        ));

        for key in IndicatorKey::ALL {
            let color = if state.indicators.is_down(key) {
                LinearRgba::GREEN
            } else {
                LinearRgba::WHITE
            };
            frame.boxes.push(OverlayBox {
                position: key.position(),
                size: Vec2::new(KEY_BOX_SIZE, KEY_BOX_SIZE),
                color,
                label: Some(key.label().to_owned()),
            });
        }
    } else {
        let number = banner_number(rig.active_slot());
        frame.push_text(OverlayText::new(
            format!("Camera {number} Active"),
            0.0,
            300.0,
            LinearRgba::WHITE,
        ));
    }

    frame
}

/// Builds the main menu overlay.
pub fn menu_overlay(menu: &MainMenu, title: &str) -> OverlayFrame {
    let mut frame = OverlayFrame::default();
    frame.push_text(OverlayText::new(title, 0.0, 0.0, GHOST_WHITE));
    frame.push_text(OverlayText::new(
        "Arrow Keys to Select / Enter to Confirm",
        0.0,
        50.0,
        LinearRgba::WHITE,
    ));
    for (i, option) in MenuSelection::ALL.iter().enumerate() {
        let color = if *option == menu.selection() {
            LinearRgba::GREEN
        } else {
            LinearRgba::RED
        };
        frame.push_text(OverlayText::new(option.label(), 100.0 * i as f32, 100.0, color));
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicators_latch_until_reset() {
        let mut keys = KeyIndicators::default();
        keys.press(IndicatorKey::W);
        keys.press(IndicatorKey::Left);
        assert!(keys.is_down(IndicatorKey::W));
        assert!(keys.is_down(IndicatorKey::Left));
        assert!(!keys.is_down(IndicatorKey::S));
        keys.reset();
        assert!(IndicatorKey::ALL.iter().all(|k| !keys.is_down(*k)));
    }

    #[test]
    fn test_menu_overlay_highlights_selection() {
        let mut menu = MainMenu::default();
        menu.move_right();
        let frame = menu_overlay(&menu, "Prism");
        assert_eq!(frame.find_text("Exit").map(|t| t.color), Some(LinearRgba::GREEN));
        assert_eq!(frame.find_text("Start").map(|t| t.color), Some(LinearRgba::RED));
        assert_eq!(frame.texts[0].color, GHOST_WHITE);
    }

    #[test]
    fn test_scene_overlay_reports_flags() {
        let state = FrameState::default();
        let frame = scene_overlay(&state, Vec2::new(12.7, 3.0));
        let fill = frame.find_text("F3 - Fill Mode").map(|t| (t.text.as_str(), t.color));
        assert_eq!(fill, Some(("F3 - Fill Mode: ON", LinearRgba::GREEN)));
        let cull = frame.find_text("F6").map(|t| t.text.as_str());
        assert_eq!(cull, Some("F6 - Back Face Culling Mode: ON"));
        assert_eq!(frame.find_text("Debug Camera Active").map(|t| t.color), Some(PURPLE));
        assert_eq!(frame.find_text("Mouse X").map(|t| t.text.as_str()), Some("Mouse X: 12"));
        assert_eq!(frame.boxes.len(), 10);
    }

    #[test]
    fn test_scene_overlay_preset_banner_uses_swapped_number() {
        let mut state = FrameState::default();
        state.rig.activate(2);
        let frame = scene_overlay(&state, Vec2::ZERO);
        assert!(frame.find_text("Camera 3 Active").is_some());
        assert!(frame.boxes.is_empty());
        assert!(frame.find_text("Time Running").is_none());
    }
}
