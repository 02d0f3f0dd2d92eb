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

//! Maps one frame of scene input onto the visual modes and the camera rig.

use crate::driver::FrameState;
use crate::hud::IndicatorKey;
use crate::presets::{preset_bundle, selected_slot};
use prism_core::math::{Vec2, Vec3};
use prism_core::platform::{InputSnapshot, Key};
use prism_data::config::EngineSettings;

/// Tuning of the debug camera controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSettings {
    /// Translation speed, in units per second.
    pub camera_speed: f32,
    /// Arrow-key rotation speed, in radians per second.
    pub rotation_speed: f32,
    /// Cursor offsets at or below this many pixels are ignored.
    pub dead_zone: f32,
    /// Where mouse-look measures offsets from and warps the cursor back to.
    pub anchor: Vec2,
    /// Radians per pixel per second of mouse-look.
    pub sensitivity: f32,
    /// Distance per wheel event.
    pub wheel_step: f32,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self::from(&EngineSettings::default())
    }
}

impl From<&EngineSettings> for ControlSettings {
    fn from(s: &EngineSettings) -> Self {
        Self {
            camera_speed: s.camera_speed,
            rotation_speed: s.rotation_speed,
            dead_zone: s.mouse_dead_zone,
            anchor: Vec2::new(s.mouse_anchor[0], s.mouse_anchor[1]),
            sensitivity: s.mouse_sensitivity,
            wheel_step: s.wheel_step,
        }
    }
}

/// What the scene input asked for beyond state mutation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneOutcome {
    /// Escape was pressed: go back to the main menu.
    pub enter_menu: bool,
    /// Mouse-look consumed a cursor offset: warp the cursor here.
    pub warp_cursor: Option<Vec2>,
}

/// The input-to-state controller of the scene phase.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneController {
    settings: ControlSettings,
}

impl SceneController {
    /// Creates a controller with the given tuning.
    pub fn new(settings: ControlSettings) -> Self {
        Self { settings }
    }

    /// The active tuning.
    pub fn settings(&self) -> &ControlSettings {
        &self.settings
    }

    /// Applies the edge-triggered feature toggles (function keys and Tab).
    pub fn handle_toggles(&self, state: &mut FrameState, input: &InputSnapshot) {
        let visual = &mut state.visual;
        if input.just_pressed(Key::F3) {
            visual.toggle_fill();
        }
        if input.just_pressed(Key::F6) {
            visual.toggle_no_cull();
        }
        if input.just_pressed(Key::F7) {
            visual.wave_y = !visual.wave_y;
        }
        if input.just_pressed(Key::F8) {
            visual.wave_x = !visual.wave_x;
        }
        if input.just_pressed(Key::Tab) {
            visual.pixelate = !visual.pixelate;
        }
        if input.just_pressed(Key::F11) {
            visual.toggle_gooch();
        }
        if input.just_pressed(Key::F2) {
            visual.light_on = !visual.light_on;
        }
        if input.just_pressed(Key::F1) {
            visual.texture_on = !visual.texture_on;
        }
        if input.just_pressed(Key::F5) {
            visual.text_overlay = !visual.text_overlay;
        }
        if input.just_pressed(Key::F4) {
            visual.rotate = !visual.rotate;
            visual.force_fill();
            state.rig.reset_debug_camera();
        }
    }

    /// Handles Escape, the camera keys and, on the debug slot, free movement.
    pub fn handle_navigation(&self, state: &mut FrameState, input: &InputSnapshot, dt: f32) -> SceneOutcome {
        let mut outcome = SceneOutcome::default();

        if input.just_pressed(Key::Escape) {
            state.visual.reset();
            state.rig.reset();
            outcome.enter_menu = true;
            return outcome;
        }

        if let Some(slot) = selected_slot(input) {
            state.rig.activate(slot);
            if let Some(bundle) = preset_bundle(slot) {
                state.visual.apply_preset(bundle);
            }
            log::debug!("Camera slot {slot} active");
        }

        if input.just_pressed(Key::R) {
            state.visual.reset();
            state.rig.reset();
        }

        if state.rig.is_debug_active() {
            outcome.warp_cursor = self.handle_debug_movement(state, input, dt);
        }
        outcome
    }

    fn handle_debug_movement(&self, state: &mut FrameState, input: &InputSnapshot, dt: f32) -> Option<Vec2> {
        let s = &self.settings;
        let step = s.camera_speed * dt;
        let turn = s.rotation_speed * dt;
        let camera = state.rig.debug_camera_mut();
        let indicators = &mut state.indicators;

        let moves = [
            (Key::W, IndicatorKey::W, camera.forward() * step),
            (Key::S, IndicatorKey::S, camera.back() * step),
            (Key::A, IndicatorKey::A, camera.left() * step),
            (Key::D, IndicatorKey::D, camera.right() * step),
            (Key::Q, IndicatorKey::Q, Vec3::Y * step),
            (Key::E, IndicatorKey::E, -Vec3::Y * step),
        ];
        for (key, indicator, delta) in moves {
            if input.is_down(key) {
                indicators.press(indicator);
                camera.add_to_position(delta);
            }
        }

        let turns = [
            (Key::ArrowUp, IndicatorKey::Up, Vec3::new(turn, 0.0, 0.0)),
            (Key::ArrowDown, IndicatorKey::Down, Vec3::new(-turn, 0.0, 0.0)),
            (Key::ArrowLeft, IndicatorKey::Left, Vec3::new(0.0, turn, 0.0)),
            (Key::ArrowRight, IndicatorKey::Right, Vec3::new(0.0, -turn, 0.0)),
        ];
        for (key, indicator, delta) in turns {
            if input.is_down(key) {
                indicators.press(indicator);
                camera.add_to_rotation(delta);
            }
        }

        if input.just_pressed(Key::F9) {
            state.visual.mouse_look = !state.visual.mouse_look;
        }
        if !state.visual.mouse_look {
            return None;
        }

        let mut warp = None;
        let offset = input.cursor - s.anchor;
        if offset.x.abs() > s.dead_zone || offset.y.abs() > s.dead_zone {
            let scale = s.sensitivity * dt;
            // Cursor right turns right (negative yaw), cursor down pitches down.
            camera.add_to_rotation(Vec3::new(-offset.y * scale, -offset.x * scale, 0.0));
            warp = Some(s.anchor);
        }

        if input.wheel > 0.0 {
            camera.add_to_position(camera.forward() * s.wheel_step);
        } else if input.wheel < 0.0 {
            camera.add_to_position(camera.back() * s.wheel_step);
        }
        warp
    }
}
