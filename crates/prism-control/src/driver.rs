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

//! The update step: advances time, animates objects and routes input to the
//! menu or the scene controller.

use crate::controller::{ControlSettings, SceneController};
use crate::hud::{menu_overlay, scene_overlay, KeyIndicators};
use crate::menu::{MainMenu, MenuAction};
use crate::mode::VisualMode;
use crate::rig::CameraRig;
use prism_core::math::{Mat4, Vec2, Vec3, FRAC_PI_2};
use prism_core::platform::InputSnapshot;
use prism_data::overlay::OverlayFrame;
use prism_data::scene::{Entity, Transform};

/// Speed at which the skybox drifts on each axis, in radians per second.
pub const SKYBOX_SPIN_SPEED: f32 = 0.1;

/// Scale of the skybox cube around the camera.
pub const SKYBOX_SCALE: f32 = 1000.0;

/// Where the terrain is parked, away from the rest of the scene.
pub const TERRAIN_POSITION: Vec3 = Vec3::new(666.0, 666.0, 666.0);

/// Which half of the application is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPhase {
    /// The start menu, with the rotating donut.
    #[default]
    Menu,
    /// The showcase scene.
    Scene,
}

/// Side effects the platform layer must carry out after an update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameRequest {
    /// Move the cursor to this window position.
    WarpCursor(Vec2),
    /// Close the application.
    Quit,
    /// Open the tutorial video with the platform's default player.
    PlayVideo,
}

/// World matrices of the built-in primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimitiveTransforms {
    /// The three cubes: large centre cube, orbiting cube, small moon cube.
    pub cubes: [Mat4; 3],
    /// The pyramid, attached to the orbiting cube.
    pub pyramid: Mat4,
}

impl PrimitiveTransforms {
    /// Computes the primitive hierarchy for an elapsed angle.
    pub fn at(angle: f32, rotation_enabled: bool) -> Self {
        let ry = Mat4::from_rotation_y;
        let rx = Mat4::from_rotation_x;
        let t = Mat4::from_translation;
        let s = |v: f32| Mat4::from_scale(Vec3::splat(v));

        let (world, orbit, moon) = if rotation_enabled {
            let orbit = ry(-angle) * t(Vec3::new(6.0, 0.0, 2.0)) * ry(-angle);
            let moon = orbit * s(0.45) * ry(-angle) * t(Vec3::new(8.0, 0.0, 2.0)) * rx(-angle) * ry(-angle);
            (ry(angle) * s(2.0), orbit, moon)
        } else {
            let orbit = t(Vec3::new(6.0, 0.0, 2.0));
            (s(2.0), orbit, orbit * s(0.45) * t(Vec3::new(8.0, 0.0, 2.0)))
        };

        Self {
            cubes: [world, orbit, moon],
            pyramid: orbit * t(Vec3::new(10.0, 0.0, 2.0)),
        }
    }
}

impl Default for PrimitiveTransforms {
    fn default() -> Self {
        Self::at(0.0, false)
    }
}

/// Everything the update step owns and the render step reads.
#[derive(Debug, Clone)]
pub struct FrameState {
    /// Menu or scene.
    pub phase: ExecutionPhase,
    /// Render toggles.
    pub visual: VisualMode,
    /// The debug camera and the nine presets.
    pub rig: CameraRig,
    /// Main menu cursor.
    pub menu: MainMenu,
    /// Movement key indicators shown by the HUD.
    pub indicators: KeyIndicators,
    /// Scene-graph entities, animated in place.
    pub entities: Vec<Entity>,
    /// Built-in primitive matrices.
    pub primitives: PrimitiveTransforms,
    /// The skybox, centred on the debug camera.
    pub skybox: Transform,
    /// The rotating menu object.
    pub menu_object: Transform,
    /// World matrix of the terrain.
    pub terrain_world: Mat4,
    /// Elapsed animation angle, in radians.
    pub angle: f32,
    /// Seconds since startup.
    pub time_running: f32,
    /// Cursor position from the latest snapshot.
    pub cursor: Vec2,
}

impl FrameState {
    /// Creates the startup state: main menu, canonical modes.
    pub fn new(rig: CameraRig, entities: Vec<Entity>) -> Self {
        Self {
            phase: ExecutionPhase::Menu,
            visual: VisualMode::CANONICAL,
            rig,
            menu: MainMenu::default(),
            indicators: KeyIndicators::default(),
            entities,
            primitives: PrimitiveTransforms::default(),
            skybox: Transform::from_position_scale(Vec3::ZERO, SKYBOX_SCALE),
            menu_object: Transform::from_position_scale(Vec3::new(0.0, 1.0, -11.0), 1.45),
            terrain_world: Mat4::from_translation(TERRAIN_POSITION),
            angle: 0.0,
            time_running: 0.0,
            cursor: Vec2::ZERO,
        }
    }

    /// Returns `true` while the scene is running.
    pub fn in_scene(&self) -> bool {
        self.phase == ExecutionPhase::Scene
    }
}

impl Default for FrameState {
    fn default() -> Self {
        Self::new(CameraRig::default(), Vec::new())
    }
}

/// Drives [`FrameState`] one update at a time.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    state: FrameState,
    controller: SceneController,
    title: String,
}

impl FrameDriver {
    /// Creates a driver in the main menu.
    pub fn new(state: FrameState, controls: ControlSettings, title: impl Into<String>) -> Self {
        Self {
            state,
            controller: SceneController::new(controls),
            title: title.into(),
        }
    }

    /// The current state.
    pub fn state(&self) -> &FrameState {
        &self.state
    }

    /// Mutable access to the current state.
    pub fn state_mut(&mut self) -> &mut FrameState {
        &mut self.state
    }

    /// Propagates a surface resize to the cameras.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.state.rig.set_aspect_ratio(width, height);
        }
    }

    /// Advances the state by `dt` seconds using one input snapshot.
    pub fn update(&mut self, input: &InputSnapshot, dt: f32) -> Vec<FrameRequest> {
        let mut requests = Vec::new();
        let state = &mut self.state;

        state.angle += dt;
        state.time_running += dt;
        state.cursor = input.cursor;

        let angle = state.angle;
        state.menu_object.rotation = Vec3::new(FRAC_PI_2, -angle, -angle);

        state.skybox.position = state.rig.debug_camera().position;
        state.skybox.rotation += Vec3::splat(SKYBOX_SPIN_SPEED * dt);
        state.skybox.scale = Vec3::splat(SKYBOX_SCALE);

        state.terrain_world = Mat4::from_translation(TERRAIN_POSITION);

        match state.phase {
            ExecutionPhase::Scene => {
                self.controller.handle_toggles(state, input);

                let rotate = state.visual.rotate;
                state.primitives = PrimitiveTransforms::at(angle, rotate);
                for entity in &mut state.entities {
                    if let Some(rotation) = entity.animation.rotation_at(angle, rotate) {
                        entity.transform.rotation = rotation;
                    }
                }

                let outcome = self.controller.handle_navigation(state, input, dt);
                if outcome.enter_menu {
                    log::info!("Returning to the main menu");
                    state.phase = ExecutionPhase::Menu;
                }
                if let Some(anchor) = outcome.warp_cursor {
                    requests.push(FrameRequest::WarpCursor(anchor));
                }
            }
            ExecutionPhase::Menu => match state.menu.handle_input(input) {
                Some(MenuAction::Start) => {
                    log::info!("Entering the scene");
                    state.visual.reset();
                    state.phase = ExecutionPhase::Scene;
                }
                Some(MenuAction::Exit) => requests.push(FrameRequest::Quit),
                Some(MenuAction::PlayVideo) => requests.push(FrameRequest::PlayVideo),
                None => {}
            },
        }

        state.rig.sync_debug_to_active();
        state.rig.refresh_eye_position();
        requests
    }

    /// Overlay content for the current state, empty when the HUD is hidden.
    pub fn overlay(&self) -> OverlayFrame {
        match self.state.phase {
            ExecutionPhase::Menu => menu_overlay(&self.state.menu, &self.title),
            ExecutionPhase::Scene if self.state.visual.text_overlay => {
                scene_overlay(&self.state, self.state.cursor)
            }
            ExecutionPhase::Scene => OverlayFrame::default(),
        }
    }

    /// Called once the frame has been presented.
    pub fn finish_frame(&mut self) {
        if self.state.in_scene() && self.state.visual.text_overlay {
            self.state.indicators.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use prism_core::platform::Key;

    fn driver() -> FrameDriver {
        FrameDriver::new(FrameState::default(), ControlSettings::default(), "Prism")
    }

    #[test]
    fn test_static_primitives_when_rotation_off() {
        let p = PrimitiveTransforms::at(1.3, false);
        assert_eq!(p.cubes[0], Mat4::from_scale(Vec3::splat(2.0)));
        assert_eq!(p.cubes[1].translation(), Vec3::new(6.0, 0.0, 2.0));
        assert_eq!(p.pyramid.translation(), Vec3::new(16.0, 0.0, 4.0));
    }

    #[test]
    fn test_orbit_cube_moves_when_rotation_on() {
        let still = PrimitiveTransforms::at(0.0, true);
        let moved = PrimitiveTransforms::at(1.0, true);
        assert_relative_eq!(still.cubes[1].translation().x, 6.0, epsilon = 1e-5);
        assert!((moved.cubes[1].translation() - still.cubes[1].translation()).length() > 1.0);
    }

    #[test]
    fn test_update_advances_time_and_skybox() {
        let mut d = driver();
        d.update(&InputSnapshot::default(), 0.5);
        let s = d.state();
        assert_relative_eq!(s.angle, 0.5);
        assert_relative_eq!(s.time_running, 0.5);
        assert_relative_eq!(s.skybox.rotation.x, 0.05);
        assert_eq!(s.skybox.position, s.rig.debug_camera().position);
        assert_relative_eq!(s.menu_object.rotation.y, -0.5);
    }

    #[test]
    fn test_menu_start_enters_scene_and_escape_returns() {
        let mut d = driver();
        assert_eq!(d.state().phase, ExecutionPhase::Menu);
        d.update(&InputSnapshot::with_presses(&[Key::Enter]), 0.016);
        assert_eq!(d.state().phase, ExecutionPhase::Scene);
        d.update(&InputSnapshot::with_presses(&[Key::Escape]), 0.016);
        assert_eq!(d.state().phase, ExecutionPhase::Menu);
    }

    #[test]
    fn test_menu_exit_requests_quit() {
        let mut d = driver();
        let requests = d.update(&InputSnapshot::with_presses(&[Key::Escape]), 0.016);
        assert_eq!(requests, vec![FrameRequest::Quit]);
    }

    #[test]
    fn test_indicators_reset_only_after_drawn_overlay() {
        let mut d = driver();
        d.state_mut().phase = ExecutionPhase::Scene;
        d.update(&InputSnapshot::with_held(&[Key::W]), 0.016);
        assert!(d.state().indicators.is_down(crate::hud::IndicatorKey::W));

        d.state_mut().visual.text_overlay = false;
        d.finish_frame();
        assert!(d.state().indicators.is_down(crate::hud::IndicatorKey::W));
        assert!(d.overlay().is_empty());

        d.state_mut().visual.text_overlay = true;
        d.finish_frame();
        assert!(!d.state().indicators.is_down(crate::hud::IndicatorKey::W));
    }
}
