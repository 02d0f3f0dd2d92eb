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

//! Whole-frame scenarios driven through `FrameDriver::update`.

use approx::assert_relative_eq;
use prism_control::{
    ControlSettings, ExecutionPhase, FrameDriver, FrameRequest, FrameState, MenuSelection, VisualMode,
    PRESET_BUNDLES,
};
use prism_core::math::{Vec2, Vec3};
use prism_core::platform::{InputSnapshot, Key};

const DT: f32 = 1.0 / 60.0;

fn scene_driver() -> FrameDriver {
    let mut driver = FrameDriver::new(FrameState::default(), ControlSettings::default(), "Prism");
    driver.update(&InputSnapshot::with_presses(&[Key::Enter]), DT);
    assert_eq!(driver.state().phase, ExecutionPhase::Scene);
    driver
}

fn press(driver: &mut FrameDriver, keys: &[Key]) -> Vec<FrameRequest> {
    driver.update(&InputSnapshot::with_presses(keys), DT)
}

#[test]
fn test_preset_four_enables_gooch_room() {
    let mut driver = scene_driver();
    press(&mut driver, &[Key::Numpad4]);

    let state = driver.state();
    assert_eq!(state.rig.active_slot(), 4);
    assert!(state.visual.no_cull());
    assert!(!state.visual.fill());
    assert!(state.visual.gooch());
    assert!(!state.visual.light_on);
    assert!(!state.visual.texture_on);
    assert!(!state.visual.wave_x && !state.visual.wave_y && !state.visual.pixelate);
}

#[test]
fn test_escape_from_preset_restores_defaults() {
    let mut driver = scene_driver();
    let start = driver.state().rig.start_position();
    press(&mut driver, &[Key::Numpad4]);
    press(&mut driver, &[Key::Escape]);

    let state = driver.state();
    assert_eq!(state.phase, ExecutionPhase::Menu);
    assert_eq!(state.visual, VisualMode::CANONICAL);
    assert_eq!(state.rig.active_slot(), 0);
    assert_eq!(state.rig.debug_camera().position, start);
    assert_eq!(state.rig.debug_camera().rotation, Vec3::ZERO);
}

#[test]
fn test_menu_navigation_and_start() {
    let mut driver = FrameDriver::new(FrameState::default(), ControlSettings::default(), "Prism");
    assert_eq!(driver.state().menu.selection(), MenuSelection::Start);

    press(&mut driver, &[Key::ArrowRight]);
    press(&mut driver, &[Key::ArrowRight]);
    assert_eq!(driver.state().menu.selection(), MenuSelection::PlayVideo);
    press(&mut driver, &[Key::ArrowRight]);
    assert_eq!(driver.state().menu.selection(), MenuSelection::PlayVideo);

    let requests = press(&mut driver, &[Key::Enter]);
    assert_eq!(requests, vec![FrameRequest::PlayVideo]);
    assert_eq!(driver.state().phase, ExecutionPhase::Menu);

    press(&mut driver, &[Key::ArrowLeft]);
    press(&mut driver, &[Key::ArrowLeft]);
    press(&mut driver, &[Key::Enter]);
    let state = driver.state();
    assert_eq!(state.phase, ExecutionPhase::Scene);
    assert!(state.visual.light_on);
    assert!(state.visual.texture_on);
}

#[test]
fn test_every_preset_applies_its_bundle() {
    let digit_keys = [
        Key::Digit1,
        Key::Digit3,
        Key::Digit2,
        Key::Digit4,
        Key::Digit5,
        Key::Digit6,
        Key::Digit7,
        Key::Digit8,
        Key::Digit9,
    ];
    for (i, key) in digit_keys.iter().enumerate() {
        let slot = i + 1;
        let bundle = PRESET_BUNDLES[i];
        let mut driver = scene_driver();
        press(&mut driver, &[*key]);

        let visual = driver.state().visual;
        assert_eq!(driver.state().rig.active_slot(), slot, "key {key:?}");
        assert_eq!(visual.fill(), bundle.fill, "slot {slot}");
        assert_eq!(visual.no_cull(), bundle.no_cull, "slot {slot}");
        assert_eq!(visual.wave_y, bundle.wave_y, "slot {slot}");
        assert_eq!(visual.wave_x, bundle.wave_x, "slot {slot}");
        assert_eq!(visual.gooch(), bundle.gooch, "slot {slot}");
        assert_eq!(visual.pixelate, bundle.pixelate, "slot {slot}");

        assert!(visual.text_overlay, "slot {slot}");
        assert!(!visual.rotate, "slot {slot}");
        assert!(!visual.mouse_look, "slot {slot}");
        if !bundle.gooch {
            assert!(visual.light_on, "slot {slot}");
            assert!(visual.texture_on, "slot {slot}");
        }
    }
}

#[test]
fn test_presets_leave_unrelated_toggles_alone() {
    for key in [Key::Digit1, Key::Digit4, Key::Digit8] {
        let mut driver = scene_driver();
        press(&mut driver, &[Key::F5]);
        press(&mut driver, &[Key::F9]);
        press(&mut driver, &[key]);

        let visual = driver.state().visual;
        assert!(!visual.text_overlay, "key {key:?}");
        assert!(visual.mouse_look, "key {key:?}");
        assert!(!visual.rotate, "key {key:?}");
    }
}

#[test]
fn test_reset_and_escape_keep_mouse_look() {
    let mut driver = scene_driver();
    press(&mut driver, &[Key::F9]);
    assert!(driver.state().visual.mouse_look);

    press(&mut driver, &[Key::Tab]);
    press(&mut driver, &[Key::R]);
    let visual = driver.state().visual;
    assert!(visual.mouse_look);
    assert!(!visual.pixelate);

    press(&mut driver, &[Key::Escape]);
    assert_eq!(driver.state().phase, ExecutionPhase::Menu);
    press(&mut driver, &[Key::Enter]);
    assert!(driver.state().visual.mouse_look);
}

#[test]
fn test_leaving_gooch_preset_restores_lighting() {
    let mut driver = scene_driver();
    press(&mut driver, &[Key::Numpad4]);
    press(&mut driver, &[Key::Numpad5]);
    let visual = driver.state().visual;
    assert!(!visual.gooch());
    assert!(visual.light_on);
    assert!(visual.texture_on);
}

#[test]
fn test_non_gooch_preset_keeps_manual_lighting_choice() {
    let mut driver = scene_driver();
    press(&mut driver, &[Key::F2]);
    assert!(!driver.state().visual.light_on);
    press(&mut driver, &[Key::Numpad1]);
    assert!(!driver.state().visual.light_on);
}

#[test]
fn test_reset_is_idempotent() {
    let mut driver = scene_driver();
    press(&mut driver, &[Key::Numpad8]);
    press(&mut driver, &[Key::R]);
    let once = driver.state().clone();
    press(&mut driver, &[Key::R]);
    let twice = driver.state();
    assert_eq!(once.visual, twice.visual);
    assert_eq!(once.rig.active_slot(), twice.rig.active_slot());
    assert_eq!(once.rig.debug_camera().position, twice.rig.debug_camera().position);
    assert_eq!(twice.visual, VisualMode::CANONICAL);
}

#[test]
fn test_preset_pose_is_copied_then_debug_returns_from_there() {
    let mut driver = scene_driver();
    press(&mut driver, &[Key::Numpad6]);
    let preset_position = driver.state().rig.active_camera().position;
    assert_eq!(driver.state().rig.debug_camera().position, preset_position);

    press(&mut driver, &[Key::Numpad0]);
    assert!(driver.state().rig.is_debug_active());
    assert_eq!(driver.state().rig.debug_camera().position, preset_position);
}

#[test]
fn test_debug_camera_walks_forward() {
    let mut driver = scene_driver();
    let before = driver.state().rig.debug_camera().position;
    driver.update(&InputSnapshot::with_held(&[Key::W]), 0.5);
    let after = driver.state().rig.debug_camera().position;
    // Speed 20 for half a second along -Z.
    assert_relative_eq!(after.z, before.z - 10.0, epsilon = 1e-4);
    assert_relative_eq!(after.x, before.x, epsilon = 1e-4);
}

#[test]
fn test_movement_is_ignored_on_preset_cameras() {
    let mut driver = scene_driver();
    press(&mut driver, &[Key::Numpad1]);
    let before = driver.state().rig.debug_camera().position;
    driver.update(&InputSnapshot::with_held(&[Key::W, Key::Q]), 0.5);
    assert_eq!(driver.state().rig.debug_camera().position, before);
}

#[test]
fn test_mouse_look_warps_cursor_outside_dead_zone() {
    let mut driver = scene_driver();
    let anchor = Vec2::new(960.0, 540.0);
    let toggle = InputSnapshot {
        cursor: anchor,
        ..InputSnapshot::with_presses(&[Key::F9])
    };
    assert!(driver.update(&toggle, DT).is_empty());
    assert!(driver.state().visual.mouse_look);

    let inside = InputSnapshot {
        cursor: Vec2::new(980.0, 540.0),
        ..InputSnapshot::default()
    };
    assert!(driver.update(&inside, DT).is_empty());
    assert_eq!(driver.state().rig.debug_camera().rotation, Vec3::ZERO);

    let outside = InputSnapshot {
        cursor: Vec2::new(1200.0, 540.0),
        ..InputSnapshot::default()
    };
    let requests = driver.update(&outside, DT);
    assert_eq!(requests, vec![FrameRequest::WarpCursor(anchor)]);
    assert!(driver.state().rig.debug_camera().rotation.y < 0.0);
}

#[test]
fn test_f4_toggles_rotation_and_forces_fill() {
    let mut driver = scene_driver();
    press(&mut driver, &[Key::F6]);
    assert!(driver.state().visual.no_cull());
    driver.update(&InputSnapshot::with_held(&[Key::W]), 0.25);
    press(&mut driver, &[Key::F4]);

    let state = driver.state();
    assert!(state.visual.rotate);
    assert!(state.visual.fill());
    assert!(!state.visual.no_cull());
    assert_eq!(state.rig.debug_camera().position, state.rig.start_position());
}
