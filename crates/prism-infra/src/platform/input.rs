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

//! Translation from `winit` window events to the engine's input snapshot.
//!
//! Window events arrive between frames. The [`InputTracker`] folds them into
//! held keys, key edges, the cursor position and the wheel delta, and hands a
//! frozen [`InputSnapshot`] to the frame update once per frame.

use prism_core::math::Vec2;
use prism_core::platform::{InputSnapshot, Key, KeySet};
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Maps a physical key to the engine's key vocabulary.
///
/// Returns `None` for keys the application does not bind.
pub fn translate_key(keycode: KeyCode) -> Option<Key> {
    let key = match keycode {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyR => Key::R,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F11 => Key::F11,
        KeyCode::Tab => Key::Tab,
        KeyCode::Escape => Key::Escape,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Digit0 => Key::Digit0,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::Digit3 => Key::Digit3,
        KeyCode::Digit4 => Key::Digit4,
        KeyCode::Digit5 => Key::Digit5,
        KeyCode::Digit6 => Key::Digit6,
        KeyCode::Digit7 => Key::Digit7,
        KeyCode::Digit8 => Key::Digit8,
        KeyCode::Digit9 => Key::Digit9,
        KeyCode::Numpad0 => Key::Numpad0,
        KeyCode::Numpad1 => Key::Numpad1,
        KeyCode::Numpad2 => Key::Numpad2,
        KeyCode::Numpad3 => Key::Numpad3,
        KeyCode::Numpad4 => Key::Numpad4,
        KeyCode::Numpad5 => Key::Numpad5,
        KeyCode::Numpad6 => Key::Numpad6,
        KeyCode::Numpad7 => Key::Numpad7,
        KeyCode::Numpad8 => Key::Numpad8,
        KeyCode::Numpad9 => Key::Numpad9,
        _ => return None,
    };
    Some(key)
}

/// Accumulates window input between two frames.
#[derive(Debug, Default)]
pub struct InputTracker {
    held: KeySet,
    pressed: KeySet,
    cursor: Vec2,
    wheel: f32,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one window event. Returns `true` if the event was an input the
    /// tracker consumed.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                let PhysicalKey::Code(keycode) = key_event.physical_key else {
                    return false;
                };
                match translate_key(keycode) {
                    Some(key) => {
                        self.key_input(key, key_event.state, key_event.repeat);
                        true
                    }
                    None => false,
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                true
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32,
                };
                self.wheel += dy;
                true
            }
            WindowEvent::Focused(false) => {
                // Releases are not delivered to an unfocused window.
                self.held.clear();
                false
            }
            _ => false,
        }
    }

    /// Records a key transition. Auto-repeat presses do not create new edges.
    pub fn key_input(&mut self, key: Key, state: ElementState, repeat: bool) {
        match state {
            ElementState::Pressed => {
                if !repeat && !self.held.contains(key) {
                    self.pressed.insert(key);
                }
                self.held.insert(key);
            }
            ElementState::Released => self.held.remove(key),
        }
    }

    /// Records a cursor warp so the next snapshot sees the new position even
    /// if the platform does not echo a `CursorMoved` event.
    pub fn set_cursor(&mut self, position: Vec2) {
        self.cursor = position;
    }

    /// Freezes the accumulated input into a snapshot and starts a new frame:
    /// key edges and the wheel delta are cleared, held keys and the cursor
    /// carry over.
    pub fn snapshot(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            held: self.held,
            pressed: self.pressed,
            cursor: self.cursor,
            wheel: self.wheel,
        };
        self.pressed.clear();
        self.wheel = 0.0;
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::event::{DeviceId, TouchPhase};

    #[test]
    fn test_translate_bound_keys() {
        assert_eq!(translate_key(KeyCode::KeyW), Some(Key::W));
        assert_eq!(translate_key(KeyCode::F11), Some(Key::F11));
        assert_eq!(translate_key(KeyCode::Numpad3), Some(Key::Numpad3));
        assert_eq!(translate_key(KeyCode::Digit0), Some(Key::Digit0));
        assert_eq!(translate_key(KeyCode::NumpadEnter), Some(Key::Enter));
    }

    #[test]
    fn test_translate_unbound_keys_returns_none() {
        assert_eq!(translate_key(KeyCode::F10), None);
        assert_eq!(translate_key(KeyCode::Space), None);
        assert_eq!(translate_key(KeyCode::KeyZ), None);
    }

    #[test]
    fn test_press_creates_one_edge() {
        let mut tracker = InputTracker::new();
        tracker.key_input(Key::F3, ElementState::Pressed, false);
        let first = tracker.snapshot();
        assert!(first.just_pressed(Key::F3));
        assert!(first.is_down(Key::F3));

        tracker.key_input(Key::F3, ElementState::Pressed, true);
        let second = tracker.snapshot();
        assert!(!second.just_pressed(Key::F3));
        assert!(second.is_down(Key::F3));

        tracker.key_input(Key::F3, ElementState::Released, false);
        assert!(!tracker.snapshot().is_down(Key::F3));
    }

    #[test]
    fn test_press_and_release_within_one_frame_keeps_edge() {
        let mut tracker = InputTracker::new();
        tracker.key_input(Key::Tab, ElementState::Pressed, false);
        tracker.key_input(Key::Tab, ElementState::Released, false);
        let snapshot = tracker.snapshot();
        assert!(snapshot.just_pressed(Key::Tab));
        assert!(!snapshot.is_down(Key::Tab));
    }

    #[test]
    fn test_cursor_and_wheel_accumulate() {
        let mut tracker = InputTracker::new();
        assert!(tracker.handle_window_event(&WindowEvent::CursorMoved {
            device_id: DeviceId::dummy(),
            position: PhysicalPosition::new(1000.5, 520.0),
        }));
        for _ in 0..2 {
            tracker.handle_window_event(&WindowEvent::MouseWheel {
                device_id: DeviceId::dummy(),
                delta: MouseScrollDelta::LineDelta(0.0, 1.0),
                phase: TouchPhase::Moved,
            });
        }
        let snapshot = tracker.snapshot();
        assert_eq!(snapshot.cursor, Vec2::new(1000.5, 520.0));
        assert_eq!(snapshot.wheel, 2.0);

        let next = tracker.snapshot();
        assert_eq!(next.wheel, 0.0);
        assert_eq!(next.cursor, Vec2::new(1000.5, 520.0));
    }

    #[test]
    fn test_focus_loss_releases_held_keys() {
        let mut tracker = InputTracker::new();
        tracker.key_input(Key::W, ElementState::Pressed, false);
        tracker.handle_window_event(&WindowEvent::Focused(false));
        assert!(!tracker.snapshot().is_down(Key::W));
    }

    #[test]
    fn test_non_input_events_are_ignored() {
        let mut tracker = InputTracker::new();
        assert!(!tracker.handle_window_event(&WindowEvent::Resized(
            winit::dpi::PhysicalSize::new(100, 100)
        )));
        assert!(!tracker.handle_window_event(&WindowEvent::CloseRequested));
    }
}
