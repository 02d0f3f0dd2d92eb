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

//! Camera preset bundles and the key-to-slot mapping.

use prism_core::platform::{InputSnapshot, Key};

/// The visual flags a camera preset sets when it is activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetBundle {
    /// Disable culling.
    pub no_cull: bool,
    /// Solid fill.
    pub fill: bool,
    /// Vertical wave filter.
    pub wave_y: bool,
    /// Horizontal wave filter.
    pub wave_x: bool,
    /// Gooch shading.
    pub gooch: bool,
    /// Pixelation filter.
    pub pixelate: bool,
}

const fn bundle(no_cull: bool, fill: bool, wave_y: bool, wave_x: bool, gooch: bool, pixelate: bool) -> PresetBundle {
    PresetBundle {
        no_cull,
        fill,
        wave_y,
        wave_x,
        gooch,
        pixelate,
    }
}

/// Bundles of preset slots 1 to 9, at index `slot - 1`.
pub const PRESET_BUNDLES: [PresetBundle; 9] = [
    bundle(false, true, false, false, false, false),
    bundle(true, false, true, false, false, false),
    bundle(false, true, false, true, false, false),
    bundle(true, false, false, false, true, false),
    bundle(false, true, false, false, false, false),
    bundle(true, false, false, false, false, false),
    bundle(false, true, false, false, false, false),
    bundle(false, true, false, false, false, true),
    bundle(true, false, false, false, false, false),
];

/// Returns the bundle of a preset slot, or `None` for the debug slot.
pub fn preset_bundle(slot: usize) -> Option<&'static PresetBundle> {
    slot.checked_sub(1).and_then(|i| PRESET_BUNDLES.get(i))
}

/// Camera keys in priority order, with the slot each one selects.
///
/// Keys 2 and 3 are crossed: key 3 selects slot 2 and key 2 selects slot 3.
const SLOT_KEYS: [(Key, Key, usize); 10] = [
    (Key::Numpad0, Key::Digit0, 0),
    (Key::Numpad1, Key::Digit1, 1),
    (Key::Numpad3, Key::Digit3, 2),
    (Key::Numpad2, Key::Digit2, 3),
    (Key::Numpad4, Key::Digit4, 4),
    (Key::Numpad5, Key::Digit5, 5),
    (Key::Numpad6, Key::Digit6, 6),
    (Key::Numpad7, Key::Digit7, 7),
    (Key::Numpad8, Key::Digit8, 8),
    (Key::Numpad9, Key::Digit9, 9),
];

/// Returns the camera slot selected this frame, if any camera key was just pressed.
///
/// When several are pressed in the same frame the first in priority order wins.
pub fn selected_slot(input: &InputSnapshot) -> Option<usize> {
    SLOT_KEYS
        .iter()
        .find(|(numpad, digit, _)| input.just_pressed(*numpad) || input.just_pressed(*digit))
        .map(|&(_, _, slot)| slot)
}

/// The number printed in the "Camera N Active" banner for a slot.
pub fn banner_number(slot: usize) -> usize {
    match slot {
        2 => 3,
        3 => 2,
        other => other,
    }
}
