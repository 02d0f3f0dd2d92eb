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

//! Defines the per-frame input snapshot consumed by the frame state machine.
//!
//! The platform layer accumulates raw window events between frames and hands a
//! frozen [`InputSnapshot`] to the update step. No input state is global: each
//! frame sees exactly one snapshot, passed by reference.

use crate::math::Vec2;

/// The closed set of keys the framework reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    R,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F11,
    Tab,
    Escape,
    Enter,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
}

impl Key {
    /// Returns the bit this key occupies in a [`KeySet`].
    #[inline]
    const fn bit(self) -> u64 {
        1u64 << (self as u8)
    }
}

/// A compact set of keys backed by a bitmask.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySet(u64);

impl KeySet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Adds a key to the set.
    #[inline]
    pub fn insert(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    /// Removes a key from the set.
    #[inline]
    pub fn remove(&mut self, key: Key) {
        self.0 &= !key.bit();
    }

    /// Returns `true` if the key is in the set.
    #[inline]
    pub const fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    /// Returns `true` if no key is in the set.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Removes every key from the set.
    #[inline]
    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

impl FromIterator<Key> for KeySet {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut set = KeySet::EMPTY;
        for key in iter {
            set.insert(key);
        }
        set
    }
}

/// One frame's worth of input, frozen before the update step runs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Keys currently held down.
    pub held: KeySet,
    /// Keys that went from released to pressed since the previous snapshot.
    pub pressed: KeySet,
    /// Cursor position in physical window pixels.
    pub cursor: Vec2,
    /// Accumulated vertical wheel movement since the previous snapshot, in lines.
    /// Positive values mean "scroll up".
    pub wheel: f32,
}

impl InputSnapshot {
    /// Returns `true` while the key is held.
    #[inline]
    pub fn is_down(&self, key: Key) -> bool {
        self.held.contains(key)
    }

    /// Returns `true` only on the frame the key went down.
    #[inline]
    pub fn just_pressed(&self, key: Key) -> bool {
        self.pressed.contains(key)
    }

    /// Builds a snapshot where every listed key was just pressed and is held.
    ///
    /// Mostly useful to drive the state machine from tests and scripted demos.
    pub fn with_presses(keys: &[Key]) -> Self {
        let set: KeySet = keys.iter().copied().collect();
        Self {
            held: set,
            pressed: set,
            ..Self::default()
        }
    }

    /// Builds a snapshot where the listed keys are held but none is a new press.
    pub fn with_held(keys: &[Key]) -> Self {
        Self {
            held: keys.iter().copied().collect(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_set_insert_and_remove() {
        let mut set = KeySet::EMPTY;
        set.insert(Key::Numpad9);
        set.insert(Key::W);
        assert!(set.contains(Key::Numpad9));
        assert!(set.contains(Key::W));
        assert!(!set.contains(Key::S));
        set.remove(Key::W);
        assert!(!set.contains(Key::W));
        set.clear();
        assert!(set.is_empty());
    }

    #[test]
    fn test_snapshot_distinguishes_edges_from_holds() {
        let pressed = InputSnapshot::with_presses(&[Key::F3]);
        assert!(pressed.just_pressed(Key::F3));
        assert!(pressed.is_down(Key::F3));

        let held = InputSnapshot::with_held(&[Key::F3]);
        assert!(!held.just_pressed(Key::F3));
        assert!(held.is_down(Key::F3));
    }
}
