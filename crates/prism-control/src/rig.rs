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

//! The ten camera slots and the debug-camera cursor.

use prism_core::math::{Mat4, Vec3};
use prism_data::config::CameraDocument;
use prism_data::scene::Camera;

/// Number of camera slots.
pub const CAMERA_SLOTS: usize = 10;

/// Slot of the interactive debug camera.
pub const DEBUG_SLOT: usize = 0;

/// Ten cameras, one of them active.
///
/// Slot 0 is the only mutable camera. Activating a preset copies its pose
/// into slot 0, and slot 0 keeps tracking the preset while it stays active,
/// so returning to slot 0 continues from the preset's pose. Presets are
/// never written.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    slots: [Camera; CAMERA_SLOTS],
    active: usize,
    start_position: Vec3,
    eye_position: Vec3,
}

impl CameraRig {
    /// Builds the rig from the camera document for a given aspect ratio.
    pub fn from_document(document: &CameraDocument, aspect_ratio: f32) -> Self {
        let slots = document.slots().map(|r| Camera::from_record(&r, aspect_ratio));
        Self::from_cameras(slots)
    }

    /// Builds the rig from ten cameras. Slot 0's position becomes the start position.
    pub fn from_cameras(slots: [Camera; CAMERA_SLOTS]) -> Self {
        let start_position = slots[DEBUG_SLOT].position;
        Self {
            slots,
            active: DEBUG_SLOT,
            start_position,
            eye_position: start_position,
        }
    }

    /// Index of the active slot.
    pub fn active_slot(&self) -> usize {
        self.active
    }

    /// Returns `true` while the debug camera is active.
    pub fn is_debug_active(&self) -> bool {
        self.active == DEBUG_SLOT
    }

    /// Makes `slot` the active camera. Out-of-range slots are ignored.
    pub fn activate(&mut self, slot: usize) {
        if slot >= CAMERA_SLOTS {
            log::warn!("Ignoring activation of camera slot {slot}");
            return;
        }
        self.active = slot;
        self.sync_debug_to_active();
    }

    /// Copies the active preset's pose into the debug camera.
    pub fn sync_debug_to_active(&mut self) {
        if self.active != DEBUG_SLOT {
            let preset = self.slots[self.active];
            self.slots[DEBUG_SLOT].copy_pose_from(&preset);
        }
    }

    /// The active camera.
    pub fn active_camera(&self) -> &Camera {
        &self.slots[self.active]
    }

    /// The camera in `slot`, if it exists.
    pub fn camera(&self, slot: usize) -> Option<&Camera> {
        self.slots.get(slot)
    }

    /// The debug camera.
    pub fn debug_camera(&self) -> &Camera {
        &self.slots[DEBUG_SLOT]
    }

    /// Mutable access to the debug camera.
    pub fn debug_camera_mut(&mut self) -> &mut Camera {
        &mut self.slots[DEBUG_SLOT]
    }

    /// Position the debug camera had at startup.
    pub fn start_position(&self) -> Vec3 {
        self.start_position
    }

    /// Moves the debug camera back to its start position with zero rotation.
    pub fn reset_debug_camera(&mut self) {
        let start = self.start_position;
        let debug = self.debug_camera_mut();
        debug.set_position(start);
        debug.set_rotation(Vec3::ZERO);
    }

    /// Activates the debug slot and resets it.
    pub fn reset(&mut self) {
        self.active = DEBUG_SLOT;
        self.reset_debug_camera();
    }

    /// Propagates a surface resize to every slot.
    pub fn set_aspect_ratio(&mut self, width: u32, height: u32) {
        for camera in &mut self.slots {
            camera.set_aspect_ratio(width, height);
        }
    }

    /// Eye position used for specular shading.
    pub fn eye_position(&self) -> Vec3 {
        self.eye_position
    }

    /// Refreshes the shading eye position from the debug camera.
    ///
    /// While the debug camera is in front of the `z = 0` plane the start
    /// position is used, behind it the camera position, and exactly on it
    /// the previous value is kept.
    pub fn refresh_eye_position(&mut self) {
        let position = self.debug_camera().position;
        if position.z > 0.0 {
            self.eye_position = self.start_position;
        } else if position.z < 0.0 {
            self.eye_position = position;
        }
    }

    /// View matrix of the active camera.
    pub fn view_matrix(&self) -> Mat4 {
        self.active_camera().view_matrix()
    }

    /// Projection matrix of the active camera.
    pub fn projection_matrix(&self) -> Mat4 {
        self.active_camera().projection_matrix()
    }
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::from_document(&CameraDocument::default(), 16.0 / 9.0)
    }
}
