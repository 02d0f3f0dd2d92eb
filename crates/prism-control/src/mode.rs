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

//! Visual-mode flags and their interaction rules.

use crate::presets::PresetBundle;
use prism_core::renderer::RasterizerMode;

/// The set of render toggles.
///
/// `fill` and `no_cull` are never both on, and turning gooch shading on or off
/// forces lighting and texturing to the opposite state. Those three flags are
/// only reachable through methods that keep these rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisualMode {
    fill: bool,
    no_cull: bool,
    gooch: bool,
    /// Lighting on/off.
    pub light_on: bool,
    /// Texturing on/off.
    pub texture_on: bool,
    /// Vertical wave filter.
    pub wave_y: bool,
    /// Horizontal wave filter.
    pub wave_x: bool,
    /// Pixelation filter.
    pub pixelate: bool,
    /// HUD text overlay.
    pub text_overlay: bool,
    /// Scene rotation animation.
    pub rotate: bool,
    /// Mouse-look for the debug camera.
    pub mouse_look: bool,
}

impl VisualMode {
    /// The canonical default bundle restored by reset and by returning to the menu.
    pub const CANONICAL: Self = Self {
        fill: true,
        no_cull: false,
        gooch: false,
        light_on: true,
        texture_on: true,
        wave_y: false,
        wave_x: false,
        pixelate: false,
        text_overlay: true,
        rotate: false,
        mouse_look: false,
    };

    /// Solid fill with back-face culling.
    pub fn fill(&self) -> bool {
        self.fill
    }

    /// Culling disabled (implies fill off).
    pub fn no_cull(&self) -> bool {
        self.no_cull
    }

    /// Gooch shading.
    pub fn gooch(&self) -> bool {
        self.gooch
    }

    /// Flips fill mode. Turning fill on restores back-face culling.
    pub fn toggle_fill(&mut self) {
        if self.fill {
            self.fill = false;
        } else {
            self.fill = true;
            self.no_cull = false;
        }
    }

    /// Flips no-cull mode. Turning it on disables fill.
    pub fn toggle_no_cull(&mut self) {
        if self.no_cull {
            self.no_cull = false;
        } else {
            self.no_cull = true;
            self.fill = false;
        }
    }

    /// Forces solid fill with culling.
    pub fn force_fill(&mut self) {
        self.fill = true;
        self.no_cull = false;
    }

    /// Sets gooch shading. An actual change also sets lighting and texturing
    /// to the opposite of the new gooch state.
    pub fn set_gooch(&mut self, on: bool) {
        if self.gooch == on {
            return;
        }
        self.gooch = on;
        self.light_on = !on;
        self.texture_on = !on;
    }

    /// Flips gooch shading, see [`set_gooch`](Self::set_gooch).
    pub fn toggle_gooch(&mut self) {
        self.set_gooch(!self.gooch);
    }

    /// Restores the canonical default bundle. Mouse-look is not part of it.
    pub fn reset(&mut self) {
        *self = Self {
            mouse_look: self.mouse_look,
            ..Self::CANONICAL
        };
    }

    /// Applies the flag bundle of a camera preset.
    pub fn apply_preset(&mut self, bundle: &PresetBundle) {
        self.fill = bundle.fill;
        self.no_cull = bundle.no_cull && !bundle.fill;
        self.wave_y = bundle.wave_y;
        self.wave_x = bundle.wave_x;
        self.pixelate = bundle.pixelate;
        self.set_gooch(bundle.gooch);
    }

    /// The rasterizer state selected by fill and no-cull.
    pub fn rasterizer_mode(&self) -> RasterizerMode {
        RasterizerMode::select(self.fill, self.no_cull)
    }
}

impl Default for VisualMode {
    fn default() -> Self {
        Self::CANONICAL
    }
}
