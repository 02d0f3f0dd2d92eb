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

use super::JsonDocument;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the settings file location.
pub const SETTINGS_ENV_VAR: &str = "PRISM_SETTINGS";

/// Settings file looked up in the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "showcase.json";

/// Engine-wide settings: window, asset locations and control tuning.
///
/// Every field has a default, so a partial file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Title of the main window.
    pub window_title: String,
    /// Initial window width in logical pixels.
    pub window_width: u32,
    /// Initial window height in logical pixels.
    pub window_height: u32,
    /// Directory every other asset path is relative to.
    pub asset_root: PathBuf,
    /// Light variables document.
    pub light_document: PathBuf,
    /// Scene camera variables document.
    pub camera_document: PathBuf,
    /// Scene graph document.
    pub scene_document: PathBuf,
    /// Mesh used for the skybox (an inward-facing cube).
    pub skybox_mesh: PathBuf,
    /// Texture used for the skybox.
    pub skybox_texture: PathBuf,
    /// Texture of the hard-coded cubes and pyramid.
    pub crate_texture: PathBuf,
    /// Mesh spinning behind the main menu.
    pub menu_mesh: PathBuf,
    /// Raw 8-bit heightmap.
    pub heightmap: PathBuf,
    /// Side length of the square heightmap, in samples.
    pub heightmap_size: u32,
    /// Height of a 255 sample, in world units.
    pub heightmap_scale: f32,
    /// Vertex rows and columns of the terrain grid.
    pub terrain_resolution: u32,
    /// Debug camera translation speed, in units per second.
    pub camera_speed: f32,
    /// Debug camera arrow-key rotation speed, in radians per second.
    pub rotation_speed: f32,
    /// Cursor offsets below this many pixels are ignored by mouse-look.
    pub mouse_dead_zone: f32,
    /// Point the cursor is warped back to by mouse-look.
    pub mouse_anchor: [f32; 2],
    /// Mouse-look sensitivity, scaled by the frame time.
    pub mouse_sensitivity: f32,
    /// Distance travelled per wheel notch while mouse-look is on.
    pub wheel_step: f32,
    /// Block size used by the pixelation filter.
    pub pixelation_amount: f32,
    /// Colour the frame is cleared to.
    pub clear_color: [f32; 4],
    /// Video opened by the "Play Tutorial Video" menu entry.
    pub tutorial_video: PathBuf,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            window_title: "Prism Real-Time Rendering Showcase".to_owned(),
            window_width: 1920,
            window_height: 1080,
            asset_root: PathBuf::from("assets"),
            light_document: PathBuf::from("JSON Files/Light Variables.json"),
            camera_document: PathBuf::from("JSON Files/Scene Camera Variables.json"),
            scene_document: PathBuf::from("JSON Files/Scene Graph.json"),
            skybox_mesh: PathBuf::from("Models/InvertedCube.obj"),
            skybox_texture: PathBuf::from("Textures/skybox.png"),
            crate_texture: PathBuf::from("Textures/Crate_COLOR.png"),
            menu_mesh: PathBuf::from("Models/donut.obj"),
            heightmap: PathBuf::from("Heightmaps/coastMountain513.raw"),
            heightmap_size: 513,
            heightmap_scale: 10.0,
            terrain_resolution: 400,
            camera_speed: 20.0,
            rotation_speed: 1.0,
            mouse_dead_zone: 50.0,
            mouse_anchor: [960.0, 540.0],
            mouse_sensitivity: 0.1,
            wheel_step: 1.0,
            pixelation_amount: 20.0,
            clear_color: [0.025, 0.025, 0.095, 1.0],
            tutorial_video: PathBuf::from("TutorialVideo.mp4"),
        }
    }
}

impl JsonDocument for EngineSettings {}

impl EngineSettings {
    /// Resolves an asset path against [`asset_root`](Self::asset_root).
    ///
    /// Absolute paths are returned unchanged.
    pub fn resolve(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.asset_root.join(relative)
    }

    /// Returns the settings file to read: `$PRISM_SETTINGS` if set, else `showcase.json`.
    pub fn settings_path() -> PathBuf {
        std::env::var_os(SETTINGS_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
    }

    /// Loads the settings from [`settings_path`](Self::settings_path).
    ///
    /// A missing file silently yields the defaults; an unreadable one is logged.
    pub fn discover() -> Self {
        let path = Self::settings_path();
        if !path.exists() {
            log::info!(
                "No settings file at '{}', using defaults",
                path.display()
            );
            return Self::default();
        }
        Self::load_or_default(path)
    }
}
