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

use super::{JsonDocument, Vec3Record};
use serde::{Deserialize, Serialize};

/// Projection parameters. The aspect ratio is not stored; it follows the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRecord {
    /// Vertical field of view, in degrees.
    pub fov: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
}

impl Default for ProjectionRecord {
    fn default() -> Self {
        Self {
            fov: 60.0,
            near: 0.01,
            far: 5000.0,
        }
    }
}

/// One camera entry of the scene camera document.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraRecord {
    /// World position.
    #[serde(rename = "Position")]
    pub position: Vec3Record,
    /// Pitch (x), yaw (y) and an unused roll (z), in radians.
    #[serde(rename = "Rotation")]
    pub rotation: Vec3Record,
    /// Projection parameters.
    #[serde(rename = "ProjectionValues")]
    pub projection: ProjectionRecord,
}

impl CameraRecord {
    fn at(x: f32, y: f32, z: f32, pitch: f32, yaw: f32) -> Self {
        Self {
            position: Vec3Record::new(x, y, z),
            rotation: Vec3Record::new(pitch, yaw, 0.0),
            projection: ProjectionRecord::default(),
        }
    }
}

/// The debug camera and the nine preset cameras.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct SceneCameraSet {
    #[serde(rename = "DebugCamera")]
    pub debug: CameraRecord,
    #[serde(rename = "CameraOne")]
    pub one: CameraRecord,
    #[serde(rename = "CameraTwo")]
    pub two: CameraRecord,
    #[serde(rename = "CameraThree")]
    pub three: CameraRecord,
    #[serde(rename = "CameraFour")]
    pub four: CameraRecord,
    #[serde(rename = "CameraFive")]
    pub five: CameraRecord,
    #[serde(rename = "CameraSix")]
    pub six: CameraRecord,
    #[serde(rename = "CameraSeven")]
    pub seven: CameraRecord,
    #[serde(rename = "CameraEight")]
    pub eight: CameraRecord,
    #[serde(rename = "CameraNine")]
    pub nine: CameraRecord,
}

/// The "Scene Camera Variables" document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraDocument {
    /// All ten camera entries.
    #[serde(rename = "SceneCameraVariables")]
    pub cameras: SceneCameraSet,
}

impl CameraDocument {
    /// Returns the ten entries indexed by camera slot (0 is the debug camera).
    pub fn slots(&self) -> [CameraRecord; 10] {
        let c = &self.cameras;
        [
            c.debug, c.one, c.two, c.three, c.four, c.five, c.six, c.seven, c.eight, c.nine,
        ]
    }
}

impl JsonDocument for CameraDocument {}

impl Default for CameraDocument {
    fn default() -> Self {
        Self {
            cameras: SceneCameraSet {
                debug: CameraRecord::at(0.0, 3.0, 20.0, 0.0, 0.0),
                one: CameraRecord::at(-20.0, 6.0, 10.0, -0.2, -0.8),
                two: CameraRecord::at(-14.0, 4.0, 22.0, -0.1, -0.4),
                three: CameraRecord::at(20.0, 2.0, 14.0, 0.0, 0.9),
                four: CameraRecord::at(0.0, 12.0, 30.0, -0.35, 0.0),
                five: CameraRecord::at(8.0, 3.0, 12.0, -0.1, 0.4),
                six: CameraRecord::at(-8.0, 10.0, -12.0, -0.6, 3.14),
                seven: CameraRecord::at(12.0, 4.0, -6.0, -0.15, 2.2),
                eight: CameraRecord::at(-4.0, 2.0, -16.0, -0.1, 2.9),
                nine: CameraRecord::at(666.0, 720.0, 900.0, -0.5, 0.0),
            },
        }
    }
}
