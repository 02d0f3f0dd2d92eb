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

//! Small value records shared by the documents.

use prism_core::math::{LinearRgba, Vec3};
use serde::{Deserialize, Serialize};

/// A `{ "x", "y", "z" }` triple.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3Record {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

impl Vec3Record {
    /// Creates a new record.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<Vec3Record> for Vec3 {
    fn from(r: Vec3Record) -> Self {
        Vec3::new(r.x, r.y, r.z)
    }
}

impl From<Vec3> for Vec3Record {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// A `{ "r", "g", "b", "a" }` colour.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RgbaRecord {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl RgbaRecord {
    /// Creates a new record.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl From<RgbaRecord> for LinearRgba {
    fn from(c: RgbaRecord) -> Self {
        LinearRgba::new(c.r, c.g, c.b, c.a)
    }
}

impl From<LinearRgba> for RgbaRecord {
    fn from(c: LinearRgba) -> Self {
        Self::new(c.r, c.g, c.b, c.a)
    }
}
