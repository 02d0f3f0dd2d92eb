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

use super::Transform;
use crate::config::{EntityRecord, NO_TEXTURE};
use prism_core::math::Vec3;
use serde::{Deserialize, Serialize};

/// How an entity is animated by the frame update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationRole {
    /// The entity keeps its authored rotation.
    #[default]
    None,
    /// Spins around Y while scene rotation is on, and is reset to zero rotation otherwise.
    SpinYaw,
    /// Tumbles around X and Y at all times.
    Tumble,
}

impl AnimationRole {
    /// Infers the role of a legacy entity from its name.
    pub fn infer_from_name(name: &str) -> Self {
        match name {
            "Airplane" => Self::SpinYaw,
            "Car" => Self::Tumble,
            _ => Self::None,
        }
    }

    /// Returns the rotation this role imposes for the elapsed angle, if any.
    pub fn rotation_at(self, angle: f32, rotation_enabled: bool) -> Option<Vec3> {
        match self {
            Self::None => None,
            Self::SpinYaw if rotation_enabled => Some(Vec3::new(0.0, -angle, 0.0)),
            Self::SpinYaw => Some(Vec3::ZERO),
            Self::Tumble => Some(Vec3::new(-angle, -angle, 0.0)),
        }
    }
}

/// Where an entity's texture comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TextureSource {
    /// The entity is drawn untextured.
    None,
    /// Path of the image file.
    Path(String),
}

impl TextureSource {
    /// Parses the document value, where `"NULL"` means no texture.
    pub fn from_document(value: &str) -> Self {
        if value == NO_TEXTURE {
            Self::None
        } else {
            Self::Path(value.to_owned())
        }
    }

    /// Returns the document value for this source.
    pub fn to_document(&self) -> String {
        match self {
            Self::None => NO_TEXTURE.to_owned(),
            Self::Path(path) => path.clone(),
        }
    }

    /// Returns the path, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::None => None,
            Self::Path(path) => Some(path),
        }
    }
}

/// A drawable scene object.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    /// Numeric identifier from the scene document.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// Current transform, mutated by the frame update.
    pub transform: Transform,
    /// Path of the OBJ mesh.
    pub mesh_path: String,
    /// Texture of the entity.
    pub texture: TextureSource,
    /// Animation rule applied each frame.
    pub animation: AnimationRole,
    /// Drawn with the transparent blend state when `true`.
    pub transparent: bool,
}

impl Entity {
    /// Builds an entity from its document record, resolving the optional tags.
    pub fn from_record(record: &EntityRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            transform: Transform::new(
                record.position.into(),
                record.rotation.into(),
                record.scale.into(),
            ),
            mesh_path: record.mesh_path.clone(),
            texture: TextureSource::from_document(&record.texture_path),
            animation: record
                .animation
                .unwrap_or_else(|| AnimationRole::infer_from_name(&record.name)),
            transparent: record.transparent.unwrap_or(record.name == "Glass"),
        }
    }

    /// Converts the entity back into a document record with explicit tags.
    pub fn to_record(&self) -> EntityRecord {
        EntityRecord {
            mesh_path: self.mesh_path.clone(),
            texture_path: self.texture.to_document(),
            position: self.transform.position.into(),
            rotation: self.transform.rotation.into(),
            scale: self.transform.scale.into(),
            id: self.id,
            name: self.name.clone(),
            animation: Some(self.animation),
            transparent: Some(self.transparent),
        }
    }
}
