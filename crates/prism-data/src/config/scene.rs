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
use crate::scene::AnimationRole;
use serde::{Deserialize, Serialize};

/// The texture path value meaning "this entity has no texture".
pub const NO_TEXTURE: &str = "NULL";

/// One entry of the scene graph document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Path of the Wavefront OBJ mesh.
    #[serde(rename = "OBJfilepath")]
    pub mesh_path: String,
    /// Path of the texture image, or [`NO_TEXTURE`].
    #[serde(rename = "TEXfilepath")]
    pub texture_path: String,
    /// Initial position.
    pub position: Vec3Record,
    /// Initial Euler rotation, in radians.
    pub rotation: Vec3Record,
    /// Initial scale.
    pub scale: Vec3Record,
    /// Numeric identifier.
    pub id: i32,
    /// Display name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Explicit animation role. Inferred from the name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationRole>,
    /// Explicit transparency tag. Inferred from the name when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparent: Option<bool>,
}

/// The "Scene Graph" document: the list of drawable entities.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneGraphDocument {
    /// Entities in draw order.
    #[serde(rename = "GameObjects")]
    pub game_objects: Vec<EntityRecord>,
}

impl JsonDocument for SceneGraphDocument {}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"{
        "GameObjects": [
            {
                "OBJfilepath": "Models/plane.obj",
                "TEXfilepath": "Textures/plane.png",
                "position": { "x": 1.0, "y": 2.0, "z": 3.0 },
                "rotation": { "x": 0.0, "y": 0.5, "z": 0.0 },
                "scale": { "x": 1.0, "y": 1.0, "z": 1.0 },
                "id": 7,
                "Name": "Airplane"
            },
            {
                "OBJfilepath": "Models/glass.obj",
                "TEXfilepath": "NULL",
                "position": { "x": 0.0, "y": 0.0, "z": 0.0 },
                "rotation": { "x": 0.0, "y": 0.0, "z": 0.0 },
                "scale": { "x": 2.0, "y": 2.0, "z": 2.0 },
                "id": 8,
                "Name": "Cup",
                "animation": "tumble",
                "transparent": true
            }
        ]
    }"#;

    #[test]
    fn test_scene_graph_parses_legacy_and_tagged_entries() {
        let doc = SceneGraphDocument::from_json_str(SCENE).unwrap();
        assert_eq!(doc.game_objects.len(), 2);

        let plane = &doc.game_objects[0];
        assert_eq!(plane.name, "Airplane");
        assert_eq!(plane.id, 7);
        assert_eq!(plane.animation, None);
        assert_eq!(plane.transparent, None);

        let cup = &doc.game_objects[1];
        assert_eq!(cup.texture_path, NO_TEXTURE);
        assert_eq!(cup.animation, Some(AnimationRole::Tumble));
        assert_eq!(cup.transparent, Some(true));
    }

    #[test]
    fn test_scene_graph_skips_absent_optional_fields_on_save() {
        let doc = SceneGraphDocument::from_json_str(SCENE).unwrap();
        let json = doc.to_json_string().unwrap();
        assert_eq!(json.matches("\"animation\"").count(), 1);
        assert_eq!(json.matches("\"transparent\"").count(), 1);
    }
}
