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

use prism_data::config::{EntityRecord, JsonDocument, SceneGraphDocument, Vec3Record, NO_TEXTURE};
use prism_data::scene::{AnimationRole, Entity, TextureSource};

fn sample_document() -> SceneGraphDocument {
    let entry = |id: i32, name: &str, texture: &str, x: f32| EntityRecord {
        mesh_path: format!("Models/{}.obj", name.to_lowercase()),
        texture_path: texture.to_owned(),
        position: Vec3Record::new(x, 1.0, -4.0),
        rotation: Vec3Record::new(0.1 * id as f32, 0.0, 0.25),
        scale: Vec3Record::new(1.0, 2.0, 0.5),
        id,
        name: name.to_owned(),
        animation: None,
        transparent: None,
    };
    SceneGraphDocument {
        game_objects: vec![
            entry(1, "Airplane", "Textures/plane.png", 3.0),
            entry(2, "Car", "Textures/car.png", -3.0),
            entry(3, "Glass", NO_TEXTURE, 0.0),
            entry(4, "Well", "Textures/stone.png", 12.5),
        ],
    }
}

#[test]
fn test_scene_graph_file_round_trip_preserves_entities() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Scene Graph.json");

    let original = sample_document();
    original.to_file(&path).unwrap();
    let reloaded = SceneGraphDocument::from_file(&path).unwrap();
    assert_eq!(reloaded, original);

    let before: Vec<Entity> = original.game_objects.iter().map(Entity::from_record).collect();
    let after: Vec<Entity> = reloaded.game_objects.iter().map(Entity::from_record).collect();

    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(&after) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.id, b.id);
        assert_eq!(a.transform, b.transform);
        assert_eq!(a.transform.world_matrix(), b.transform.world_matrix());
    }
}

#[test]
fn test_entities_survive_record_conversion_with_explicit_tags() {
    let entities: Vec<Entity> = sample_document()
        .game_objects
        .iter()
        .map(Entity::from_record)
        .collect();

    let saved = SceneGraphDocument {
        game_objects: entities.iter().map(Entity::to_record).collect(),
    };
    let json = saved.to_json_string().unwrap();
    let restored: Vec<Entity> = SceneGraphDocument::from_json_str(&json)
        .unwrap()
        .game_objects
        .iter()
        .map(Entity::from_record)
        .collect();

    assert_eq!(restored, entities);
    assert_eq!(restored[0].animation, AnimationRole::SpinYaw);
    assert_eq!(restored[1].animation, AnimationRole::Tumble);
    assert!(restored[2].transparent);
    assert_eq!(restored[2].texture, TextureSource::None);
}

#[test]
fn test_missing_scene_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    let err = SceneGraphDocument::from_file(&missing).unwrap_err();
    assert!(err.to_string().contains("nope.json"));
    assert!(SceneGraphDocument::load_or_default(&missing).game_objects.is_empty());
}
