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

//! Conversion of the simulated [`FrameState`] into the read-only view the
//! render lanes consume.

use prism_control::{ExecutionPhase, FrameState, VisualMode};
use prism_core::math::Mat4;
use prism_data::overlay::OverlayFrame;
use prism_lanes::render_lane::ShadingFlags;
use prism_lanes::{FramePhase, FrameView};

/// Shader switches of the current visual mode.
pub fn shading_flags(visual: &VisualMode) -> ShadingFlags {
    ShadingFlags {
        texture_on: visual.texture_on,
        light_on: visual.light_on,
        wave_y: visual.wave_y,
        wave_x: visual.wave_x,
        pixelate: visual.pixelate,
        gooch: visual.gooch(),
    }
}

/// Refills `out` with the world matrix of every entity, in document order.
pub fn collect_entity_worlds(state: &FrameState, out: &mut Vec<Mat4>) {
    out.clear();
    out.extend(state.entities.iter().map(|e| e.transform.world_matrix()));
}

/// Builds the frame view of `state`.
///
/// `entity_worlds` must come from [`collect_entity_worlds`] on the same state.
pub fn frame_view<'a>(
    state: &FrameState,
    entity_worlds: &'a [Mat4],
    overlay: Option<&'a OverlayFrame>,
) -> FrameView<'a> {
    let phase = match state.phase {
        ExecutionPhase::Menu => FramePhase::Menu,
        ExecutionPhase::Scene => FramePhase::Scene,
    };
    let [c0, c1, c2] = state.primitives.cubes;
    FrameView {
        phase,
        view: state.rig.view_matrix(),
        projection: state.rig.projection_matrix(),
        eye_position: state.rig.eye_position(),
        elapsed: state.time_running,
        flags: shading_flags(&state.visual),
        rasterizer: state.visual.rasterizer_mode(),
        skybox_world: state.skybox.world_matrix(),
        menu_object_world: state.menu_object.world_matrix(),
        primitives: [c0, c1, c2, state.primitives.pyramid],
        entity_worlds,
        terrain_world: state.terrain_world,
        overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_control::CameraRig;
    use prism_core::math::Vec3;
    use prism_core::renderer::RasterizerMode;
    use prism_data::scene::{AnimationRole, Entity, TextureSource, Transform};

    fn entity(name: &str, position: Vec3) -> Entity {
        Entity {
            id: 0,
            name: name.to_owned(),
            transform: Transform::new(position, Vec3::ZERO, Vec3::ONE),
            mesh_path: "Models/cube.obj".to_owned(),
            texture: TextureSource::None,
            animation: AnimationRole::None,
            transparent: false,
        }
    }

    #[test]
    fn test_canonical_flags() {
        let flags = shading_flags(&VisualMode::CANONICAL);
        assert!(flags.texture_on);
        assert!(flags.light_on);
        assert!(!flags.wave_x && !flags.wave_y && !flags.pixelate && !flags.gooch);
    }

    #[test]
    fn test_entity_worlds_follow_document_order() {
        let entities = vec![
            entity("A", Vec3::new(1.0, 0.0, 0.0)),
            entity("B", Vec3::new(0.0, 2.0, 0.0)),
        ];
        let state = FrameState::new(CameraRig::default(), entities);
        let mut worlds = vec![Mat4::IDENTITY; 5];
        collect_entity_worlds(&state, &mut worlds);
        assert_eq!(worlds.len(), 2);
        assert_eq!(worlds[0], Mat4::from_translation(Vec3::new(1.0, 0.0, 0.0)));
        assert_eq!(worlds[1], Mat4::from_translation(Vec3::new(0.0, 2.0, 0.0)));
    }

    #[test]
    fn test_frame_view_mirrors_state() {
        let mut state = FrameState::default();
        state.time_running = 3.5;
        let view = frame_view(&state, &[], None);
        assert_eq!(view.phase, FramePhase::Menu);
        assert_eq!(view.elapsed, 3.5);
        assert_eq!(view.rasterizer, RasterizerMode::Fill);
        assert_eq!(view.primitives[3], state.primitives.pyramid);
        assert_eq!(view.terrain_world, state.terrain_world);
        assert!(view.overlay.is_none());

        state.phase = ExecutionPhase::Scene;
        let overlay = OverlayFrame::default();
        let view = frame_view(&state, &[], Some(&overlay));
        assert_eq!(view.phase, FramePhase::Scene);
        assert!(view.overlay.is_some());
    }
}
