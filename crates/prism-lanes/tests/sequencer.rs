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

mod common;

use common::{PassCall, RecordingDevice, RecordingEncoder};
use prism_core::math::{LinearRgba, Mat4, Vec3};
use prism_core::renderer::{BlendMode, FrameTargets, RasterizerMode, TextureFormat, TextureViewId};
use prism_data::geometry::{build_terrain_grid, cube_mesh, pyramid_mesh, Heightmap};
use prism_data::overlay::{OverlayFrame, OverlayText};
use prism_data::CpuTexture;
use prism_lanes::render_lane::{
    DrawStage, EntityTexture, FramePhase, FrameSequencer, FrameView, GpuEntity, GpuMesh, GpuScene,
    GpuTexture, LightingTerms, PipelineSet, ShadingFlags, PAYLOAD_SIZE, RING_GROWTH_SLOTS,
    TRANSPARENT_BLEND_CONSTANT,
};
use std::sync::Arc;

const CLEAR: LinearRgba = LinearRgba::new(0.025, 0.025, 0.095, 1.0);

struct Fixture {
    device: RecordingDevice,
    sequencer: FrameSequencer,
    scene: GpuScene,
    mesh: Arc<GpuMesh>,
    texture: Arc<GpuTexture>,
}

impl Fixture {
    fn new() -> Self {
        let device = RecordingDevice::new();
        let pipelines = PipelineSet::new(&device, TextureFormat::Bgra8UnormSrgb).unwrap();
        let white = GpuTexture::upload(&device, &pipelines, "white", &CpuTexture::white()).unwrap();
        let texture = Arc::new(GpuTexture::upload(&device, &pipelines, "crate", &CpuTexture::white()).unwrap());
        let mesh = Arc::new(GpuMesh::upload(&device, "mesh", &cube_mesh()).unwrap());

        let mut scene = GpuScene::empty(white);
        scene.cube = Some(GpuMesh::upload(&device, "cube", &cube_mesh()).unwrap());
        scene.pyramid = Some(GpuMesh::upload(&device, "pyramid", &pyramid_mesh()).unwrap());
        scene.skybox = Some(GpuMesh::upload(&device, "skybox", &cube_mesh()).unwrap());
        scene.menu_object = Some(GpuMesh::upload(&device, "menu", &pyramid_mesh()).unwrap());
        let grid = build_terrain_grid(&Heightmap::flat(9, 9), 3, 3);
        scene.terrain = Some(GpuMesh::upload(&device, "terrain", &grid).unwrap());
        scene.crate_texture = Some((*texture).clone());
        scene.skybox_texture = Some((*texture).clone());

        let sequencer = FrameSequencer::new(&device, pipelines, LightingTerms::default(), 20.0, CLEAR).unwrap();
        Self {
            device,
            sequencer,
            scene,
            mesh,
            texture,
        }
    }

    fn entity(&self, name: &str, texture: EntityTexture, transparent: bool) -> GpuEntity {
        GpuEntity {
            name: name.to_owned(),
            mesh: Some(self.mesh.clone()),
            texture,
            transparent,
        }
    }

    fn record(&mut self, view: &FrameView<'_>) -> Vec<PassCall> {
        let mut encoder = RecordingEncoder::default();
        let targets = FrameTargets {
            color: TextureViewId(9000),
            depth: TextureViewId(9001),
            width: 1920,
            height: 1080,
        };
        self.sequencer
            .record(&self.device, &mut encoder, &targets, view, &self.scene)
            .unwrap();
        encoder.calls()
    }
}

fn scene_view(entity_worlds: &[Mat4]) -> FrameView<'_> {
    FrameView {
        phase: FramePhase::Scene,
        view: Mat4::IDENTITY,
        projection: Mat4::IDENTITY,
        eye_position: Vec3::new(0.0, 0.0, 10.0),
        elapsed: 0.0,
        flags: ShadingFlags {
            texture_on: true,
            light_on: true,
            ..Default::default()
        },
        rasterizer: RasterizerMode::Fill,
        skybox_world: Mat4::IDENTITY,
        menu_object_world: Mat4::IDENTITY,
        primitives: [Mat4::IDENTITY; 4],
        entity_worlds,
        terrain_world: Mat4::from_translation(Vec3::splat(666.0)),
        overlay: None,
    }
}

#[test]
fn test_scene_draws_in_fixed_order() {
    let mut fx = Fixture::new();
    fx.scene.entities = vec![
        fx.entity("Airplane", EntityTexture::Bound(fx.texture.clone()), false),
        fx.entity("Car", EntityTexture::Untextured, false),
    ];
    let worlds = [Mat4::IDENTITY; 2];
    let stages: Vec<_> = fx
        .sequencer
        .prepare(&scene_view(&worlds), &fx.scene)
        .iter()
        .map(|c| c.stage)
        .collect();
    assert_eq!(
        stages,
        vec![
            DrawStage::Skybox,
            DrawStage::Primitive,
            DrawStage::Primitive,
            DrawStage::Primitive,
            DrawStage::Primitive,
            DrawStage::Entity,
            DrawStage::Entity,
            DrawStage::Terrain,
        ]
    );
}

#[test]
fn test_menu_draws_skybox_then_transparent_object() {
    let mut fx = Fixture::new();
    fx.scene.entities = vec![fx.entity("Airplane", EntityTexture::Untextured, false)];
    let mut view = scene_view(&[]);
    view.phase = FramePhase::Menu;
    let commands = fx.sequencer.prepare(&view, &fx.scene);
    assert_eq!(commands.len(), 2);
    assert_eq!(commands[0].stage, DrawStage::Skybox);
    assert_eq!(commands[1].stage, DrawStage::MenuObject);
    assert_eq!(commands[1].blend, BlendMode::Transparent);
}

#[test]
fn test_transparent_entity_switches_blend_and_back() {
    let mut fx = Fixture::new();
    fx.scene.entities = vec![
        fx.entity("Wall", EntityTexture::Untextured, false),
        fx.entity("Glass", EntityTexture::Untextured, true),
        fx.entity("Floor", EntityTexture::Untextured, false),
    ];
    let worlds = [Mat4::IDENTITY; 3];
    let calls = fx.record(&scene_view(&worlds));

    let opaque = fx.sequencer.pipelines().scene(RasterizerMode::Fill, BlendMode::Opaque);
    let transparent = fx.sequencer.pipelines().scene(RasterizerMode::Fill, BlendMode::Transparent);
    let switches: Vec<_> = calls
        .iter()
        .filter_map(|c| match c {
            PassCall::SetPipeline(p) if *p == opaque || *p == transparent => Some(*p),
            _ => None,
        })
        .collect();
    assert_eq!(switches, vec![opaque, transparent, opaque]);

    let constant_at = calls
        .iter()
        .position(|c| *c == PassCall::SetBlendConstant(TRANSPARENT_BLEND_CONSTANT))
        .unwrap();
    let transparent_at = calls
        .iter()
        .position(|c| *c == PassCall::SetPipeline(transparent))
        .unwrap();
    assert_eq!(constant_at, transparent_at + 1);
}

#[test]
fn test_missing_resources_skip_only_their_draw() {
    let mut fx = Fixture::new();
    let mut meshless = fx.entity("Ghost", EntityTexture::Untextured, false);
    meshless.mesh = None;
    fx.scene.entities = vec![
        fx.entity("Broken", EntityTexture::Missing, false),
        meshless,
        fx.entity("Fine", EntityTexture::Untextured, false),
    ];
    fx.scene.terrain = None;
    let worlds = [Mat4::IDENTITY; 3];
    let commands = fx.sequencer.prepare(&scene_view(&worlds), &fx.scene);
    let entities = commands.iter().filter(|c| c.stage == DrawStage::Entity).count();
    assert_eq!(entities, 1);
    assert!(commands.iter().all(|c| c.stage != DrawStage::Terrain));
    assert_eq!(commands.len(), 6);
}

#[test]
fn test_missing_skybox_texture_skips_skybox() {
    let mut fx = Fixture::new();
    fx.scene.skybox_texture = None;
    let commands = fx.sequencer.prepare(&scene_view(&[]), &fx.scene);
    assert!(commands.iter().all(|c| c.stage != DrawStage::Skybox));
}

#[test]
fn test_untextured_entity_binds_white_and_clears_has_texture() {
    let mut fx = Fixture::new();
    fx.scene.entities = vec![fx.entity("Plain", EntityTexture::Untextured, false)];
    let white = fx.scene.white.bind_group;
    let worlds = [Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0))];
    let commands = fx.sequencer.prepare(&scene_view(&worlds), &fx.scene).to_vec();

    let entity = commands.iter().find(|c| c.stage == DrawStage::Entity).unwrap();
    assert_eq!(entity.texture, Some(white));
    let payload = fx.sequencer.payloads()[entity.payload_slot];
    assert_eq!(payload.has_texture, 0);
    assert_eq!(payload.world, worlds[0]);

    let primitive = commands.iter().find(|c| c.stage == DrawStage::Primitive).unwrap();
    assert_eq!(fx.sequencer.payloads()[primitive.payload_slot].has_texture, 1);

    let terrain = commands.iter().find(|c| c.stage == DrawStage::Terrain).unwrap();
    assert_eq!(terrain.texture, None);
}

#[test]
fn test_pass_clears_and_draws_overlay_last() {
    let mut fx = Fixture::new();
    let mut overlay = OverlayFrame::default();
    overlay.push_text(OverlayText::new("F1 - Textures: ON", 10.0, 10.0, LinearRgba::GREEN));
    let mut view = scene_view(&[]);
    view.overlay = Some(&overlay);
    let calls = fx.record(&view);

    assert_eq!(calls[0], PassCall::Begin { clear: Some(CLEAR) });
    let overlay_pipeline = fx.sequencer.pipelines().overlay();
    let at = calls
        .iter()
        .position(|c| *c == PassCall::SetPipeline(overlay_pipeline))
        .unwrap();
    assert!(matches!(calls.last(), Some(PassCall::Draw(r)) if r.start == 0 && r.end > 0));
    assert!(calls[at..].iter().all(|c| !matches!(c, PassCall::DrawIndexed(_))));
}

#[test]
fn test_empty_overlay_is_not_drawn() {
    let mut fx = Fixture::new();
    let overlay = OverlayFrame::default();
    let mut view = scene_view(&[]);
    view.overlay = Some(&overlay);
    let calls = fx.record(&view);
    assert!(calls.iter().all(|c| !matches!(c, PassCall::Draw(_))));
}

#[test]
fn test_each_draw_uses_its_own_payload_slot() {
    let mut fx = Fixture::new();
    let calls = fx.record(&scene_view(&[]));
    let offsets: Vec<u32> = calls
        .iter()
        .filter_map(|c| match c {
            PassCall::SetBindGroup(0, _, offsets) => offsets.first().copied(),
            _ => None,
        })
        .collect();
    let stride = PAYLOAD_SIZE.div_ceil(256) * 256;
    assert_eq!(stride, 512);
    let expected: Vec<u32> = (0..6).map(|i| (i * stride) as u32).collect();
    assert_eq!(offsets, expected);
    let log = fx.device.log.lock().unwrap();
    assert_eq!(log.writes.last().map(|w| w.2 as u64), Some(6 * stride));
}

#[test]
fn test_payload_ring_grows_in_chunks() {
    let mut fx = Fixture::new();
    fx.scene.entities = (0..70)
        .map(|i| fx.entity(&format!("Box{i}"), EntityTexture::Untextured, false))
        .collect();
    let worlds = vec![Mat4::IDENTITY; 70];
    fx.record(&scene_view(&worlds));

    let stride = PAYLOAD_SIZE.div_ceil(256) * 256;
    assert_eq!(
        fx.device.buffer_sizes("Payload Ring"),
        vec![RING_GROWTH_SLOTS * stride, 2 * RING_GROWTH_SLOTS * stride]
    );
    let log = fx.device.log.lock().unwrap();
    assert_eq!(log.destroyed_buffers.len(), 1);
    assert_eq!(log.destroyed_bind_groups.len(), 1);
}

#[test]
fn test_pipelines_built_without_line_support() {
    let device = RecordingDevice::with_line_support(false);
    let pipelines = PipelineSet::new(&device, TextureFormat::Bgra8UnormSrgb).unwrap();
    assert!(!pipelines.line_supported());
    let log = device.log.lock().unwrap();
    assert_eq!(log.pipelines.len(), 11);
    assert!(log.pipelines.iter().any(|(_, label)| label == "Scene Wireframe Transparent"));
}
