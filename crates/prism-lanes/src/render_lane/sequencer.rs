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

//! The fixed-order frame sequencer.
//!
//! A frame is recorded in two steps, like every lane of the engine: the
//! [`FrameView`] is first flattened into a list of [`DrawCommand`]s and their
//! payloads, the payloads are uploaded with one write, and only then is the
//! render pass encoded. Draws whose GPU resources are missing never reach the
//! pass.

use super::gpu_scene::{EntityTexture, GpuMesh, GpuScene};
use super::overlay::OverlayBatch;
use super::payload::{FramePayload, LightingTerms, PayloadRing, ShadingFlags};
use super::pipelines::{PipelineSet, TRANSPARENT_BLEND_CONSTANT};
use ahash::AHashSet;
use prism_core::math::{LinearRgba, Mat4, Vec3};
use prism_core::renderer::{
    BindGroupId, BlendMode, BufferId, CommandEncoder, FrameTargets, GraphicsDevice, IndexFormat,
    LoadOp, Operations, RasterizerMode, RenderError, RenderPassColorAttachment,
    RenderPassDepthStencilAttachment, RenderPassDescriptor, RenderPipelineId, ResourceError,
    StoreOp,
};
use prism_data::overlay::OverlayFrame;

/// Which of the two frame layouts to record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FramePhase {
    /// Skybox, menu object, menu text.
    #[default]
    Menu,
    /// Skybox, primitives, entities, terrain, HUD.
    Scene,
}

/// Everything the sequencer reads from the simulation for one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    /// Frame layout.
    pub phase: FramePhase,
    /// View matrix of the active camera.
    pub view: Mat4,
    /// Projection matrix of the active camera.
    pub projection: Mat4,
    /// Eye position used by specular and gooch shading.
    pub eye_position: Vec3,
    /// Elapsed animation angle.
    pub elapsed: f32,
    /// Shader switches.
    pub flags: ShadingFlags,
    /// Rasterizer state of the world geometry.
    pub rasterizer: RasterizerMode,
    /// World matrix of the skybox.
    pub skybox_world: Mat4,
    /// World matrix of the menu object.
    pub menu_object_world: Mat4,
    /// World matrices of the three cubes followed by the pyramid.
    pub primitives: [Mat4; 4],
    /// World matrix of each scene entity, in the order of [`GpuScene::entities`].
    pub entity_worlds: &'a [Mat4],
    /// World matrix of the terrain.
    pub terrain_world: Mat4,
    /// Overlay to draw last, if any.
    pub overlay: Option<&'a OverlayFrame>,
}

/// Stage a draw belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawStage {
    /// The skybox.
    Skybox,
    /// A hard-coded cube or the pyramid.
    Primitive,
    /// A scene-graph entity.
    Entity,
    /// The terrain.
    Terrain,
    /// The main menu object.
    MenuObject,
}

/// One indexed draw with every binding resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawCommand {
    /// Stage of the draw.
    pub stage: DrawStage,
    /// Pipeline to bind.
    pub pipeline: RenderPipelineId,
    /// Blend mode baked in `pipeline`.
    pub blend: BlendMode,
    /// `@group(1)` texture bind group, `None` for the terrain.
    pub texture: Option<BindGroupId>,
    /// Vertex buffer.
    pub vertex_buffer: BufferId,
    /// Index buffer.
    pub index_buffer: BufferId,
    /// Index width.
    pub index_format: IndexFormat,
    /// Number of indices.
    pub index_count: u32,
    /// Slot of the draw's payload in the ring.
    pub payload_slot: usize,
}

/// The texture binding requested by a draw.
enum TextureChoice {
    /// A bound texture, sampled when texturing is on.
    Sampled(BindGroupId),
    /// The white fallback with `has_texture` forced off.
    White,
    /// No `@group(1)` at all.
    Unbound,
    /// A texture that failed to load; the draw is skipped.
    Missing,
}

/// Records frames into the render pass of a [`RenderSystem`](prism_core::renderer::RenderSystem).
#[derive(Debug)]
pub struct FrameSequencer {
    pipelines: PipelineSet,
    ring: PayloadRing,
    overlay: OverlayBatch,
    lighting: LightingTerms,
    pixelation_amount: f32,
    clear_color: LinearRgba,
    commands: Vec<DrawCommand>,
    payloads: Vec<FramePayload>,
    warned: AHashSet<String>,
}

impl FrameSequencer {
    /// Creates a sequencer drawing with `pipelines`.
    pub fn new(
        device: &dyn GraphicsDevice,
        pipelines: PipelineSet,
        lighting: LightingTerms,
        pixelation_amount: f32,
        clear_color: LinearRgba,
    ) -> Result<Self, ResourceError> {
        let ring = PayloadRing::new(device, pipelines.payload_layout())?;
        Ok(Self {
            pipelines,
            ring,
            overlay: OverlayBatch::default(),
            lighting,
            pixelation_amount,
            clear_color,
            commands: Vec::new(),
            payloads: Vec::new(),
            warned: AHashSet::new(),
        })
    }

    /// The pipelines and layouts the sequencer draws with.
    pub fn pipelines(&self) -> &PipelineSet {
        &self.pipelines
    }

    /// Replaces the light terms, e.g. after the light document was reloaded.
    pub fn set_lighting(&mut self, lighting: LightingTerms) {
        self.lighting = lighting;
    }

    /// Payloads of the last prepared frame, indexed by [`DrawCommand::payload_slot`].
    pub fn payloads(&self) -> &[FramePayload] {
        &self.payloads
    }

    /// Flattens `view` into the ordered draw list of the frame.
    pub fn prepare(&mut self, view: &FrameView<'_>, scene: &GpuScene) -> &[DrawCommand] {
        self.commands.clear();
        self.payloads.clear();
        let base = FramePayload::new(
            view.projection,
            view.view,
            view.eye_position,
            view.elapsed,
            &self.lighting,
            view.flags,
            self.pixelation_amount,
        );

        let skybox_texture = match &scene.skybox_texture {
            Some(texture) => TextureChoice::Sampled(texture.bind_group),
            None => TextureChoice::Missing,
        };
        self.push(
            &base,
            "skybox",
            DrawStage::Skybox,
            self.pipelines.skybox(),
            BlendMode::Opaque,
            scene.skybox.as_ref(),
            skybox_texture,
            view.skybox_world,
            scene,
        );

        match view.phase {
            FramePhase::Menu => {
                self.push(
                    &base,
                    "menu object",
                    DrawStage::MenuObject,
                    self.pipelines.scene(view.rasterizer, BlendMode::Transparent),
                    BlendMode::Transparent,
                    scene.menu_object.as_ref(),
                    TextureChoice::White,
                    view.menu_object_world,
                    scene,
                );
            }
            FramePhase::Scene => self.prepare_world(&base, view, scene),
        }
        &self.commands
    }

    fn prepare_world(&mut self, base: &FramePayload, view: &FrameView<'_>, scene: &GpuScene) {
        let opaque = self.pipelines.scene(view.rasterizer, BlendMode::Opaque);
        let transparent = self.pipelines.scene(view.rasterizer, BlendMode::Transparent);

        for (i, world) in view.primitives.iter().enumerate() {
            let (key, mesh) = if i < 3 {
                ("cube", scene.cube.as_ref())
            } else {
                ("pyramid", scene.pyramid.as_ref())
            };
            let texture = match &scene.crate_texture {
                Some(texture) => TextureChoice::Sampled(texture.bind_group),
                None => TextureChoice::Missing,
            };
            self.push(base, key, DrawStage::Primitive, opaque, BlendMode::Opaque, mesh, texture, *world, scene);
        }

        for (i, entity) in scene.entities.iter().enumerate() {
            let Some(world) = view.entity_worlds.get(i) else {
                self.warn_once(&entity.name, "has no world matrix this frame");
                continue;
            };
            let texture = match &entity.texture {
                EntityTexture::Untextured => TextureChoice::White,
                EntityTexture::Bound(texture) => TextureChoice::Sampled(texture.bind_group),
                EntityTexture::Missing => TextureChoice::Missing,
            };
            let (pipeline, blend) = if entity.transparent {
                (transparent, BlendMode::Transparent)
            } else {
                (opaque, BlendMode::Opaque)
            };
            self.push(
                base,
                &entity.name,
                DrawStage::Entity,
                pipeline,
                blend,
                entity.mesh.as_deref(),
                texture,
                *world,
                scene,
            );
        }

        self.push(
            base,
            "terrain",
            DrawStage::Terrain,
            self.pipelines.terrain(view.rasterizer),
            BlendMode::Opaque,
            scene.terrain.as_ref(),
            TextureChoice::Unbound,
            view.terrain_world,
            scene,
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn push(
        &mut self,
        base: &FramePayload,
        key: &str,
        stage: DrawStage,
        pipeline: RenderPipelineId,
        blend: BlendMode,
        mesh: Option<&GpuMesh>,
        texture: TextureChoice,
        world: Mat4,
        scene: &GpuScene,
    ) {
        let Some(mesh) = mesh else {
            self.warn_once(key, "has no mesh and is skipped");
            return;
        };
        let (texture, textured) = match texture {
            TextureChoice::Sampled(bind_group) => (Some(bind_group), true),
            TextureChoice::White => (Some(scene.white.bind_group), false),
            TextureChoice::Unbound => (None, false),
            TextureChoice::Missing => {
                self.warn_once(key, "has no texture and is skipped");
                return;
            }
        };
        let payload_slot = self.payloads.len();
        self.payloads.push(base.for_draw(world, textured));
        self.commands.push(DrawCommand {
            stage,
            pipeline,
            blend,
            texture,
            vertex_buffer: mesh.vertex_buffer,
            index_buffer: mesh.index_buffer,
            index_format: mesh.index_format,
            index_count: mesh.index_count,
            payload_slot,
        });
    }

    fn warn_once(&mut self, key: &str, what: &str) {
        if self.warned.insert(format!("{key}: {what}")) {
            log::warn!("Draw '{key}' {what}");
        }
    }

    /// Prepares, uploads and encodes one frame into `encoder`.
    pub fn record(
        &mut self,
        device: &dyn GraphicsDevice,
        encoder: &mut dyn CommandEncoder,
        targets: &FrameTargets,
        view: &FrameView<'_>,
        scene: &GpuScene,
    ) -> Result<(), RenderError> {
        self.prepare(view, scene);
        self.ring.upload(device, &self.payloads)?;
        let overlay = match view.overlay {
            Some(frame) if !frame.is_empty() => self.overlay.prepare(device, frame)?,
            _ => None,
        };

        let color_attachment = RenderPassColorAttachment {
            view: &targets.color,
            ops: Operations {
                load: LoadOp::Clear(self.clear_color),
                store: StoreOp::Store,
            },
        };
        let pass_descriptor = RenderPassDescriptor {
            label: Some("Frame Pass"),
            color_attachments: &[color_attachment],
            depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                view: &targets.depth,
                depth_ops: Operations {
                    load: LoadOp::Clear(1.0),
                    store: StoreOp::Store,
                },
            }),
        };
        let mut pass = encoder.begin_render_pass(&pass_descriptor);

        let payload_group = self.ring.bind_group();
        let mut current_pipeline: Option<RenderPipelineId> = None;
        for cmd in &self.commands {
            if current_pipeline != Some(cmd.pipeline) {
                pass.set_pipeline(&cmd.pipeline);
                if cmd.blend == BlendMode::Transparent {
                    pass.set_blend_constant(TRANSPARENT_BLEND_CONSTANT);
                }
                current_pipeline = Some(cmd.pipeline);
            }
            pass.set_bind_group(0, &payload_group, &[self.ring.offset_of(cmd.payload_slot)]);
            if let Some(texture) = &cmd.texture {
                pass.set_bind_group(1, texture, &[]);
            }
            pass.set_vertex_buffer(0, &cmd.vertex_buffer, 0);
            pass.set_index_buffer(&cmd.index_buffer, 0, cmd.index_format);
            pass.draw_indexed(0..cmd.index_count, 0, 0..1);
        }

        if let Some((buffer, vertex_count)) = overlay {
            pass.set_pipeline(&self.pipelines.overlay());
            pass.set_vertex_buffer(0, &buffer, 0);
            pass.draw(0..vertex_count, 0..1);
        }
        Ok(())
    }
}
