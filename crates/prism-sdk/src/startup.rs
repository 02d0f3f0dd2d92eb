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

//! One-shot parallel loading of everything the frame loop needs.
//!
//! Four independent tasks run inside one [`std::thread::scope`]: pipeline
//! creation, built-in geometry, configuration documents and scene-graph
//! assets. Each writes only its own result and all are joined before the GPU
//! scene is assembled. Textures are decoded by the tasks but bound afterwards,
//! since their bind groups need the pipeline layouts.

use prism_core::renderer::{GraphicsDevice, ResourceError};
use prism_data::config::{CameraDocument, EngineSettings, JsonDocument, LightDocument, SceneGraphDocument};
use prism_data::geometry::{build_terrain_grid, cube_mesh, pyramid_mesh, Heightmap};
use prism_data::scene::Entity;
use prism_data::{CpuTexture, ResourceCache};
use prism_lanes::asset_lane::{HeightmapLoaderLane, ObjLoaderLane, TextureLoaderLane};
use prism_lanes::render_lane::{EntityTexture, GpuEntity, GpuMesh, GpuScene, GpuTexture};
use prism_lanes::{AssetLoaderLane, PipelineSet};
use std::path::Path;
use std::sync::Arc;
use std::thread::{self, ScopedJoinHandle};
use thiserror::Error;

/// Errors that abort startup.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The device has no surface to render to.
    #[error("the graphics device has no presentation surface")]
    NoSurface,
    /// Shader compilation or pipeline baking failed.
    #[error("failed to build the render pipelines")]
    Pipelines(#[source] ResourceError),
    /// A buffer or texture could not be created.
    #[error("failed to upload '{label}' to the GPU")]
    Upload {
        /// What was being uploaded.
        label: String,
        /// The device error.
        #[source]
        source: ResourceError,
    },
    /// A loader task panicked.
    #[error("startup task '{0}' panicked")]
    TaskPanicked(&'static str),
}

/// Everything produced by [`load`].
#[derive(Debug)]
pub struct LoadedScene {
    /// Baked pipelines, layouts and the shared sampler.
    pub pipelines: PipelineSet,
    /// GPU resources of every drawable.
    pub scene: GpuScene,
    /// Light variables.
    pub lighting: LightDocument,
    /// Camera slots.
    pub cameras: CameraDocument,
    /// Scene-graph entities, in the order of [`GpuScene::entities`].
    pub entities: Vec<Entity>,
}

struct BuiltinGeometry {
    cube: GpuMesh,
    pyramid: GpuMesh,
    terrain: GpuMesh,
    skybox: Option<GpuMesh>,
    menu_object: Option<GpuMesh>,
    crate_texture: Option<CpuTexture>,
    skybox_texture: Option<CpuTexture>,
}

struct Documents {
    lighting: LightDocument,
    cameras: CameraDocument,
}

enum PendingTexture {
    Untextured,
    Decoded { key: String, image: Arc<CpuTexture> },
    Missing,
}

struct EntityAssets {
    entity: Entity,
    mesh: Option<Arc<GpuMesh>>,
    texture: PendingTexture,
}

fn join<T>(handle: ScopedJoinHandle<'_, T>, task: &'static str) -> Result<T, StartupError> {
    handle.join().map_err(|_| StartupError::TaskPanicked(task))
}

fn upload_failed(label: &str) -> impl FnOnce(ResourceError) -> StartupError + '_ {
    move |source| StartupError::Upload {
        label: label.to_owned(),
        source,
    }
}

/// Loads and uploads the whole scene.
///
/// ## Errors
/// Pipeline and built-in geometry failures are fatal. Configuration and
/// scene-graph asset failures are logged and degrade the scene instead.
pub fn load(device: &dyn GraphicsDevice, settings: &EngineSettings) -> Result<LoadedScene, StartupError> {
    let color_format = device.surface_format().ok_or(StartupError::NoSurface)?;
    log::info!("Loading scene resources...");

    let (pipelines, geometry, documents, assets) = thread::scope(|s| {
        let pipelines = s.spawn(|| PipelineSet::new(device, color_format));
        let geometry = s.spawn(|| load_builtin_geometry(device, settings));
        let documents = s.spawn(|| load_documents(settings));
        let assets = s.spawn(|| load_entity_assets(device, settings));

        let pipelines = join(pipelines, "pipelines")?.map_err(StartupError::Pipelines)?;
        let geometry = join(geometry, "geometry")??;
        let documents = join(documents, "documents")?;
        let assets = join(assets, "entity assets")?;
        Ok::<_, StartupError>((pipelines, geometry, documents, assets))
    })?;

    let white = GpuTexture::upload(device, &pipelines, "White", &CpuTexture::white())
        .map_err(upload_failed("White"))?;
    let crate_texture = geometry
        .crate_texture
        .map(|image| GpuTexture::upload(device, &pipelines, "Crate", &image))
        .transpose()
        .map_err(upload_failed("Crate"))?;
    let skybox_texture = geometry
        .skybox_texture
        .map(|image| GpuTexture::upload(device, &pipelines, "Skybox", &image))
        .transpose()
        .map_err(upload_failed("Skybox"))?;

    let gpu_textures = ResourceCache::<GpuTexture>::new();
    let mut entities = Vec::with_capacity(assets.len());
    let mut gpu_entities = Vec::with_capacity(assets.len());
    for asset in assets {
        let texture = match asset.texture {
            PendingTexture::Untextured => EntityTexture::Untextured,
            PendingTexture::Missing => EntityTexture::Missing,
            PendingTexture::Decoded { key, image } => {
                match gpu_textures.get_or_load(&key, |k| GpuTexture::upload(device, &pipelines, k, &image)) {
                    Some(texture) => EntityTexture::Bound(texture),
                    None => EntityTexture::Missing,
                }
            }
        };
        gpu_entities.push(GpuEntity {
            name: asset.entity.name.clone(),
            mesh: asset.mesh,
            texture,
            transparent: asset.entity.transparent,
        });
        entities.push(asset.entity);
    }

    let mut scene = GpuScene::empty(white);
    scene.cube = Some(geometry.cube);
    scene.pyramid = Some(geometry.pyramid);
    scene.terrain = Some(geometry.terrain);
    scene.skybox = geometry.skybox;
    scene.menu_object = geometry.menu_object;
    scene.crate_texture = crate_texture;
    scene.skybox_texture = skybox_texture;
    scene.entities = gpu_entities;

    log::info!(
        "Scene ready: {} entities, {} distinct entity textures",
        scene.entities.len(),
        gpu_textures.len()
    );
    Ok(LoadedScene {
        pipelines,
        scene,
        lighting: documents.lighting,
        cameras: documents.cameras,
        entities,
    })
}

fn load_builtin_geometry(device: &dyn GraphicsDevice, settings: &EngineSettings) -> Result<BuiltinGeometry, StartupError> {
    let cube = GpuMesh::upload(device, "Cube", &cube_mesh()).map_err(upload_failed("Cube"))?;
    let pyramid = GpuMesh::upload(device, "Pyramid", &pyramid_mesh()).map_err(upload_failed("Pyramid"))?;

    let heightmap = load_heightmap(settings);
    let resolution = settings.terrain_resolution;
    let grid = build_terrain_grid(&heightmap, resolution, resolution);
    let terrain = GpuMesh::upload(device, "Terrain", &grid).map_err(upload_failed("Terrain"))?;

    let skybox = load_obj(device, "Skybox", &settings.resolve(&settings.skybox_mesh))?;
    let menu_object = load_obj(device, "Menu Object", &settings.resolve(&settings.menu_mesh))?;

    Ok(BuiltinGeometry {
        cube,
        pyramid,
        terrain,
        skybox,
        menu_object,
        crate_texture: decode_texture(&settings.resolve(&settings.crate_texture)),
        skybox_texture: decode_texture(&settings.resolve(&settings.skybox_texture)),
    })
}

fn load_heightmap(settings: &EngineSettings) -> Heightmap {
    let size = settings.heightmap_size;
    let path = settings.resolve(&settings.heightmap);
    match HeightmapLoaderLane::square(size, settings.heightmap_scale).load_file(&path) {
        Ok(heightmap) => heightmap,
        Err(e) => {
            log::warn!("{e}; using a flat terrain");
            Heightmap::flat(size, size)
        }
    }
}

/// Decodes an OBJ file, uploading it when it parses.
fn load_obj(device: &dyn GraphicsDevice, label: &str, path: &Path) -> Result<Option<GpuMesh>, StartupError> {
    match ObjLoaderLane.load_file(path) {
        Ok(mesh) => GpuMesh::upload(device, label, &mesh)
            .map(Some)
            .map_err(upload_failed(label)),
        Err(e) => {
            log::warn!("{label} mesh unavailable: {e}");
            Ok(None)
        }
    }
}

fn decode_texture(path: &Path) -> Option<CpuTexture> {
    TextureLoaderLane
        .load_file(path)
        .map_err(|e| log::warn!("Texture '{}' unavailable: {e}", path.display()))
        .ok()
}

fn load_documents(settings: &EngineSettings) -> Documents {
    Documents {
        lighting: LightDocument::load_or_default(settings.resolve(&settings.light_document)),
        cameras: CameraDocument::load_or_default(settings.resolve(&settings.camera_document)),
    }
}

/// Loads every entity's mesh and texture, one worker per entity.
///
/// Entities sharing a path share one load through the caches.
fn load_entity_assets(device: &dyn GraphicsDevice, settings: &EngineSettings) -> Vec<EntityAssets> {
    let document = SceneGraphDocument::load_or_default(settings.resolve(&settings.scene_document));
    let meshes = ResourceCache::<GpuMesh>::new();
    let textures = ResourceCache::<CpuTexture>::new();

    let assets: Vec<EntityAssets> = thread::scope(|s| {
        let handles: Vec<_> = document
            .game_objects
            .iter()
            .map(Entity::from_record)
            .map(|entity| {
                let (meshes, textures) = (&meshes, &textures);
                s.spawn(move || load_entity(device, settings, meshes, textures, entity))
            })
            .collect();
        handles
            .into_iter()
            .filter_map(|handle| match handle.join() {
                Ok(assets) => Some(assets),
                Err(_) => {
                    log::error!("An entity loader panicked; the entity is dropped");
                    None
                }
            })
            .collect()
    });

    log::debug!(
        "Scene graph: {} entities, {} meshes, {} textures requested",
        assets.len(),
        meshes.len(),
        textures.len()
    );
    assets
}

fn load_entity(
    device: &dyn GraphicsDevice,
    settings: &EngineSettings,
    meshes: &ResourceCache<GpuMesh>,
    textures: &ResourceCache<CpuTexture>,
    entity: Entity,
) -> EntityAssets {
    let mesh = meshes.get_or_load(&entity.mesh_path, |key| -> anyhow::Result<GpuMesh> {
        let data = ObjLoaderLane.load_file(&settings.resolve(key))?;
        Ok(GpuMesh::upload(device, key, &data)?)
    });

    let texture = match entity.texture.path() {
        None => PendingTexture::Untextured,
        Some(key) => match textures.get_or_load(key, |k| TextureLoaderLane.load_file(&settings.resolve(k))) {
            Some(image) => PendingTexture::Decoded {
                key: key.to_owned(),
                image,
            },
            None => PendingTexture::Missing,
        },
    };

    EntityAssets { entity, mesh, texture }
}
