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

//! Startup loading against a device that only hands out ids.

use prism_core::renderer::*;
use prism_data::config::EngineSettings;
use prism_lanes::render_lane::EntityTexture;
use prism_sdk::startup::{load, StartupError};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct CountingDevice {
    next_id: AtomicUsize,
    fail_shaders: bool,
    no_surface: bool,
    buffer_labels: Mutex<Vec<String>>,
    texture_labels: Mutex<Vec<String>>,
}

impl CountingDevice {
    fn next(&self) -> usize {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn buffers_labelled(&self, label: &str) -> usize {
        self.buffer_labels.lock().unwrap().iter().filter(|l| *l == label).count()
    }

    fn textures_labelled(&self, label: &str) -> usize {
        self.texture_labels.lock().unwrap().iter().filter(|l| *l == label).count()
    }

    fn record_buffer(&self, d: &BufferDescriptor) -> BufferId {
        let label = d.label.as_deref().unwrap_or_default().to_owned();
        self.buffer_labels.lock().unwrap().push(label);
        BufferId(self.next())
    }
}

impl GraphicsDevice for CountingDevice {
    fn create_shader_module(&self, _d: &ShaderModuleDescriptor) -> Result<ShaderModuleId, ResourceError> {
        if self.fail_shaders {
            return Err(ShaderError::CompilationError {
                label: "scene".to_owned(),
                details: "expected ';'".to_owned(),
            }
            .into());
        }
        Ok(ShaderModuleId(self.next()))
    }

    fn create_bind_group_layout(&self, _d: &BindGroupLayoutDescriptor) -> Result<BindGroupLayoutId, ResourceError> {
        Ok(BindGroupLayoutId(self.next()))
    }

    fn create_bind_group(&self, _d: &BindGroupDescriptor) -> Result<BindGroupId, ResourceError> {
        Ok(BindGroupId(self.next()))
    }

    fn create_pipeline_layout(&self, _d: &PipelineLayoutDescriptor) -> Result<PipelineLayoutId, ResourceError> {
        Ok(PipelineLayoutId(self.next()))
    }

    fn create_render_pipeline(&self, _d: &RenderPipelineDescriptor) -> Result<RenderPipelineId, ResourceError> {
        Ok(RenderPipelineId(self.next()))
    }

    fn create_buffer(&self, d: &BufferDescriptor) -> Result<BufferId, ResourceError> {
        Ok(self.record_buffer(d))
    }

    fn create_buffer_with_data(&self, d: &BufferDescriptor, _data: &[u8]) -> Result<BufferId, ResourceError> {
        Ok(self.record_buffer(d))
    }

    fn write_buffer(&self, _id: BufferId, _offset: u64, _data: &[u8]) -> Result<(), ResourceError> {
        Ok(())
    }

    fn destroy_buffer(&self, _id: BufferId) -> Result<(), ResourceError> {
        Ok(())
    }

    fn destroy_bind_group(&self, _id: BindGroupId) -> Result<(), ResourceError> {
        Ok(())
    }

    fn create_texture_with_data(&self, d: &TextureDescriptor, _data: &[u8]) -> Result<TextureId, ResourceError> {
        let label = d.label.as_deref().unwrap_or_default().to_owned();
        self.texture_labels.lock().unwrap().push(label);
        Ok(TextureId(self.next()))
    }

    fn create_texture(&self, _d: &TextureDescriptor) -> Result<TextureId, ResourceError> {
        Ok(TextureId(self.next()))
    }

    fn create_texture_view(&self, _texture: TextureId) -> Result<TextureViewId, ResourceError> {
        Ok(TextureViewId(self.next()))
    }

    fn destroy_texture_view(&self, _id: TextureViewId) -> Result<(), ResourceError> {
        Ok(())
    }

    fn destroy_texture(&self, _id: TextureId) -> Result<(), ResourceError> {
        Ok(())
    }

    fn create_sampler(&self, _d: &SamplerDescriptor) -> Result<SamplerId, ResourceError> {
        Ok(SamplerId(self.next()))
    }

    fn create_command_encoder(&self, _label: Option<&str>) -> Box<dyn CommandEncoder> {
        unreachable!("startup records no commands")
    }

    fn submit_command_buffer(&self, _command_buffer: CommandBufferId) {}

    fn surface_format(&self) -> Option<TextureFormat> {
        (!self.no_surface).then_some(TextureFormat::Bgra8UnormSrgb)
    }

    fn supports_feature(&self, feature_name: &str) -> bool {
        feature_name == FEATURE_POLYGON_MODE_LINE
    }

    fn min_uniform_buffer_offset_alignment(&self) -> u32 {
        256
    }
}

const TRIANGLE_OBJ: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nf 1/1 2/2 3/3\n";

fn settings_in(root: &Path) -> EngineSettings {
    EngineSettings {
        asset_root: root.to_path_buf(),
        terrain_resolution: 8,
        heightmap_size: 4,
        ..EngineSettings::default()
    }
}

fn write(root: &Path, relative: &str, bytes: &[u8]) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, bytes).unwrap();
}

fn write_png(root: &Path, relative: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    image::RgbaImage::from_pixel(2, 2, image::Rgba([200, 10, 10, 255]))
        .save(path)
        .unwrap();
}

fn entity_json(id: i32, name: &str, mesh: &str, texture: &str) -> String {
    format!(
        r#"{{"OBJfilepath":"{mesh}","TEXfilepath":"{texture}",
            "position":{{"x":{id},"y":0,"z":0}},"rotation":{{"x":0,"y":0,"z":0}},
            "scale":{{"x":1,"y":1,"z":1}},"id":{id},"Name":"{name}"}}"#
    )
}

#[test]
fn test_empty_asset_root_degrades_to_builtin_scene() {
    let dir = tempfile::tempdir().unwrap();
    let device = CountingDevice::default();

    let loaded = load(&device, &settings_in(dir.path())).unwrap();

    assert!(loaded.scene.cube.is_some());
    assert!(loaded.scene.pyramid.is_some());
    assert!(loaded.scene.terrain.is_some());
    assert!(loaded.scene.skybox.is_none());
    assert!(loaded.scene.menu_object.is_none());
    assert!(loaded.scene.crate_texture.is_none());
    assert!(loaded.scene.skybox_texture.is_none());
    assert!(loaded.scene.entities.is_empty());
    assert!(loaded.entities.is_empty());
    assert_eq!(device.textures_labelled("White"), 1);
}

#[test]
fn test_shared_assets_are_loaded_once() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    write(root, "Models/box.obj", TRIANGLE_OBJ.as_bytes());
    write(root, "Models/InvertedCube.obj", TRIANGLE_OBJ.as_bytes());
    write_png(root, "Textures/stone.png");
    write_png(root, "Textures/Crate_COLOR.png");

    let entities = [
        entity_json(1, "Well", "Models/box.obj", "Textures/stone.png"),
        entity_json(2, "Tower", "Models/box.obj", "Textures/stone.png"),
        entity_json(3, "Glass", "Models/box.obj", "NULL"),
        entity_json(4, "Statue", "Models/box.obj", "Textures/missing.png"),
        entity_json(5, "Ghost", "Models/missing.obj", "NULL"),
    ];
    let document = format!(r#"{{"GameObjects":[{}]}}"#, entities.join(","));
    write(root, "JSON Files/Scene Graph.json", document.as_bytes());

    let device = CountingDevice::default();
    let loaded = load(&device, &settings_in(root)).unwrap();

    let names: Vec<_> = loaded.entities.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, ["Well", "Tower", "Glass", "Statue", "Ghost"]);
    let gpu = &loaded.scene.entities;
    assert_eq!(gpu.len(), 5);

    assert_eq!(device.buffers_labelled("Models/box.obj Vertices"), 1);
    assert!(Arc::ptr_eq(gpu[0].mesh.as_ref().unwrap(), gpu[3].mesh.as_ref().unwrap()));
    assert!(gpu[4].mesh.is_none());

    assert_eq!(device.textures_labelled("Textures/stone.png"), 1);
    match (&gpu[0].texture, &gpu[1].texture) {
        (EntityTexture::Bound(a), EntityTexture::Bound(b)) => assert!(Arc::ptr_eq(a, b)),
        other => panic!("expected shared texture, got {other:?}"),
    }
    assert_eq!(gpu[2].texture, EntityTexture::Untextured);
    assert!(gpu[2].transparent);
    assert_eq!(gpu[3].texture, EntityTexture::Missing);

    assert!(loaded.scene.skybox.is_some());
    assert!(loaded.scene.crate_texture.is_some());
}

#[test]
fn test_shader_failure_aborts_startup() {
    let dir = tempfile::tempdir().unwrap();
    let device = CountingDevice {
        fail_shaders: true,
        ..CountingDevice::default()
    };

    let err = load(&device, &settings_in(dir.path())).unwrap_err();
    assert!(matches!(err, StartupError::Pipelines(_)));
    let source = std::error::Error::source(&err).unwrap().to_string();
    assert!(source.contains("expected ';'"), "{source}");
}

#[test]
fn test_missing_surface_aborts_startup() {
    let dir = tempfile::tempdir().unwrap();
    let device = CountingDevice {
        no_surface: true,
        ..CountingDevice::default()
    };

    let err = load(&device, &settings_in(dir.path())).unwrap_err();
    assert!(matches!(err, StartupError::NoSurface));
}
