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

//! Built-in WGSL shader sources, embedded at compile time.
//!
//! Every shader exposes `vs_main` and `fs_main`. The scene, skybox and
//! terrain shaders share the `FramePayload` uniform at `@group(0)`, whose
//! layout must match [`FramePayload`](super::FramePayload).

/// Entry point of every vertex stage.
pub const VERTEX_ENTRY: &str = "vs_main";

/// Entry point of every fragment stage.
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Lit, textured scene geometry with the gooch and texture-space filter paths.
pub const SCENE_WGSL: &str = include_str!("scene.wgsl");

/// The camera-centred sky cube, drawn at the far plane.
pub const SKYBOX_WGSL: &str = include_str!("skybox.wgsl");

/// The heightmap terrain with its position + uv input layout.
pub const TERRAIN_WGSL: &str = include_str!("terrain.wgsl");

/// Screen-space coloured quads for the HUD and menu text.
pub const OVERLAY_WGSL: &str = include_str!("overlay.wgsl");
