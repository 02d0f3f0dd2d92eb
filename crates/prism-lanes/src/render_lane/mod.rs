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

//! Rendering lane: turns a frame view into GPU commands.

pub mod gpu_scene;
pub mod overlay;
pub mod payload;
pub mod pipelines;
pub mod sequencer;
pub mod shaders;

pub use gpu_scene::{EntityTexture, GpuEntity, GpuMesh, GpuScene, GpuTexture};
pub use overlay::{OverlayBatch, OverlayVertex};
pub use payload::{
    FramePayload, LightingTerms, PayloadRing, ShadingFlags, PAYLOAD_SIZE, RING_GROWTH_SLOTS,
};
pub use pipelines::{PipelineSet, DEPTH_FORMAT, TRANSPARENT_BLEND_CONSTANT};
pub use sequencer::{DrawCommand, DrawStage, FramePhase, FrameSequencer, FrameView};
