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

//! Hot-path execution pipelines.
//!
//! Asset lanes turn raw file bytes into CPU-side meshes, textures and
//! heightmaps. Render lanes turn a read-only view of the frame into GPU
//! commands through the `prism-core` renderer traits, without knowing which
//! backend sits behind them.

#![warn(missing_docs)]

pub mod asset_lane;
pub mod render_lane;

pub use asset_lane::{AssetError, AssetLoaderLane};
pub use render_lane::{FramePhase, FrameSequencer, FrameView, GpuScene, PipelineSet};
