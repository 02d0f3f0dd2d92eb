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

//! The per-frame scene state machine.
//!
//! Input snapshots flow into the [`FrameDriver`], which mutates the
//! [`VisualMode`] flags, the [`CameraRig`] and the animated transforms. The
//! resulting [`FrameState`] is then read, never written, by the render lanes.

#![warn(missing_docs)]

pub mod controller;
pub mod driver;
pub mod hud;
pub mod menu;
pub mod mode;
pub mod presets;
pub mod rig;

pub use controller::{ControlSettings, SceneController, SceneOutcome};
pub use driver::{ExecutionPhase, FrameDriver, FrameRequest, FrameState, PrimitiveTransforms};
pub use hud::{IndicatorKey, KeyIndicators};
pub use menu::{MainMenu, MenuAction, MenuSelection};
pub use mode::VisualMode;
pub use presets::{PresetBundle, PRESET_BUNDLES};
pub use rig::{CameraRig, CAMERA_SLOTS, DEBUG_SLOT};
