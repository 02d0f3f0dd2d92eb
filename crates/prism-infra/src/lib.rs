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

//! Concrete backends for the contracts defined in `prism-core`.
//!
//! The `graphics` module drives the GPU through `wgpu`; the `platform` module
//! owns the `winit` window and turns raw window events into the per-frame
//! [`InputSnapshot`](prism_core::platform::InputSnapshot).

#[cfg(feature = "graphics")]
pub mod graphics;
#[cfg(feature = "platform")]
pub mod platform;

#[cfg(feature = "graphics")]
pub use graphics::wgpu::{WgpuDevice, WgpuRenderSystem};
#[cfg(feature = "platform")]
pub use platform::input::InputTracker;
#[cfg(feature = "platform")]
pub use platform::window::{WinitWindow, WinitWindowBuilder};
