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

use std::sync::Arc;

use crate::renderer::api::TextureViewId;
use crate::renderer::error::RenderError;
use crate::renderer::traits::{CommandEncoder, GraphicsDevice};

/// The attachments of the frame being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTargets {
    /// The view of the acquired surface image.
    pub color: TextureViewId,
    /// The depth buffer matching the surface size.
    pub depth: TextureViewId,
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
}

/// The callback that records a frame's commands.
pub type FrameRecorder<'a> =
    dyn FnMut(&mut dyn CommandEncoder, &FrameTargets) -> Result<(), RenderError> + 'a;

/// Trait representing a render system bound to one presentation surface.
pub trait RenderSystem: std::fmt::Debug {
    /// Reconfigures the surface and depth buffer. Zero sizes are ignored.
    fn resize(&mut self, new_width: u32, new_height: u32);

    /// Returns the current surface size in pixels.
    fn surface_size(&self) -> (u32, u32);

    /// Acquires the next surface image, lets `record` fill an encoder, then
    /// submits and presents.
    ///
    /// A failure inside `record` drops the frame without presenting.
    fn render_frame(&mut self, record: &mut FrameRecorder<'_>) -> Result<(), RenderError>;

    /// Returns the device used by this render system, for resource creation.
    fn graphics_device(&self) -> Arc<dyn GraphicsDevice>;

    /// Releases per-surface resources.
    fn shutdown(&mut self);
}
