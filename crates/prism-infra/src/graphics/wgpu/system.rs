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

//! The concrete, `wgpu`-based implementation of the [`RenderSystem`] trait.

use std::borrow::Cow;
use std::sync::{Arc, Mutex};

use prism_core::renderer::{
    FrameRecorder, FrameTargets, GraphicsDevice, RenderError, RenderSystem, TextureDescriptor,
    TextureFormat, TextureId, TextureUsage, TextureViewId,
};
use winit::window::Window;

use super::context::WgpuGraphicsContext;
use super::device::WgpuDevice;

/// Drives one window surface: swapchain, depth buffer and frame submission.
#[derive(Debug)]
pub struct WgpuRenderSystem {
    graphics_context: Arc<Mutex<WgpuGraphicsContext>>,
    device: Arc<WgpuDevice>,
    current_width: u32,
    current_height: u32,
    frame_count: u64,
    current_frame_view_id: Option<TextureViewId>,

    // --- Depth Buffer Resources ---
    depth_texture: Option<TextureId>,
    depth_texture_view: Option<TextureViewId>,
}

impl WgpuRenderSystem {
    /// Creates the graphics context for `window` and the depth buffer matching
    /// its size. Blocks until the adapter and device are ready.
    ///
    /// ## Errors
    /// * `RenderError::InitializationFailed` if no adapter, device or surface
    ///   can be created.
    pub fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        log::info!("WgpuRenderSystem: Initializing...");
        let context = pollster::block_on(WgpuGraphicsContext::new(window))
            .map_err(|e| RenderError::InitializationFailed(format!("{e:#}")))?;

        let (current_width, current_height) = context.get_size();
        log::info!(
            "WgpuRenderSystem: GraphicsContext created on '{}' ({:?}) with size: {}x{}",
            context.adapter_name,
            context.adapter_backend,
            current_width,
            current_height
        );

        let graphics_context = Arc::new(Mutex::new(context));
        let device = Arc::new(WgpuDevice::new(graphics_context.clone()));

        let mut system = Self {
            graphics_context,
            device,
            current_width,
            current_height,
            frame_count: 0,
            current_frame_view_id: None,
            depth_texture: None,
            depth_texture_view: None,
        };
        system.create_depth_texture()?;
        Ok(system)
    }

    /// (Re)creates the depth texture at the current surface size.
    fn create_depth_texture(&mut self) -> Result<(), RenderError> {
        if self.current_width == 0 || self.current_height == 0 {
            return Ok(());
        }

        if let Some(old_view) = self.depth_texture_view.take() {
            let _ = self.device.destroy_texture_view(old_view);
        }
        if let Some(old_texture) = self.depth_texture.take() {
            let _ = self.device.destroy_texture(old_texture);
        }

        let texture_id = self
            .device
            .create_texture(&TextureDescriptor {
                label: Some(Cow::Borrowed("Depth Texture")),
                width: self.current_width,
                height: self.current_height,
                format: TextureFormat::Depth32Float,
                usage: TextureUsage::RENDER_ATTACHMENT,
            })
            .map_err(|e| {
                RenderError::InitializationFailed(format!("Failed to create depth texture: {e}"))
            })?;
        let view_id = self.device.create_texture_view(texture_id).map_err(|e| {
            RenderError::InitializationFailed(format!("Failed to create depth texture view: {e}"))
        })?;

        self.depth_texture = Some(texture_id);
        self.depth_texture_view = Some(view_id);
        log::debug!(
            "WgpuRenderSystem: Depth texture created at {}x{}",
            self.current_width,
            self.current_height
        );
        Ok(())
    }

    /// Acquires the next swapchain image, reconfiguring the surface once if it
    /// was lost or outdated.
    fn acquire_frame(&self) -> Result<wgpu::SurfaceTexture, RenderError> {
        let context = self.graphics_context.lock().map_err(|e| {
            RenderError::SurfaceAcquisitionFailed(format!("Failed to lock context: {e}"))
        })?;
        match context.get_current_texture() {
            Ok(texture) => Ok(texture),
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::warn!(
                    "WgpuRenderSystem: Swapchain surface lost or outdated ({e:?}). Reconfiguring at {}x{}",
                    self.current_width,
                    self.current_height
                );
                context.reconfigure();
                context
                    .get_current_texture()
                    .map_err(|e| RenderError::SurfaceAcquisitionFailed(format!("{e:?}")))
            }
            Err(e) => Err(RenderError::SurfaceAcquisitionFailed(format!("{e:?}"))),
        }
    }
}

impl RenderSystem for WgpuRenderSystem {
    fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width == 0 || new_height == 0 {
            log::debug!("WgpuRenderSystem: Ignoring resize to {new_width}x{new_height}");
            return;
        }
        match self.graphics_context.lock() {
            Ok(mut context) => context.resize(new_width, new_height),
            Err(e) => {
                log::error!("WgpuRenderSystem: Failed to lock context for resize: {e}");
                return;
            }
        }
        self.current_width = new_width;
        self.current_height = new_height;
        if let Err(e) = self.create_depth_texture() {
            log::error!("WgpuRenderSystem: {e}");
        }
    }

    fn surface_size(&self) -> (u32, u32) {
        (self.current_width, self.current_height)
    }

    fn render_frame(&mut self, record: &mut FrameRecorder<'_>) -> Result<(), RenderError> {
        let depth = self.depth_texture_view.ok_or_else(|| {
            RenderError::RenderingFailed("Depth buffer has not been created".to_string())
        })?;

        // --- 1. Acquire Frame from Swap Chain ---
        let output = self.acquire_frame()?;

        // --- 2. Register a view of the swapchain image ---
        if let Some(old_id) = self.current_frame_view_id.take() {
            self.device.destroy_texture_view(old_id)?;
        }
        let color = self
            .device
            .create_texture_view_for_surface(&output.texture, Some("Primary Swap Chain View"))?;
        self.current_frame_view_id = Some(color);

        // --- 3. Record ---
        let targets = FrameTargets {
            color,
            depth,
            width: self.current_width,
            height: self.current_height,
        };
        let mut encoder = self
            .device
            .create_command_encoder(Some("Prism Main Command Encoder"));
        record(encoder.as_mut(), &targets)?;

        // --- 4. Submit and present ---
        let command_buffer = encoder.finish();
        self.device.submit_command_buffer(command_buffer);
        output.present();

        self.frame_count += 1;
        log::trace!("WgpuRenderSystem: Presented frame {}", self.frame_count);
        Ok(())
    }

    fn graphics_device(&self) -> Arc<dyn GraphicsDevice> {
        self.device.clone()
    }

    fn shutdown(&mut self) {
        log::info!(
            "WgpuRenderSystem: Shutting down after {} frames.",
            self.frame_count
        );
        self.device.poll_device_blocking();
        if let Some(view) = self.current_frame_view_id.take() {
            let _ = self.device.destroy_texture_view(view);
        }
        if let Some(view) = self.depth_texture_view.take() {
            let _ = self.device.destroy_texture_view(view);
        }
        if let Some(texture) = self.depth_texture.take() {
            let _ = self.device.destroy_texture(texture);
        }
    }
}
