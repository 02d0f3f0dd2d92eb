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

//! A `winit` window wrapper and its builder.

use std::sync::Arc;

use prism_core::math::Vec2;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::error::OsError;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

/// A cheaply clonable handle to the application window.
#[derive(Debug, Clone)]
pub struct WinitWindow {
    inner: Arc<Window>,
}

/// A builder for creating [`WinitWindow`] instances.
pub struct WinitWindowBuilder {
    title: String,
    width: u32,
    height: u32,
    maximized: bool,
}

impl WinitWindowBuilder {
    pub fn new() -> Self {
        Self {
            title: "Prism".to_string(),
            width: 1920,
            height: 1080,
            maximized: true,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial logical inner size.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_maximized(mut self, maximized: bool) -> Self {
        self.maximized = maximized;
        self
    }

    /// Builds the window on the active event loop.
    ///
    /// # Errors
    /// Returns an `OsError` if the underlying `winit` window creation fails.
    pub fn build(self, event_loop: &ActiveEventLoop) -> Result<WinitWindow, OsError> {
        log::info!(
            "Building window with title: '{}' and size: {}x{}",
            self.title,
            self.width,
            self.height
        );

        let window_attributes = Window::default_attributes()
            .with_title(self.title)
            .with_inner_size(LogicalSize::new(self.width, self.height))
            .with_maximized(self.maximized)
            .with_visible(true);

        let window = event_loop.create_window(window_attributes)?;

        log::info!("Winit window created successfully (id: {:?}).", window.id());
        Ok(WinitWindow {
            inner: Arc::new(window),
        })
    }
}

impl Default for WinitWindowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WinitWindow {
    /// Returns the physical dimensions (width, height) of the inner area.
    pub fn inner_size(&self) -> (u32, u32) {
        let size = self.inner.inner_size();
        (size.width, size.height)
    }

    pub fn id(&self) -> WindowId {
        self.inner.id()
    }

    pub fn request_redraw(&self) {
        self.inner.request_redraw();
    }

    /// Returns a shared handle for surface creation.
    pub fn handle(&self) -> Arc<Window> {
        self.inner.clone()
    }

    /// Moves the cursor to `position`, in physical pixels of the inner area.
    ///
    /// Platforms that forbid cursor warping (Wayland) only log the refusal.
    pub fn warp_cursor(&self, position: Vec2) {
        let target = PhysicalPosition::new(position.x as f64, position.y as f64);
        if let Err(e) = self.inner.set_cursor_position(target) {
            log::debug!("Cursor warp refused by the platform: {e}");
        }
    }
}
