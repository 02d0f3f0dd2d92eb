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

//! The entry point of the Prism showcase.
//!
//! [`Engine::run`] opens the window, loads every resource in parallel, then
//! drives one Update then Draw step per redraw until the window closes or the
//! menu's "Exit" entry is confirmed.

pub mod frame;
pub mod startup;
pub mod video;

pub use prism_data::config::EngineSettings;
pub use startup::{LoadedScene, StartupError};

use anyhow::{Context, Result};
use prism_control::{CameraRig, ControlSettings, FrameDriver, FrameRequest, FrameState};
use prism_core::math::{LinearRgba, Mat4};
use prism_core::renderer::{CommandEncoder, FrameTargets, GraphicsDevice, RenderSystem};
use prism_infra::{InputTracker, WgpuRenderSystem, WinitWindow, WinitWindowBuilder};
use prism_lanes::render_lane::LightingTerms;
use prism_lanes::{FrameSequencer, GpuScene};
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::WindowId;

/// Systems that exist once startup has succeeded.
struct Runtime {
    driver: FrameDriver,
    sequencer: FrameSequencer,
    scene: GpuScene,
    device: Arc<dyn GraphicsDevice>,
}

/// The state of the running engine, managed by the winit event loop.
struct EngineState {
    settings: EngineSettings,
    window: Option<WinitWindow>,
    renderer: Option<Box<dyn RenderSystem>>,
    runtime: Option<Runtime>,
    tracker: InputTracker,
    last_frame: Option<Instant>,
    entity_worlds: Vec<Mat4>,
    error: Option<anyhow::Error>,
}

impl EngineState {
    fn new(settings: EngineSettings) -> Self {
        Self {
            settings,
            window: None,
            renderer: None,
            runtime: None,
            tracker: InputTracker::new(),
            last_frame: None,
            entity_worlds: Vec::new(),
            error: None,
        }
    }

    fn initialize(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let settings = &self.settings;
        let window = WinitWindowBuilder::new()
            .with_title(settings.window_title.clone())
            .with_dimensions(settings.window_width, settings.window_height)
            .build(event_loop)
            .context("failed to create the main window")?;

        let renderer: Box<dyn RenderSystem> = Box::new(
            WgpuRenderSystem::new(window.handle()).context("failed to initialize the renderer")?,
        );
        let device = renderer.graphics_device();

        let loaded = startup::load(device.as_ref(), settings).context("failed to load the scene")?;

        let (width, height) = renderer.surface_size();
        let aspect_ratio = width.max(1) as f32 / height.max(1) as f32;
        let rig = CameraRig::from_document(&loaded.cameras, aspect_ratio);
        let driver = FrameDriver::new(
            FrameState::new(rig, loaded.entities),
            ControlSettings::from(settings),
            settings.window_title.clone(),
        );
        let sequencer = FrameSequencer::new(
            device.as_ref(),
            loaded.pipelines,
            LightingTerms::from(&loaded.lighting),
            settings.pixelation_amount,
            LinearRgba::from(settings.clear_color),
        )
        .context("failed to create the frame sequencer")?;

        self.runtime = Some(Runtime {
            driver,
            sequencer,
            scene: loaded.scene,
            device,
        });
        self.renderer = Some(renderer);
        self.window = Some(window);
        Ok(())
    }

    /// One Update then Draw step.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(renderer), Some(runtime)) =
            (self.window.as_ref(), self.renderer.as_mut(), self.runtime.as_mut())
        else {
            return;
        };

        let now = Instant::now();
        let dt = self
            .last_frame
            .replace(now)
            .map_or(0.0, |last| now.duration_since(last).as_secs_f32());

        let input = self.tracker.snapshot();
        for request in runtime.driver.update(&input, dt) {
            match request {
                FrameRequest::WarpCursor(position) => {
                    window.warp_cursor(position);
                    self.tracker.set_cursor(position);
                }
                FrameRequest::Quit => {
                    log::info!("Exit selected, closing...");
                    event_loop.exit();
                }
                FrameRequest::PlayVideo => {
                    video::launch(&self.settings.resolve(&self.settings.tutorial_video));
                }
            }
        }

        let Runtime {
            driver,
            sequencer,
            scene,
            device,
        } = runtime;
        let overlay = driver.overlay();
        frame::collect_entity_worlds(driver.state(), &mut self.entity_worlds);
        let view = frame::frame_view(driver.state(), &self.entity_worlds, Some(&overlay));

        let result = renderer.render_frame(
            &mut |encoder: &mut dyn CommandEncoder, targets: &FrameTargets| {
                sequencer.record(&**device, encoder, targets, &view, &*scene)
            },
        );
        match result {
            Ok(()) => log::trace!("Frame presented (dt = {:.4}s)", dt),
            Err(e) => log::error!("Rendering error: {e}"),
        }

        driver.finish_frame();
    }
}

impl Drop for EngineState {
    fn drop(&mut self) {
        self.runtime = None;
        if let Some(mut renderer) = self.renderer.take() {
            renderer.shutdown();
        }
        log::info!("Engine systems shutdown complete.");
    }
}

impl ApplicationHandler for EngineState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.error.is_some() {
            return;
        }

        log::info!("Application resumed. Initializing window and engine systems...");
        if let Err(e) = self.initialize(event_loop) {
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        if self.window.as_ref().map(WinitWindow::id) != Some(id) {
            return;
        }
        if self.tracker.handle_window_event(&event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Shutdown requested, exiting event loop...");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                log::info!("Window resized to: {}x{}", size.width, size.height);
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
                if let Some(runtime) = self.runtime.as_mut() {
                    runtime.driver.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// The public entry point of the showcase.
pub struct Engine;

impl Engine {
    /// Opens the window and runs the frame loop until the application quits.
    ///
    /// ## Errors
    /// Returns the first fatal error: event loop creation, window or device
    /// creation, shader compilation or GPU resource creation.
    pub fn run(settings: EngineSettings) -> Result<()> {
        log::info!("Prism: starting '{}'", settings.window_title);
        let event_loop = EventLoop::new().context("failed to create the event loop")?;

        let mut state = EngineState::new(settings);
        event_loop.run_app(&mut state)?;

        match state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
