//! GPU rendering system
//!
//! Thin owner of the [`RenderSurface`] for one mount. Maps frame errors onto
//! what the event loop should do next.

use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use backdrop_render::{ListenerKind, RenderSurface, SurfaceMode, SurfaceOptions};

pub use backdrop_render::RenderError;

use super::simulation::{FrameOutcome, SimulationSystem};
use crate::config::AppConfig;

/// What the event loop should do after a frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameAction {
    Continue,
    /// Surface was reconfigured; draw again next frame
    Retry,
    Exit,
}

/// Manages GPU rendering for the current mount
pub struct RenderSystem {
    surface: RenderSurface,
}

impl RenderSystem {
    /// Start the surface on `window`; GPU problems degrade the mode instead of failing
    pub fn start(window: Arc<Window>, simulation: &SimulationSystem, config: &AppConfig) -> Self {
        let mut surface = RenderSurface::new();
        let options = SurfaceOptions {
            vsync: config.window.vsync,
            background: config.rendering.background_gradient,
        };
        surface.start(window, simulation.scene(), options);
        Self { surface }
    }

    pub fn mode(&self) -> SurfaceMode {
        self.surface.mode().unwrap_or(SurfaceMode::Unavailable)
    }

    /// Whether events of `kind` should reach the simulation
    pub fn listens(&self, kind: ListenerKind) -> bool {
        self.surface.listens(kind)
    }

    /// Handle window resize
    pub fn resize(&mut self, physical: PhysicalSize<u32>, scale_factor: f64) {
        self.surface.resize(physical, scale_factor);
    }

    /// Render a single frame
    pub fn render_frame(&mut self, simulation: &SimulationSystem, outcome: FrameOutcome) -> FrameAction {
        match self.surface.render(simulation.scene(), simulation.camera(), outcome.report) {
            Ok(()) => FrameAction::Continue,
            Err(RenderError::SurfaceLost) => {
                log::warn!("Surface lost, reconfigured");
                FrameAction::Retry
            }
            Err(RenderError::OutOfMemory) => {
                log::error!("GPU out of memory");
                FrameAction::Exit
            }
            Err(e) => {
                log::warn!("{}", e);
                FrameAction::Continue
            }
        }
    }

    /// Tear down the surface; calling it twice is harmless
    pub fn stop(&mut self) {
        self.surface.stop();
    }
}
