//! Galaxy Backdrop
//!
//! Opens a window and animates the galaxy scene behind it.

use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

use backdrop_core::{GateDecision, TickReport};
use backdrop_input::PointerState;
use backdrop_render::{ListenerKind, SurfaceMode};
use galaxy_backdrop::config::AppConfig;
use galaxy_backdrop::systems::{FrameAction, FrameOutcome, RenderSystem, SimulationSystem, WindowSystem};

/// Everything that lives between `start` and `stop`
struct Mount {
    simulation: SimulationSystem,
    render: RenderSystem,
}

/// Frames presented over the last second
struct FrameStats {
    frames: u32,
    since: Instant,
    fps: f32,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            frames: 0,
            since: Instant::now(),
            fps: 0.0,
        }
    }

    /// Count a frame; true once per second when `fps` was refreshed
    fn record(&mut self, now: Instant) -> bool {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.since).as_secs_f32();
        if elapsed < 1.0 {
            return false;
        }
        self.fps = self.frames as f32 / elapsed;
        self.frames = 0;
        self.since = now;
        true
    }
}

/// Main application state
struct App {
    config: AppConfig,
    window: Option<WindowSystem>,
    mount: Option<Mount>,
    stats: FrameStats,
}

impl App {
    fn new(config: AppConfig) -> Self {
        Self {
            config,
            window: None,
            mount: None,
            stats: FrameStats::new(),
        }
    }

    /// Resolve the device, build the scene and start the surface
    fn mount(&mut self) {
        let Some(window) = &self.window else {
            return;
        };
        if self.mount.is_some() {
            return;
        }

        let profile = window.resolve_profile(&self.config.device);
        let simulation = SimulationSystem::new(profile, &self.config);
        let render = RenderSystem::start(window.window().clone(), &simulation, &self.config);
        log::info!(
            "Mounted backdrop: {} tier, {} (viewport {}x{})",
            profile.tier(),
            render.mode(),
            profile.viewport.width,
            profile.viewport.height
        );

        if render.mode() != SurfaceMode::Unavailable {
            window.request_redraw();
        }
        self.mount = Some(Mount { simulation, render });
        self.stats = FrameStats::new();
    }

    fn unmount(&mut self) {
        if let Some(mut mount) = self.mount.take() {
            mount.render.stop();
            log::info!("Unmounted backdrop");
        }
    }

    fn remount(&mut self) {
        self.unmount();
        self.mount();
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(mount)) = (&self.window, &mut self.mount) else {
            return;
        };
        let now = Instant::now();

        let outcome = match mount.render.mode() {
            SurfaceMode::Animated => mount.simulation.update(now),
            // The gradient is redrawn on demand but never animated
            SurfaceMode::StaticGradient => FrameOutcome {
                decision: GateDecision::Frozen,
                report: TickReport::default(),
            },
            SurfaceMode::Unavailable => return,
        };
        if !outcome.wants_redraw() {
            return;
        }

        match mount.render.render_frame(&mount.simulation, outcome) {
            FrameAction::Continue => {}
            FrameAction::Retry => window.request_redraw(),
            FrameAction::Exit => {
                event_loop.exit();
                return;
            }
        }

        if self.config.debug.show_stats && self.stats.record(now) {
            let status = if mount.simulation.gate().reduced_motion() {
                "reduced motion".to_string()
            } else {
                mount.render.mode().to_string()
            };
            window.update_title(&mount.simulation.profile(), self.stats.fps, &status);
        }

        // A frozen frame only needs a successor while the scroll debounce is pending
        let animating = mount.render.mode().is_animated()
            && (outcome.decision == GateDecision::Run || mount.simulation.gate().is_scrolling());
        if animating {
            window.request_redraw();
        }
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, key: KeyCode) {
        match key {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::KeyR => {
                log::info!("Remounting backdrop");
                self.remount();
            }
            KeyCode::KeyF => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            KeyCode::KeyM => {
                if let Some(mount) = &mut self.mount {
                    let enabled = !mount.simulation.gate().reduced_motion();
                    mount.simulation.set_reduced_motion(enabled);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            match WindowSystem::create(event_loop, &self.config.window) {
                Ok(window) => self.window = Some(window),
                Err(e) => {
                    log::error!("{}", e);
                    event_loop.exit();
                    return;
                }
            }
        }
        self.mount();
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.unmount();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let now = Instant::now();
        match event {
            WindowEvent::CloseRequested => {
                self.unmount();
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                let (Some(window), Some(mount)) = (&self.window, &mut self.mount) else {
                    return;
                };
                if mount.render.listens(ListenerKind::Resize) {
                    mount.render.resize(physical_size, window.window().scale_factor());
                }
                let restored = mount.render.listens(ListenerKind::Visibility)
                    && mount.simulation.on_resized(physical_size);
                if restored || mount.render.mode() == SurfaceMode::StaticGradient {
                    window.request_redraw();
                }
            }

            WindowEvent::Occluded(occluded) => {
                let (Some(window), Some(mount)) = (&self.window, &mut self.mount) else {
                    return;
                };
                if mount.render.listens(ListenerKind::Visibility) && mount.simulation.on_occluded(occluded) {
                    window.request_redraw();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let (Some(window), Some(mount)) = (&self.window, &mut self.mount) else {
                    return;
                };
                if !mount.render.listens(ListenerKind::Pointer) {
                    return;
                }
                if let Some(sample) = PointerState::from_cursor(position, window.window().inner_size()) {
                    mount.simulation.on_pointer(sample, now);
                }
            }

            WindowEvent::MouseWheel { .. } => {
                let (Some(window), Some(mount)) = (&self.window, &mut self.mount) else {
                    return;
                };
                if mount.render.listens(ListenerKind::Scroll) {
                    mount.simulation.on_scroll(now);
                    window.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.handle_key(event_loop, key);
                }
            }

            WindowEvent::RedrawRequested => self.frame(event_loop),

            _ => {}
        }
    }
}

fn main() {
    let config = AppConfig::load();

    let default_level = match &config {
        Ok(config) => config.debug.log_level.clone(),
        Err(_) => "info".to_string(),
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let config = config.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });
    log::info!("Starting {}", config.window.title);

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
