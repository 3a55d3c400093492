//! Per-frame backdrop orchestration
//!
//! Owns everything a mount needs between frames:
//! - the scene and its frame gate
//! - pointer throttle, scroll debouncer and visibility tracker
//! - the parallax camera
//!
//! Dropping the system at unmount discards the frame and pointer state, so a
//! remount always starts from the defaults.

use std::time::Instant;

use backdrop_core::{DeviceProfile, FrameGate, GalaxyScene, GateDecision, SystemMask, TickReport};
use backdrop_input::{ParallaxController, PointerState, PointerThrottle, ScrollDebouncer, VisibilityTracker};
use backdrop_render::Camera3D;
use winit::dpi::PhysicalSize;

use crate::config::AppConfig;

/// What one display frame decided and did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameOutcome {
    pub decision: GateDecision,
    pub report: TickReport,
}

impl FrameOutcome {
    /// Suspended frames draw nothing and schedule nothing
    pub fn wants_redraw(&self) -> bool {
        self.decision != GateDecision::Suspended
    }
}

/// Drives the scene from window events and the frame clock
pub struct SimulationSystem {
    scene: GalaxyScene,
    gate: FrameGate,
    pointer: PointerThrottle,
    scroll: ScrollDebouncer,
    visibility: VisibilityTracker,
    parallax: ParallaxController,
    camera: Camera3D,
    last_frame: Option<Instant>,
}

impl SimulationSystem {
    /// Build the scene for `profile` and wire input handling from `config`
    pub fn new(profile: DeviceProfile, config: &AppConfig) -> Self {
        let scene = GalaxyScene::new(profile, config.rendering.seed);
        let tuning = scene.config().camera.clone();
        let settle = scene.config().performance.scroll_settle;

        let camera = Camera3D::new(scene.camera_home(), tuning.fov_degrees)
            .with_clip(config.camera.near, config.camera.far);
        let parallax = ParallaxController::new()
            .with_sensitivity(tuning.sensitivity)
            .with_smoothing(tuning.smoothing);

        Self {
            gate: FrameGate::new().with_reduced_motion(config.accessibility.reduced_motion),
            pointer: PointerThrottle::new(config.input.pointer_throttle()),
            scroll: ScrollDebouncer::new(settle),
            visibility: VisibilityTracker::new(),
            parallax,
            camera,
            scene,
            last_frame: None,
        }
    }

    pub fn scene(&self) -> &GalaxyScene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera3D {
        &self.camera
    }

    pub fn gate(&self) -> &FrameGate {
        &self.gate
    }

    pub fn profile(&self) -> DeviceProfile {
        *self.scene.profile()
    }

    /// Last pointer sample that made it through the throttle
    pub fn pointer(&self) -> PointerState {
        self.pointer.current()
    }

    pub fn on_pointer(&mut self, sample: PointerState, now: Instant) {
        self.pointer.on_sample(sample, now);
    }

    /// Freeze immediately; the debouncer lowers the flag once scrolling settles
    pub fn on_scroll(&mut self, now: Instant) {
        self.scroll.on_scroll(now);
        self.gate.set_scrolling(true);
    }

    /// Returns true when the window just became visible again
    pub fn on_occluded(&mut self, occluded: bool) -> bool {
        let was_visible = self.visibility.is_visible();
        let visible = self.visibility.on_occluded(occluded);
        self.sync_visibility(was_visible, visible)
    }

    /// Returns true when the window just became visible again
    pub fn on_resized(&mut self, size: PhysicalSize<u32>) -> bool {
        let was_visible = self.visibility.is_visible();
        let visible = self.visibility.on_resized(size);
        self.sync_visibility(was_visible, visible)
    }

    fn sync_visibility(&mut self, was_visible: bool, visible: bool) -> bool {
        self.gate.set_visible(visible);
        if !visible {
            // Time spent hidden is not animation time
            self.last_frame = None;
        }
        visible && !was_visible
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.gate.set_reduced_motion(enabled);
        log::info!("Reduced motion {}", if enabled { "on" } else { "off" });
    }

    /// Run one display frame at `now`
    pub fn update(&mut self, now: Instant) -> FrameOutcome {
        let dt = self
            .last_frame
            .map(|last| now.saturating_duration_since(last).as_secs_f32())
            .unwrap_or(0.0);

        let scrolling = self.scroll.poll(now);
        self.gate.set_scrolling(scrolling);
        self.pointer.poll(now);

        let decision = self.gate.evaluate();
        if decision == GateDecision::Suspended {
            self.last_frame = None;
            return FrameOutcome { decision, report: TickReport::default() };
        }
        self.last_frame = Some(now);

        let report = self.scene.tick(decision, dt);
        if report.advanced.contains(SystemMask::CAMERA) {
            self.parallax.update(&mut self.camera, self.pointer.current());
        }

        FrameOutcome { decision, report }
    }
}
