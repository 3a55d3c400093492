//! Pointer parallax for the backdrop camera
//!
//! The camera drifts toward an offset proportional to the pointer position:
//! - pointer right: camera moves right
//! - pointer down: camera moves down (window y grows downward, world y up)
//!
//! Each gated tick covers a fixed fraction of the remaining distance per axis,
//! so the camera approaches its target without ever overshooting.

use backdrop_math::Vec3;

use crate::pointer::PointerState;

/// Maps pointer state onto a smoothed camera offset
#[derive(Clone, Debug, PartialEq)]
pub struct ParallaxController {
    /// World units of offset at full pointer deflection
    pub sensitivity: f32,
    /// Fraction of the remaining distance covered per tick, in (0, 1]
    pub smoothing: f32,
    /// Point the camera keeps looking at
    pub focus: Vec3,
}

impl Default for ParallaxController {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallaxController {
    pub fn new() -> Self {
        Self {
            sensitivity: 0.3,
            smoothing: 0.003,
            focus: Vec3::ZERO,
        }
    }

    /// Where the camera is heading for a pointer sample, keeping its depth
    pub fn target(&self, pointer: PointerState, depth: f32) -> Vec3 {
        Vec3::new(pointer.x * self.sensitivity, -pointer.y * self.sensitivity, depth)
    }

    /// Step the camera one gated tick toward the pointer target and re-aim it
    ///
    /// Returns the new camera position.
    pub fn update<C: CameraRig>(&self, camera: &mut C, pointer: PointerState) -> Vec3 {
        let position = camera.position();
        let target = self.target(pointer, position.z);
        let next = Vec3::new(
            position.x + (target.x - position.x) * self.smoothing,
            position.y + (target.y - position.y) * self.smoothing,
            position.z,
        );
        camera.set_position(next);
        camera.look_at(self.focus);
        next
    }

    /// Builder: set pointer sensitivity
    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    /// Builder: set smoothing factor, clamped into (0, 1]
    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = if smoothing.is_finite() {
            smoothing.clamp(f32::EPSILON, 1.0)
        } else {
            1.0
        };
        self
    }

    /// Builder: set the point the camera looks at
    pub fn with_focus(mut self, focus: Vec3) -> Self {
        self.focus = focus;
        self
    }
}

/// Trait for camera control
/// Allows the controller to drive any camera that can be placed and aimed
pub trait CameraRig {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn look_at(&mut self, target: Vec3);
}
